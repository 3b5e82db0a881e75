//! Frame sampling into a per-request scratch directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{MediaError, MediaResult};
use crate::transcoder::Transcoder;

/// Still frames extracted from one video.
///
/// Owns its scratch directory; the directory and every frame in it are
/// removed when this value is dropped.
#[derive(Debug)]
pub struct SampledFrames {
    dir: TempDir,
    frames: Vec<PathBuf>,
}

impl SampledFrames {
    /// Frame paths in sampling order.
    pub fn frames(&self) -> &[PathBuf] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Scratch directory holding the frames.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the scratch directory now, logging failures.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("Failed to remove frame directory {}: {}", path.display(), e);
        }
    }
}

/// Extracts frames at a fixed stride through a [`Transcoder`].
#[derive(Clone)]
pub struct FrameSampler {
    transcoder: Arc<dyn Transcoder>,
    work_dir: PathBuf,
    frames_per_second: f64,
}

impl FrameSampler {
    pub fn new(transcoder: Arc<dyn Transcoder>, work_dir: impl Into<PathBuf>, frames_per_second: f64) -> Self {
        Self {
            transcoder,
            work_dir: work_dir.into(),
            frames_per_second,
        }
    }

    pub fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    /// Sample `video` into a fresh, uniquely named scratch directory.
    pub async fn sample(&self, video: &Path) -> MediaResult<SampledFrames> {
        if !video.exists() {
            return Err(MediaError::FileNotFound(video.to_path_buf()));
        }
        if !(self.frames_per_second.is_finite() && self.frames_per_second > 0.0) {
            return Err(MediaError::invalid_argument(format!(
                "frames per second must be positive, got {}",
                self.frames_per_second
            )));
        }

        fs::create_dir_all(&self.work_dir).await?;
        let dir = tempfile::Builder::new()
            .prefix("smartcrop-frames-")
            .tempdir_in(&self.work_dir)?;

        self.transcoder
            .extract_frames(video, self.frames_per_second, dir.path())
            .await?;

        let frames = collect_frames(dir.path()).await?;
        metrics::counter!("smartcrop_frames_sampled_total").increment(frames.len() as u64);
        info!(
            input = %video.display(),
            frames = frames.len(),
            fps = self.frames_per_second,
            "Sampled frames"
        );

        Ok(SampledFrames { dir, frames })
    }
}

/// JPEG files directly inside `dir`, in sampling order.
async fn collect_frames(dir: &Path) -> MediaResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut frames = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let path = entry.path();
        let is_jpeg = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("jpg"))
            .unwrap_or(false);
        if is_jpeg {
            frames.push(path);
        }
    }

    frames.sort_by_cached_key(|path| (frame_index(path), path.clone()));
    Ok(frames)
}

/// Sequence number of a `frameNNNN.jpg` file. The `%04d` pattern widens past
/// 9999, so plain name order is not sampling order.
fn frame_index(path: &Path) -> Option<u64> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.strip_prefix("frame"))
        .and_then(|n| n.parse().ok())
}
