//! Video transcoder boundary and its FFmpeg implementation.

use async_trait::async_trait;
use std::path::Path;
use tracing::info;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// File name pattern for sampled frames; names sort in sampling order.
pub const FRAME_PATTERN: &str = "frame%04d.jpg";

/// Pixel-exact crop window for a crop filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropFilter {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropFilter {
    /// FFmpeg `crop=w:h:x:y` expression.
    pub fn to_filter_string(&self) -> String {
        format!("crop={}:{}:{}:{}", self.width, self.height, self.x, self.y)
    }
}

/// Video decode/filter/encode operations the crop pipeline relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Write still JPEG frames of `input` sampled at `fps` into `output_dir`.
    async fn extract_frames(&self, input: &Path, fps: f64, output_dir: &Path) -> MediaResult<()>;

    /// Crop every frame of `input` to `crop`, writing `output`.
    async fn apply_crop_filter(&self, input: &Path, crop: CropFilter, output: &Path)
        -> MediaResult<()>;

    /// Scale `input` to `width` x `height`, writing `output`.
    async fn resize(&self, input: &Path, width: u32, height: u32, output: &Path)
        -> MediaResult<()>;
}

/// Transcoder backed by the `ffmpeg` CLI.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    log_level: String,
    runner: FfmpegRunner,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("error")
    }
}

impl FfmpegTranscoder {
    pub fn new(log_level: impl Into<String>) -> Self {
        Self {
            log_level: log_level.into(),
            runner: FfmpegRunner::new(),
        }
    }

    fn command(&self, input: &Path, output: &Path) -> FfmpegCommand {
        FfmpegCommand::new(input, output).log_level(self.log_level.clone())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn extract_frames(&self, input: &Path, fps: f64, output_dir: &Path) -> MediaResult<()> {
        let cmd = self
            .command(input, &output_dir.join(FRAME_PATTERN))
            .video_filter(format!("fps={}", fps));

        self.runner.run(&cmd).await?;
        info!(input = %input.display(), fps, "Finished frame extraction");
        Ok(())
    }

    async fn apply_crop_filter(
        &self,
        input: &Path,
        crop: CropFilter,
        output: &Path,
    ) -> MediaResult<()> {
        let cmd = self
            .command(input, output)
            .video_filter(crop.to_filter_string());

        self.runner.run(&cmd).await?;
        info!(output = %output.display(), filter = %crop.to_filter_string(), "Finished video crop");
        Ok(())
    }

    async fn resize(&self, input: &Path, width: u32, height: u32, output: &Path) -> MediaResult<()> {
        let cmd = self
            .command(input, output)
            .video_filter(format!("scale={}:{}", width, height));

        self.runner.run(&cmd).await?;
        info!(output = %output.display(), width, height, "Finished video resize");
        Ok(())
    }
}
