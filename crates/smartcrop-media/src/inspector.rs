//! Media inspection: dimensions, shape and face presence.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::detector::SalienceDetector;
use crate::error::{MediaError, MediaResult};
use crate::probe::image_dimensions;
use crate::sampler::FrameSampler;
use smartcrop_models::{MediaInfo, MediaKind};

/// Reports [`MediaInfo`] for videos and still images.
#[derive(Clone)]
pub struct MediaInfoInspector {
    sampler: FrameSampler,
    salience: SalienceDetector,
}

impl MediaInfoInspector {
    pub fn new(sampler: FrameSampler, salience: SalienceDetector) -> Self {
        Self { sampler, salience }
    }

    /// Inspect `path`, dispatching on its extension.
    ///
    /// An unsupported extension is logged and yields `Ok(None)`.
    pub async fn inspect(&self, path: &Path) -> MediaResult<Option<MediaInfo>> {
        match MediaKind::from_path(path) {
            Some(kind) => self.inspect_kind(path, kind).await.map(Some),
            None => {
                warn!(file = %path.display(), "Not supported file type");
                Ok(None)
            }
        }
    }

    /// Inspect `path` as `kind`.
    pub async fn inspect_kind(&self, path: &Path, kind: MediaKind) -> MediaResult<MediaInfo> {
        match kind {
            MediaKind::Video => self.inspect_video(path).await,
            MediaKind::StillImage => self.inspect_image(path).await,
        }
    }

    /// Dimensions and a single face check on a still image.
    pub async fn inspect_image(&self, path: &Path) -> MediaResult<MediaInfo> {
        let (width, height) = image_dimensions(path)?;
        let face_exist = self.salience.has_salient_region(path).await?;
        Ok(MediaInfo::new(path, width, height, face_exist))
    }

    /// Sample `path` and scan its frames for a face.
    pub async fn inspect_video(&self, path: &Path) -> MediaResult<MediaInfo> {
        let sampled = self.sampler.sample(path).await?;
        let result = self.scan_frames(path, sampled.frames()).await;
        sampled.cleanup();
        result
    }

    /// Walk `frames` in order, stopping at the first one with a face.
    ///
    /// Without any face the last frame's dimensions are reported.
    async fn scan_frames(&self, file_name: &Path, frames: &[PathBuf]) -> MediaResult<MediaInfo> {
        let mut last = None;

        for (index, frame) in frames.iter().enumerate() {
            let (width, height) = image_dimensions(frame)?;
            if self.salience.has_salient_region(frame).await? {
                info!(file = %file_name.display(), frame = index + 1, "Face found");
                return Ok(MediaInfo::new(file_name, width, height, true));
            }
            debug!(frame = %frame.display(), "No face in frame");
            last = Some((width, height));
        }

        let (width, height) = last.ok_or_else(|| {
            MediaError::invalid_argument(format!("no frames sampled from {}", file_name.display()))
        })?;
        Ok(MediaInfo::new(file_name, width, height, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::MockObjectDetector;
    use crate::transcoder::MockTranscoder;
    use image::{Rgb, RgbImage};
    use smartcrop_models::{MediaShape, Rectangle};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn inspector(transcoder: MockTranscoder, detector: MockObjectDetector, work: &Path) -> MediaInfoInspector {
        MediaInfoInspector::new(
            FrameSampler::new(Arc::new(transcoder), work, 1.0),
            SalienceDetector::new(Arc::new(detector)),
        )
    }

    /// Transcoder writing one JPEG per `(width, height)` entry.
    fn frames_of(sizes: Vec<(u32, u32)>) -> MockTranscoder {
        let mut transcoder = MockTranscoder::new();
        transcoder.expect_extract_frames().returning(move |_, _, out| {
            for (i, (w, h)) in sizes.iter().enumerate() {
                RgbImage::from_pixel(*w, *h, Rgb([0, 0, 0]))
                    .save(out.join(format!("frame{:04}.jpg", i + 1)))?;
            }
            Ok(())
        });
        transcoder
    }

    fn is_frame(path: &Path, n: usize) -> bool {
        path.file_name()
            .and_then(|f| f.to_str())
            .map(|name| name == format!("frame{:04}.jpg", n))
            .unwrap_or(false)
    }

    fn video(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"mp4").unwrap();
        path
    }

    #[tokio::test]
    async fn test_video_face_short_circuits() {
        let dir = TempDir::new().unwrap();
        let input = video(&dir);

        let mut detector = MockObjectDetector::new();
        detector.expect_name().return_const("mock");
        detector
            .expect_detect()
            .withf(|p| is_frame(p, 1) || is_frame(p, 2))
            .times(2)
            .returning(|_| Ok(Vec::new()));
        detector
            .expect_detect()
            .withf(|p| is_frame(p, 3))
            .times(1)
            .returning(|_| Ok(vec![Rectangle::new(600.0, 200.0, 80.0, 80.0)]));

        let sizes = vec![(1280, 720), (1280, 720), (720, 1280), (640, 640), (640, 640)];
        let info = inspector(frames_of(sizes), detector, dir.path())
            .inspect(&input)
            .await
            .unwrap()
            .unwrap();

        assert!(info.face_exist);
        assert_eq!((info.width, info.height), (720, 1280));
        assert_eq!(info.shape, MediaShape::Portrait);
        assert_eq!(info.file_name, input);
    }

    #[tokio::test]
    async fn test_video_without_face_reports_last_frame() {
        let dir = TempDir::new().unwrap();
        let input = video(&dir);

        let mut detector = MockObjectDetector::new();
        detector.expect_name().return_const("mock");
        detector.expect_detect().times(2).returning(|_| Ok(Vec::new()));

        let info = inspector(frames_of(vec![(1280, 720), (720, 1280)]), detector, dir.path())
            .inspect_video(&input)
            .await
            .unwrap();

        assert!(!info.face_exist);
        assert_eq!((info.width, info.height), (720, 1280));
        assert_eq!(info.shape, MediaShape::Portrait);
    }

    #[tokio::test]
    async fn test_video_without_frames_fails() {
        let dir = TempDir::new().unwrap();
        let input = video(&dir);

        let mut detector = MockObjectDetector::new();
        detector.expect_detect().never();

        let err = inspector(frames_of(Vec::new()), detector, dir.path())
            .inspect_video(&input)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_still_image() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        RgbImage::from_pixel(100, 100, Rgb([1, 2, 3])).save(&path).unwrap();

        let mut transcoder = MockTranscoder::new();
        transcoder.expect_extract_frames().never();
        let mut detector = MockObjectDetector::new();
        detector.expect_name().return_const("mock");
        detector
            .expect_detect()
            .times(1)
            .returning(|_| Ok(vec![Rectangle::new(10.0, 10.0, 20.0, 20.0)]));

        let info = inspector(transcoder, detector, dir.path())
            .inspect(&path)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(info, MediaInfo::new(&path, 100, 100, true));
        assert_eq!(info.shape, MediaShape::Square);
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_none() {
        let dir = TempDir::new().unwrap();
        let mut transcoder = MockTranscoder::new();
        transcoder.expect_extract_frames().never();
        let mut detector = MockObjectDetector::new();
        detector.expect_detect().never();

        let result = inspector(transcoder, detector, dir.path())
            .inspect(Path::new("video.mov"))
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
