//! Materialises a crop decision into an output file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::editor::ImageEditor;
use crate::error::MediaResult;
use crate::transcoder::{CropFilter, Transcoder};
use smartcrop_models::{AggregatedCrop, CropCandidate, CropRequest};

/// Drives the transcoder and image editor to crop, then resize.
#[derive(Clone)]
pub struct CropApplier {
    transcoder: Arc<dyn Transcoder>,
    editor: Arc<dyn ImageEditor>,
}

impl CropApplier {
    pub fn new(transcoder: Arc<dyn Transcoder>, editor: Arc<dyn ImageEditor>) -> Self {
        Self { transcoder, editor }
    }

    /// Crop the candidate out of the still image, then resize to the target.
    pub async fn apply_image(&self, request: &CropRequest, candidate: &CropCandidate) -> MediaResult<()> {
        self.editor
            .crop(&request.in_file, &request.out_file, candidate.top_crop)
            .await?;
        self.editor
            .resize(&request.out_file, &request.out_file, request.width, request.height)
            .await?;

        info!(output = %request.out_file.display(), "Finished image crop");
        Ok(())
    }

    /// Naive centred crop-and-fill; no scoring involved.
    pub async fn apply_image_fill(&self, request: &CropRequest) -> MediaResult<()> {
        self.editor
            .resize_to_fill(&request.in_file, &request.out_file, request.width, request.height)
            .await?;

        info!(output = %request.out_file.display(), "Finished fill crop");
        Ok(())
    }

    /// Crop the video to `crop` in a first pass, then resize in a second.
    ///
    /// `frame_width` x `frame_height` is the source resolution the crop was
    /// computed in.
    pub async fn apply_video(
        &self,
        request: &CropRequest,
        crop: &AggregatedCrop,
        frame_width: u32,
        frame_height: u32,
    ) -> MediaResult<()> {
        let (x, y, width, height) = crop.rect().to_pixels(frame_width, frame_height);
        let filter = CropFilter { x, y, width, height };
        let tmp = intermediate_path(&request.out_file);

        let result = async {
            self.transcoder
                .apply_crop_filter(&request.in_file, filter, &tmp)
                .await?;
            self.transcoder
                .resize(&tmp, request.width, request.height, &request.out_file)
                .await
        }
        .await;

        remove_intermediate(&tmp).await;
        result
    }
}

/// Unique intermediate file next to `output`.
fn intermediate_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output.with_file_name(format!(".{}.{}.tmp.mp4", stem, Uuid::new_v4()))
}

async fn remove_intermediate(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove intermediate file {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::MockImageEditor;
    use crate::error::MediaError;
    use crate::transcoder::MockTranscoder;
    use mockall::Sequence;
    use smartcrop_models::Rectangle;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[test]
    fn test_intermediate_sits_next_to_output() {
        let tmp = intermediate_path(Path::new("/videos/out/final.mp4"));
        assert_eq!(tmp.parent(), Some(Path::new("/videos/out")));
        let name = tmp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".final."));
        assert!(name.ends_with(".tmp.mp4"));
        assert_ne!(tmp, intermediate_path(Path::new("/videos/out/final.mp4")));
    }

    #[tokio::test]
    async fn test_image_crop_then_resize() {
        let mut editor = MockImageEditor::new();
        let mut seq = Sequence::new();
        editor
            .expect_crop()
            .withf(|src, dst, rect| {
                src == Path::new("in.jpg")
                    && dst == Path::new("out.jpg")
                    && *rect == Rectangle::new(5.0, 0.0, 90.0, 50.0)
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        editor
            .expect_resize()
            .withf(|src, dst, w, h| {
                src == Path::new("out.jpg") && dst == Path::new("out.jpg") && *w == 180 && *h == 100
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _| Ok(()));

        let applier = CropApplier::new(Arc::new(MockTranscoder::new()), Arc::new(editor));
        let request = CropRequest::new("in.jpg", "out.jpg", 180, 100);
        let candidate = CropCandidate::new(Rectangle::new(5.0, 0.0, 90.0, 50.0), 1.0);

        applier.apply_image(&request, &candidate).await.unwrap();
    }

    #[tokio::test]
    async fn test_video_two_pass_and_cleanup() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.mp4");
        let seen_tmp = Arc::new(Mutex::new(None::<PathBuf>));

        let mut transcoder = MockTranscoder::new();
        let mut seq = Sequence::new();
        let record = seen_tmp.clone();
        transcoder
            .expect_apply_crop_filter()
            .withf(|input, filter, _| {
                input == Path::new("in.mp4")
                    && *filter
                        == CropFilter {
                            x: 5,
                            y: 10,
                            width: 1275,
                            height: 700,
                        }
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _, tmp| {
                std::fs::write(tmp, b"cropped")?;
                *record.lock().unwrap() = Some(tmp.to_path_buf());
                Ok(())
            });
        transcoder
            .expect_resize()
            .withf(|_, w, h, _| *w == 640 && *h == 360)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|tmp, _, _, out| {
                std::fs::copy(tmp, out)?;
                Ok(())
            });

        let applier = CropApplier::new(Arc::new(transcoder), Arc::new(MockImageEditor::new()));
        let request = CropRequest::new("in.mp4", &out, 640, 360);
        let crop = AggregatedCrop {
            x: 5.0,
            y: 10.0,
            width: 1275.0,
            height: 700.0,
            count: 3,
        };

        applier.apply_video(&request, &crop, 1280, 720).await.unwrap();

        assert!(out.exists());
        let tmp = seen_tmp.lock().unwrap().clone().unwrap();
        assert_eq!(tmp.parent(), Some(dir.path()));
        assert!(!tmp.exists());
    }

    #[tokio::test]
    async fn test_video_resize_failure_still_removes_intermediate() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.mp4");

        let mut transcoder = MockTranscoder::new();
        transcoder
            .expect_apply_crop_filter()
            .returning(|_, _, tmp| Ok(std::fs::write(tmp, b"cropped")?));
        transcoder
            .expect_resize()
            .returning(|_, _, _, _| Err(MediaError::ffmpeg_failed("scale failed", None, Some(1))));

        let applier = CropApplier::new(Arc::new(transcoder), Arc::new(MockImageEditor::new()));
        let request = CropRequest::new("in.mp4", &out, 640, 360);
        let crop = AggregatedCrop {
            x: 0.0,
            y: 0.0,
            width: 1280.0,
            height: 720.0,
            count: 1,
        };

        let err = applier.apply_video(&request, &crop, 1280, 720).await.unwrap_err();
        assert!(err.is_transcode_error());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
