//! Top-level crop and info operations.
//!
//! Video: sample frames, score each, aggregate into one window, crop and
//! resize. Still image: score once (or fill in stupid mode), crop and
//! resize. Each stage completes before the next begins.

use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::aggregator::aggregate;
use crate::applier::CropApplier;
use crate::config::SmartCropConfig;
use crate::detector::{ObjectDetector, SalienceDetector};
use crate::editor::{ImageCrateEditor, ImageEditor};
use crate::error::{MediaError, MediaResult};
use crate::inspector::MediaInfoInspector;
use crate::probe::image_dimensions;
use crate::sampler::{FrameSampler, SampledFrames};
use crate::scorer::{CropScorer, SaliencyScorer};
use crate::transcoder::{FfmpegTranscoder, Transcoder};
use smartcrop_models::{CropCandidate, CropRequest, MediaInfo, MediaKind};

/// Crop engine wired to its external collaborators.
#[derive(Clone)]
pub struct SmartCropper {
    sampler: FrameSampler,
    scorer: CropScorer,
    inspector: MediaInfoInspector,
    applier: CropApplier,
}

impl SmartCropper {
    /// Create a cropper over explicit collaborators.
    pub fn new(
        config: &SmartCropConfig,
        transcoder: Arc<dyn Transcoder>,
        detector: Arc<dyn ObjectDetector>,
        scorer: Arc<dyn SaliencyScorer>,
        editor: Arc<dyn ImageEditor>,
    ) -> Self {
        let salience = SalienceDetector::new(detector);
        let sampler = FrameSampler::new(
            transcoder.clone(),
            config.work_dir.clone(),
            config.frames_per_second,
        );

        Self {
            scorer: CropScorer::new(salience.clone(), scorer),
            inspector: MediaInfoInspector::new(sampler.clone(), salience),
            applier: CropApplier::new(transcoder, editor),
            sampler,
        }
    }

    /// Create a cropper using FFmpeg and the built-in image editor.
    pub fn with_defaults(
        config: &SmartCropConfig,
        detector: Arc<dyn ObjectDetector>,
        scorer: Arc<dyn SaliencyScorer>,
    ) -> Self {
        Self::new(
            config,
            Arc::new(FfmpegTranscoder::new(config.ffmpeg_log_level.clone())),
            detector,
            scorer,
            Arc::new(ImageCrateEditor::default()),
        )
    }

    /// Crop `request.in_file`, choosing the video or still-image path by extension.
    pub async fn crop(&self, request: &CropRequest) -> MediaResult<()> {
        request.validate()?;
        let kind = request
            .kind()
            .ok_or_else(|| MediaError::UnsupportedFileType(request.in_file.clone()))?;

        let span = tracing::info_span!(
            "crop_request",
            request_id = %Uuid::new_v4(),
            kind = %kind,
            input = %request.in_file.display()
        );

        async {
            match kind {
                MediaKind::Video => self.crop_video(request).await,
                MediaKind::StillImage => self.crop_image(request).await,
            }
        }
        .instrument(span)
        .await
    }

    /// Crop a still image.
    pub async fn crop_image(&self, request: &CropRequest) -> MediaResult<()> {
        request.validate()?;
        metrics::counter!("smartcrop_crops_total", "kind" => MediaKind::StillImage.as_str())
            .increment(1);

        if request.stupid {
            info!("stupid mode crop image.");
            return self.applier.apply_image_fill(request).await;
        }

        let candidate = self
            .scorer
            .score(&request.in_file, request.width, request.height)
            .await?;
        self.applier.apply_image(request, &candidate).await
    }

    /// Crop a video with one window fixed for its whole duration.
    pub async fn crop_video(&self, request: &CropRequest) -> MediaResult<()> {
        request.validate()?;
        metrics::counter!("smartcrop_crops_total", "kind" => MediaKind::Video.as_str())
            .increment(1);

        if request.stupid {
            warn!("stupid mode only applies to still images; running full video crop");
        }

        let sampled = self.sampler.sample(&request.in_file).await?;
        let result = self.crop_sampled(request, &sampled).await;
        sampled.cleanup();
        result
    }

    async fn crop_sampled(&self, request: &CropRequest, sampled: &SampledFrames) -> MediaResult<()> {
        let candidates = self.score_frames(sampled, request.width, request.height).await?;
        let crop = aggregate(&candidates)?;

        let first = sampled
            .frames()
            .first()
            .ok_or_else(|| MediaError::invalid_argument("no frames sampled"))?;
        let (frame_width, frame_height) = image_dimensions(first)?;
        self.applier
            .apply_video(request, &crop, frame_width, frame_height)
            .await?;

        info!(output = %request.out_file.display(), frames = crop.count, "Finished video crop");
        Ok(())
    }

    /// Score every sampled frame in order.
    async fn score_frames(
        &self,
        sampled: &SampledFrames,
        target_width: u32,
        target_height: u32,
    ) -> MediaResult<Vec<CropCandidate>> {
        let mut candidates = Vec::with_capacity(sampled.len());
        for frame in sampled.frames() {
            candidates.push(self.scorer.score(frame, target_width, target_height).await?);
        }
        Ok(candidates)
    }

    /// Inspect a file. Unsupported extensions are logged and yield `Ok(None)`.
    pub async fn info(&self, path: &Path) -> MediaResult<Option<MediaInfo>> {
        let span = tracing::info_span!(
            "info_request",
            request_id = %Uuid::new_v4(),
            input = %path.display()
        );
        self.inspector.inspect(path).instrument(span).await
    }
}
