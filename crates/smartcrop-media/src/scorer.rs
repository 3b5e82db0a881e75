//! Per-image crop scoring.
//!
//! Feeds salience hints and the target size to an external saliency scorer
//! and returns its top-ranked crop, clamped to the image.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::detector::SalienceDetector;
use crate::error::{MediaError, MediaResult};
use crate::probe::image_dimensions;
use smartcrop_models::{CropCandidate, SalienceHint};

/// Options passed to the saliency scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOptions {
    /// Desired output width; with `target_height` sets the crop aspect
    pub target_width: u32,
    pub target_height: u32,
    /// Regions to bias ranking toward
    pub boost: Vec<SalienceHint>,
}

/// External saliency-scoring service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SaliencyScorer: Send + Sync {
    /// Best crop of `image` for `options`.
    async fn score_crop(&self, image: &Path, options: &ScoreOptions) -> MediaResult<CropCandidate>;

    /// Scorer name for logging.
    fn name(&self) -> &'static str;
}

/// Scores one still image into a [`CropCandidate`].
#[derive(Clone)]
pub struct CropScorer {
    salience: SalienceDetector,
    scorer: Arc<dyn SaliencyScorer>,
}

impl CropScorer {
    pub fn new(salience: SalienceDetector, scorer: Arc<dyn SaliencyScorer>) -> Self {
        Self { salience, scorer }
    }

    /// Score `image` for a `target_width` x `target_height` output.
    pub async fn score(
        &self,
        image: &Path,
        target_width: u32,
        target_height: u32,
    ) -> MediaResult<CropCandidate> {
        if target_width == 0 || target_height == 0 {
            return Err(MediaError::invalid_argument(format!(
                "target size {}x{} must be positive",
                target_width, target_height
            )));
        }

        let boost = self.salience.detect(image).await?;
        let options = ScoreOptions {
            target_width,
            target_height,
            boost,
        };

        let candidate = self.scorer.score_crop(image, &options).await?;

        let (width, height) = image_dimensions(image)?;
        let top_crop = candidate.top_crop.clamp_to(width, height).map_err(|e| {
            MediaError::scoring_failed(format!(
                "{} returned an unusable crop for {}: {}",
                self.scorer.name(),
                image.display(),
                e
            ))
        })?;

        metrics::histogram!("smartcrop_frame_score").record(candidate.score);
        debug!(
            image = %image.display(),
            boost = options.boost.len(),
            score = candidate.score,
            x = top_crop.x,
            y = top_crop.y,
            width = top_crop.width,
            height = top_crop.height,
            "Scored crop"
        );

        Ok(CropCandidate::new(top_crop, candidate.score))
    }
}
