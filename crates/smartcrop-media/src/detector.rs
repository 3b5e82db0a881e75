//! Salience detection.
//!
//! Wraps an external object detector (faces) and turns each detected region
//! into a [`SalienceHint`] the saliency scorer can boost toward.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use smartcrop_models::{Rectangle, SalienceHint};

/// External object detector operating on a single still image.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Bounding boxes of detected objects; empty when nothing is found.
    async fn detect(&self, image: &Path) -> MediaResult<Vec<Rectangle>>;

    /// Detector name for logging.
    fn name(&self) -> &'static str;
}

/// Converts detector output into boost hints.
#[derive(Clone)]
pub struct SalienceDetector {
    detector: Arc<dyn ObjectDetector>,
}

impl SalienceDetector {
    pub fn new(detector: Arc<dyn ObjectDetector>) -> Self {
        Self { detector }
    }

    /// Detect salient regions in `image`.
    ///
    /// Every region becomes one hint with weight 1.0. Finding nothing is not
    /// an error; an unreadable image is.
    pub async fn detect(&self, image: &Path) -> MediaResult<Vec<SalienceHint>> {
        if !image.is_file() {
            return Err(MediaError::detection_failed(format!(
                "cannot read image {}",
                image.display()
            )));
        }

        let regions = self.detector.detect(image).await?;
        metrics::counter!("smartcrop_faces_detected_total").increment(regions.len() as u64);
        debug!(
            image = %image.display(),
            detector = self.detector.name(),
            regions = regions.len(),
            "Salience detection complete"
        );

        Ok(regions.iter().map(SalienceHint::from_region).collect())
    }

    /// Whether `image` contains at least one salient region.
    pub async fn has_salient_region(&self, image: &Path) -> MediaResult<bool> {
        Ok(!self.detect(image).await?.is_empty())
    }
}
