//! Crop engine boundary traits over [`MlClient`].

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use crate::client::MlClient;
use crate::types::CropScoreRequest;
use smartcrop_media::{MediaError, MediaResult, ObjectDetector, SaliencyScorer, ScoreOptions};
use smartcrop_models::{CropCandidate, Rectangle};

/// [`ObjectDetector`] backed by the detector service.
#[derive(Clone)]
pub struct MlDetector {
    client: Arc<MlClient>,
}

impl MlDetector {
    pub fn new(client: Arc<MlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectDetector for MlDetector {
    async fn detect(&self, image: &Path) -> MediaResult<Vec<Rectangle>> {
        self.client.detect(image).await.map_err(|e| {
            error!(image = %image.display(), "Detector request failed: {}", e);
            MediaError::detection_failed(e.to_string())
        })
    }

    fn name(&self) -> &'static str {
        "ml-detector"
    }
}

/// [`SaliencyScorer`] backed by the scorer service.
#[derive(Clone)]
pub struct MlScorer {
    client: Arc<MlClient>,
}

impl MlScorer {
    pub fn new(client: Arc<MlClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SaliencyScorer for MlScorer {
    async fn score_crop(&self, image: &Path, options: &ScoreOptions) -> MediaResult<CropCandidate> {
        let request = CropScoreRequest {
            image_path: image.to_string_lossy().into_owned(),
            width: options.target_width,
            height: options.target_height,
            boost: options.boost.clone(),
        };

        self.client
            .score_crop(&request)
            .await
            .map(CropCandidate::from)
            .map_err(|e| {
                error!(image = %image.display(), "Scorer request failed: {}", e);
                MediaError::scoring_failed(e.to_string())
            })
    }

    fn name(&self) -> &'static str {
        "ml-scorer"
    }
}
