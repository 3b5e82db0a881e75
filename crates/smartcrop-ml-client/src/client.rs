//! Detector and scorer HTTP client.

use std::path::Path;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{MlError, MlResult};
use crate::types::{CropScoreRequest, CropScoreResponse, DetectRequest, DetectResponse, HealthResponse};
use smartcrop_models::Rectangle;

/// Configuration for ML client.
#[derive(Debug, Clone, PartialEq)]
pub struct MlClientConfig {
    /// Base URL of the object-detector service
    pub detector_url: String,
    /// Base URL of the saliency-scorer service
    pub scorer_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for MlClientConfig {
    fn default() -> Self {
        Self {
            detector_url: "http://localhost:8001".to_string(),
            scorer_url: "http://localhost:8002".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl MlClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            detector_url: std::env::var("SMARTCROP_DETECTOR_URL").unwrap_or(defaults.detector_url),
            scorer_url: std::env::var("SMARTCROP_SCORER_URL").unwrap_or(defaults.scorer_url),
            timeout: std::env::var("SMARTCROP_SERVICE_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Client for the detector and scorer services.
pub struct MlClient {
    http: Client,
    config: MlClientConfig,
}

impl MlClient {
    /// Create a new ML client.
    pub fn new(config: MlClientConfig) -> MlResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(MlError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> MlResult<Self> {
        Self::new(MlClientConfig::from_env())
    }

    pub fn config(&self) -> &MlClientConfig {
        &self.config
    }

    /// Check that both services report healthy.
    pub async fn health_check(&self) -> MlResult<bool> {
        let detector = self.service_healthy(&self.config.detector_url).await;
        let scorer = self.service_healthy(&self.config.scorer_url).await;
        Ok(detector && scorer)
    }

    async fn service_healthy(&self, base_url: &str) -> bool {
        let url = format!("{}/health", base_url.trim_end_matches('/'));

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                match response.json::<HealthResponse>().await {
                    Ok(health) => health.status == "healthy" || health.status == "ok",
                    Err(e) => {
                        warn!("Health response from {} unreadable: {}", url, e);
                        false
                    }
                }
            }
            Ok(response) => {
                warn!("Health check {} failed: {}", url, response.status());
                false
            }
            Err(e) => {
                warn!("Health check {} error: {}", url, e);
                false
            }
        }
    }

    /// Detect salient regions in `image`.
    pub async fn detect(&self, image: &Path) -> MlResult<Vec<Rectangle>> {
        let url = format!("{}/detect", self.config.detector_url.trim_end_matches('/'));
        let request = DetectRequest {
            image_path: image.to_string_lossy().into_owned(),
        };

        let response: DetectResponse = self.post_json(&url, &request).await?;
        Ok(response.regions)
    }

    /// Ask the scorer for the best crop.
    pub async fn score_crop(&self, request: &CropScoreRequest) -> MlResult<CropScoreResponse> {
        let url = format!("{}/crop", self.config.scorer_url.trim_end_matches('/'));
        self.post_json(&url, request).await
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> MlResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("{} returned {}: {}", url, status, body);
            return Err(match status {
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                    MlError::ServiceUnavailable(message)
                }
                _ => MlError::RequestFailed(message),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| MlError::InvalidResponse(format!("{} sent unexpected body: {}", url, e)))
    }

    fn classify(&self, error: reqwest::Error) -> MlError {
        if error.is_timeout() {
            MlError::Timeout(self.config.timeout)
        } else if error.is_connect() {
            MlError::ServiceUnavailable(error.to_string())
        } else {
            MlError::Network(error)
        }
    }
}
