//! Client for the external object-detector and saliency-scorer services.
//!
//! Both services are plain JSON-over-HTTP. [`MlDetector`] and [`MlScorer`]
//! adapt the client to the crop engine's `ObjectDetector` and
//! `SaliencyScorer` traits.

pub mod adapters;
pub mod client;
pub mod error;
pub mod types;

pub use adapters::{MlDetector, MlScorer};
pub use client::{MlClient, MlClientConfig};
pub use error::{MlError, MlResult};
pub use types::{CropScoreRequest, CropScoreResponse, DetectRequest, DetectResponse, HealthResponse};
