//! Detector and scorer request/response types.

use serde::{Deserialize, Serialize};
use smartcrop_models::{CropCandidate, Rectangle, SalienceHint};

/// Body of `POST /detect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectRequest {
    /// Image on a filesystem shared with the service
    pub image_path: String,
}

/// Regions found by the detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectResponse {
    #[serde(default)]
    pub regions: Vec<Rectangle>,
}

/// Body of `POST /crop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropScoreRequest {
    pub image_path: String,
    /// Target output width
    pub width: u32,
    /// Target output height
    pub height: u32,
    /// Regions the scorer should favour
    #[serde(default)]
    pub boost: Vec<SalienceHint>,
}

/// Best crop for a [`CropScoreRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropScoreResponse {
    pub top_crop: Rectangle,
    #[serde(default)]
    pub score: f64,
}

impl From<CropScoreResponse> for CropCandidate {
    fn from(response: CropScoreResponse) -> Self {
        CropCandidate::new(response.top_crop, response.score)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_crop_request_wire_format() {
        let request = CropScoreRequest {
            image_path: "/tmp/frame0001.jpg".to_string(),
            width: 1280,
            height: 720,
            boost: vec![SalienceHint::from_region(&Rectangle::new(1.0, 2.0, 3.0, 4.0))],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "image_path": "/tmp/frame0001.jpg",
                "width": 1280,
                "height": 720,
                "boost": [{"x": 1.0, "y": 2.0, "width": 3.0, "height": 4.0, "weight": 1.0}]
            })
        );
    }

    #[test]
    fn test_detect_response_without_regions() {
        let response: DetectResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.regions.is_empty());
    }

    #[test]
    fn test_score_response_into_candidate() {
        let response: CropScoreResponse = serde_json::from_value(json!({
            "top_crop": {"x": 5.0, "y": 10.0, "width": 1275.0, "height": 700.0},
            "score": 0.42
        }))
        .unwrap();
        let candidate = CropCandidate::from(response);
        assert_eq!(candidate.top_crop, Rectangle::new(5.0, 10.0, 1275.0, 700.0));
        assert_eq!(candidate.score, 0.42);
    }
}
