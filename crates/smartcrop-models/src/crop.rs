//! Crop candidates and their aggregation into a single crop window.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::rect::Rectangle;

/// Best crop the scorer found for one still image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CropCandidate {
    /// Top-ranked rectangle at the requested aspect ratio
    pub top_crop: Rectangle,
    /// Scorer's rating of `top_crop`
    pub score: f64,
}

impl CropCandidate {
    pub fn new(top_crop: Rectangle, score: f64) -> Self {
        Self { top_crop, score }
    }
}

/// A single crop window averaged over every sampled frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AggregatedCrop {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Number of candidates that contributed
    pub count: usize,
}

impl AggregatedCrop {
    /// Unweighted arithmetic mean of each rectangle field.
    ///
    /// Scores are ignored. An empty sequence is an error rather than a
    /// NaN-filled window.
    pub fn from_candidates<'a, I>(candidates: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = &'a CropCandidate>,
    {
        let (sum, count) = candidates.into_iter().fold(
            ([0.0_f64; 4], 0_usize),
            |(mut sum, count), candidate| {
                let rect = &candidate.top_crop;
                sum[0] += rect.x;
                sum[1] += rect.y;
                sum[2] += rect.width;
                sum[3] += rect.height;
                (sum, count + 1)
            },
        );

        if count == 0 {
            return Err(ModelError::EmptyAggregation);
        }

        let n = count as f64;
        Ok(Self {
            x: sum[0] / n,
            y: sum[1] / n,
            width: sum[2] / n,
            height: sum[3] / n,
            count,
        })
    }

    /// The averaged window as a rectangle.
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }
}
