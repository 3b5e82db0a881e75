//! Media shape classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Aspect class of a frame or image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaShape {
    /// Wider than tall
    Landscape,
    /// Taller than wide
    Portrait,
    /// Equal width and height
    Square,
}

impl MediaShape {
    /// Classify a `width` x `height` frame.
    pub fn classify(width: u32, height: u32) -> Self {
        match width.cmp(&height) {
            Ordering::Greater => MediaShape::Landscape,
            Ordering::Less => MediaShape::Portrait,
            Ordering::Equal => MediaShape::Square,
        }
    }

    /// Returns the shape name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaShape::Landscape => "landscape",
            MediaShape::Portrait => "portrait",
            MediaShape::Square => "square",
        }
    }
}

impl fmt::Display for MediaShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
