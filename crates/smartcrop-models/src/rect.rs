use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// A rectangle in source pixel coordinates, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Rectangle {
    /// X coordinate of the top-left corner
    pub x: f64,
    /// Y coordinate of the top-left corner
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge x-coordinate.
    #[inline]
    pub fn x2(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate.
    #[inline]
    pub fn y2(&self) -> f64 {
        self.y + self.height
    }

    /// Check that the rectangle has a positive, finite area.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Check the rectangle lies within a `frame_width` x `frame_height` frame.
    pub fn fits_within(&self, frame_width: u32, frame_height: u32) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x2() <= frame_width as f64
            && self.y2() <= frame_height as f64
    }

    /// Clamp the rectangle into the frame.
    ///
    /// An oversized rectangle is scaled down uniformly until it fits, keeping
    /// its aspect ratio, then the origin is moved so the rectangle ends inside
    /// the frame. Fails if the result has no area.
    pub fn clamp_to(&self, frame_width: u32, frame_height: u32) -> ModelResult<Rectangle> {
        if !self.is_valid() {
            return Err(ModelError::DegenerateRect(format!("{:?}", self)));
        }

        let fw = frame_width as f64;
        let fh = frame_height as f64;

        let scale = (fw / self.width).min(fh / self.height).min(1.0);
        let width = (self.width * scale).min(fw);
        let height = (self.height * scale).min(fh);
        let x = self.x.max(0.0).min(fw - width);
        let y = self.y.max(0.0).min(fh - height);

        let clamped = Rectangle::new(x, y, width, height);
        if clamped.is_valid() {
            Ok(clamped)
        } else {
            Err(ModelError::DegenerateRect(format!("{:?}", clamped)))
        }
    }

    /// Integer pixel geometry `(x, y, width, height)` for crop filters.
    ///
    /// Origin is floored and size rounded; the result never exceeds the frame
    /// when the rectangle already fits within it.
    pub fn to_pixels(&self, frame_width: u32, frame_height: u32) -> (u32, u32, u32, u32) {
        let x = (self.x.max(0.0).floor() as u32).min(frame_width.saturating_sub(1));
        let y = (self.y.max(0.0).floor() as u32).min(frame_height.saturating_sub(1));
        let width = (self.width.round().max(1.0) as u32).min(frame_width - x);
        let height = (self.height.round().max(1.0) as u32).min(frame_height - y);
        (x, y, width, height)
    }
}

/// A region the saliency scorer should bias toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalienceHint {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Positive boost weight
    pub weight: f64,
}

impl SalienceHint {
    /// Weight given to every detected region.
    pub const DEFAULT_WEIGHT: f64 = 1.0;

    /// Hint covering a detected region at the default weight.
    pub fn from_region(region: &Rectangle) -> Self {
        Self {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    /// The hint's region without its weight.
    pub fn region(&self) -> Rectangle {
        Rectangle::new(self.x, self.y, self.width, self.height)
    }
}
