//! Shared data models for the SmartCrop engine.
//!
//! This crate provides Serde-serializable types for:
//! - Pixel rectangles and salience hints
//! - Per-frame crop candidates and their aggregation
//! - Media shape classification and media info
//! - Crop requests

pub mod crop;
pub mod error;
pub mod media;
pub mod rect;
pub mod request;
pub mod shape;

// Re-export common types
pub use crop::{AggregatedCrop, CropCandidate};
pub use error::{ModelError, ModelResult};
pub use media::{MediaInfo, MediaKind};
pub use rect::{Rectangle, SalienceHint};
pub use request::CropRequest;
pub use shape::MediaShape;
