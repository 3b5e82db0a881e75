#![deny(unreachable_patterns)]
//! Salience-driven crop inference for videos and still images.
//!
//! This crate provides:
//! - Boundary traits for the external transcoder, object detector,
//!   saliency scorer and image editor
//! - An FFmpeg CLI transcoder and an `image`-crate still editor
//! - Frame sampling into per-request scratch directories
//! - Face-weighted crop scoring and cross-frame aggregation
//! - Media inspection (dimensions, shape, face presence)
//! - The two-pass crop/resize applier and the top-level [`SmartCropper`]

pub mod aggregator;
pub mod applier;
pub mod command;
pub mod config;
pub mod detector;
pub mod editor;
pub mod error;
pub mod inspector;
pub mod pipeline;
pub mod probe;
pub mod sampler;
pub mod scorer;
pub mod transcoder;

pub use aggregator::aggregate;
pub use applier::CropApplier;
pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use config::SmartCropConfig;
pub use detector::{ObjectDetector, SalienceDetector};
pub use editor::{ImageCrateEditor, ImageEditor};
pub use error::{MediaError, MediaResult};
pub use inspector::MediaInfoInspector;
pub use pipeline::SmartCropper;
pub use probe::image_dimensions;
pub use sampler::{FrameSampler, SampledFrames};
pub use scorer::{CropScorer, SaliencyScorer, ScoreOptions};
pub use transcoder::{CropFilter, FfmpegTranscoder, Transcoder, FRAME_PATTERN};
