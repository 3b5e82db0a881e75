//! Error types for media operations.

use std::path::PathBuf;
use thiserror::Error;

use smartcrop_models::ModelError;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur during crop inference and application.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("FFmpeg not found in PATH")]
    FfmpegNotFound,

    #[error("FFmpeg command failed: {message}")]
    FfmpegFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(PathBuf),

    #[error("Salience detection failed: {0}")]
    DetectionFailed(String),

    #[error("Crop scoring failed: {0}")]
    ScoringFailed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MediaError {
    /// Create a detection failure error.
    pub fn detection_failed(message: impl Into<String>) -> Self {
        Self::DetectionFailed(message.into())
    }

    /// Create a scoring failure error.
    pub fn scoring_failed(message: impl Into<String>) -> Self {
        Self::ScoringFailed(message.into())
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an FFmpeg failure error.
    pub fn ffmpeg_failed(
        message: impl Into<String>,
        stderr: Option<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::FfmpegFailed {
            message: message.into(),
            stderr,
            exit_code,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether this is a transcoder failure.
    pub fn is_transcode_error(&self) -> bool {
        matches!(self, Self::FfmpegFailed { .. } | Self::FfmpegNotFound)
    }
}

impl From<ModelError> for MediaError {
    fn from(err: ModelError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
