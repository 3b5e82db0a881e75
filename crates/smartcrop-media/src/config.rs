//! Crop engine configuration.

use std::path::PathBuf;

/// Default frame sampling rate (frames per second of source video).
pub const DEFAULT_FRAMES_PER_SECOND: f64 = 1.0;

/// Crop engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartCropConfig {
    /// Frames sampled per second of video
    pub frames_per_second: f64,
    /// Parent directory for per-request frame scratch directories
    pub work_dir: PathBuf,
    /// FFmpeg `-v` log level
    pub ffmpeg_log_level: String,
}

impl Default for SmartCropConfig {
    fn default() -> Self {
        Self {
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            work_dir: std::env::temp_dir(),
            ffmpeg_log_level: "error".to_string(),
        }
    }
}

impl SmartCropConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            frames_per_second: std::env::var("SMARTCROP_FPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.frames_per_second),
            work_dir: std::env::var("SMARTCROP_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
            ffmpeg_log_level: std::env::var("SMARTCROP_FFMPEG_LOG_LEVEL")
                .unwrap_or(defaults.ffmpeg_log_level),
        }
    }
}
