use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ModelError, ModelResult};
use crate::media::MediaKind;

/// Request to crop `in_file` to `width` x `height` into `out_file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRequest {
    pub in_file: PathBuf,
    pub out_file: PathBuf,
    /// Target output width
    pub width: u32,
    /// Target output height
    pub height: u32,
    /// Skip detection and scoring; do a centred crop-and-fill (still images only)
    #[serde(default)]
    pub stupid: bool,
}

impl CropRequest {
    pub fn new(
        in_file: impl Into<PathBuf>,
        out_file: impl Into<PathBuf>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            in_file: in_file.into(),
            out_file: out_file.into(),
            width,
            height,
            stupid: false,
        }
    }

    /// Enable the naive centred crop.
    pub fn with_stupid(mut self, stupid: bool) -> Self {
        self.stupid = stupid;
        self
    }

    /// Reject zero-sized targets.
    pub fn validate(&self) -> ModelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ModelError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Kind of the input file, if supported.
    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_path(&self.in_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stupid_defaults_to_false() {
        let req: CropRequest = serde_json::from_str(
            r#"{"in_file":"1.mp4","out_file":"out.mp4","width":1280,"height":720}"#,
        )
        .unwrap();
        assert!(!req.stupid);
        assert_eq!(req.kind(), Some(MediaKind::Video));
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(CropRequest::new("a.jpg", "b.jpg", 0, 10).validate().is_err());
        assert!(CropRequest::new("a.jpg", "b.jpg", 10, 10).validate().is_ok());
    }
}
