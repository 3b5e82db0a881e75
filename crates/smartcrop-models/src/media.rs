//! Media kinds and inspection results.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::shape::MediaShape;

/// Kind of media a file holds, decided once from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// `.mp4` video
    Video,
    /// `.jpg` still image
    StillImage,
}

impl MediaKind {
    /// Determine the kind from a path's extension (case-insensitive).
    ///
    /// Returns `None` for anything other than `.mp4` or `.jpg`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mp4" => Some(MediaKind::Video),
            "jpg" => Some(MediaKind::StillImage),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::StillImage => "still_image",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dimensions, shape and face presence of a media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MediaInfo {
    pub width: u32,
    pub height: u32,
    pub shape: MediaShape,
    /// Whether any inspected image contained a face
    pub face_exist: bool,
    pub file_name: PathBuf,
}

impl MediaInfo {
    /// Build info for a `width` x `height` image, classifying its shape.
    pub fn new(file_name: impl Into<PathBuf>, width: u32, height: u32, face_exist: bool) -> Self {
        Self {
            width,
            height,
            shape: MediaShape::classify(width, height),
            face_exist,
            file_name: file_name.into(),
        }
    }
}
