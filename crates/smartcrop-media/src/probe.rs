//! Still image information.

use std::path::Path;

use crate::error::{MediaError, MediaResult};

/// Read an image's `(width, height)` from its header.
pub fn image_dimensions(path: impl AsRef<Path>) -> MediaResult<(u32, u32)> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    Ok(image::image_dimensions(path)?)
}
