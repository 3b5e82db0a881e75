//! Still image editor boundary and its `image`-crate implementation.

use async_trait::async_trait;
use image::imageops::FilterType;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use smartcrop_models::Rectangle;

/// Crop and resize operations on still images by path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Crop `rect` out of `src`, anchored at its top-left corner, into `dst`.
    async fn crop(&self, src: &Path, dst: &Path, rect: Rectangle) -> MediaResult<()>;

    /// Resize `src` to exactly `width` x `height` into `dst`.
    async fn resize(&self, src: &Path, dst: &Path, width: u32, height: u32) -> MediaResult<()>;

    /// Scale `src` to cover `width` x `height`, then crop the centre into `dst`.
    async fn resize_to_fill(&self, src: &Path, dst: &Path, width: u32, height: u32)
        -> MediaResult<()>;
}

/// Image editor running the `image` crate on the blocking pool.
#[derive(Debug, Clone)]
pub struct ImageCrateEditor {
    filter: FilterType,
}

impl Default for ImageCrateEditor {
    fn default() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }
}

impl ImageCrateEditor {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }

    async fn edit<F>(&self, src: &Path, dst: &Path, op: F) -> MediaResult<()>
    where
        F: FnOnce(DynamicImage) -> DynamicImage + Send + 'static,
    {
        let src: PathBuf = src.to_path_buf();
        let dst: PathBuf = dst.to_path_buf();

        tokio::task::spawn_blocking(move || -> MediaResult<()> {
            if !src.exists() {
                return Err(MediaError::FileNotFound(src));
            }
            let img = image::open(&src)?;
            op(img).save(&dst)?;
            debug!(src = %src.display(), dst = %dst.display(), "Image edit written");
            Ok(())
        })
        .await
        .map_err(|e| MediaError::internal(format!("image task failed: {}", e)))?
    }
}

#[async_trait]
impl ImageEditor for ImageCrateEditor {
    async fn crop(&self, src: &Path, dst: &Path, rect: Rectangle) -> MediaResult<()> {
        self.edit(src, dst, move |img| {
            let (x, y, width, height) = rect.to_pixels(img.width(), img.height());
            img.crop_imm(x, y, width, height)
        })
        .await
    }

    async fn resize(&self, src: &Path, dst: &Path, width: u32, height: u32) -> MediaResult<()> {
        let filter = self.filter;
        self.edit(src, dst, move |img| img.resize_exact(width, height, filter))
            .await
    }

    async fn resize_to_fill(
        &self,
        src: &Path,
        dst: &Path,
        width: u32,
        height: u32,
    ) -> MediaResult<()> {
        let filter = self.filter;
        self.edit(src, dst, move |img| img.resize_to_fill(width, height, filter))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};
    use tempfile::TempDir;

    /// 200x100 image: red left quarter, green middle half, blue right quarter.
    fn striped(path: &Path) {
        let img = RgbImage::from_fn(200, 100, |x, _| match x {
            0..=49 => Rgb([255, 0, 0]),
            50..=149 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        });
        img.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_crop_is_anchored_top_left() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("in.jpg");
        let dst = dir.path().join("out.jpg");
        striped(&src);

        ImageCrateEditor::default()
            .crop(&src, &dst, Rectangle::new(150.0, 0.0, 50.0, 100.0))
            .await
            .unwrap();

        let out = image::open(&dst).unwrap();
        assert_eq!(out.dimensions(), (50, 100));
        let px = out.get_pixel(25, 50);
        assert!(px[2] > 200 && px[0] < 60, "expected blue, got {:?}", px);
    }

    #[tokio::test]
    async fn test_resize_exact() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("in.jpg");
        striped(&src);

        ImageCrateEditor::default()
            .resize(&src, &src, 64, 36)
            .await
            .unwrap();

        assert_eq!(image::image_dimensions(&src).unwrap(), (64, 36));
    }

    #[tokio::test]
    async fn test_resize_to_fill_keeps_centre() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("in.jpg");
        let dst = dir.path().join("out.jpg");
        striped(&src);

        ImageCrateEditor::default()
            .resize_to_fill(&src, &dst, 50, 50)
            .await
            .unwrap();

        let out = image::open(&dst).unwrap();
        assert_eq!(out.dimensions(), (50, 50));
        for x in [5, 25, 45] {
            let px = out.get_pixel(x, 25);
            assert!(px[1] > 180 && px[0] < 80 && px[2] < 80, "expected green, got {:?}", px);
        }
    }

    #[tokio::test]
    async fn test_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = ImageCrateEditor::default()
            .resize(&dir.path().join("nope.jpg"), &dir.path().join("out.jpg"), 10, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }
}
