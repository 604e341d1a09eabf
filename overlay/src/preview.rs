//! Preview rendering for an interactive frontend
//!
//! A preview session scans the input directory once, cycles through the
//! found images, and renders the current one downscaled to fit the
//! preview pane.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tapezier_core::directory::{DirectoryError, scan_images};

use crate::compositor;
use crate::error::RenderError;
use crate::overlays::Overlay;
use crate::renderer::Renderer;

/// Default preview pane bounds.
pub const DEFAULT_MAX_SIZE: (u32, u32) = (600, 800);

/// Cycles through the input directory's images for previewing
pub struct PreviewSession {
    images: Vec<PathBuf>,
    index: usize,
    max_size: (u32, u32),
}

impl PreviewSession {
    /// Scan `input_dir` and start at its first image.
    pub fn new(input_dir: &Path) -> Result<Self, DirectoryError> {
        Ok(Self {
            images: scan_images(input_dir)?,
            index: 0,
            max_size: DEFAULT_MAX_SIZE,
        })
    }

    pub fn with_max_size(mut self, width: u32, height: u32) -> Self {
        self.max_size = (width, height);
        self
    }

    /// The image the next render call will use.
    pub fn current(&self) -> &Path {
        &self.images[self.index]
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Advance to the next image, wrapping around at the end.
    pub fn advance(&mut self) -> &Path {
        self.index = (self.index + 1) % self.images.len();
        self.current()
    }

    /// Render the current image with `overlay` and scale the result down
    /// to fit the preview bounds.
    pub fn render<O: Overlay>(
        &self,
        renderer: &mut Renderer,
        overlay: &O,
    ) -> Result<RgbaImage, RenderError> {
        let base = compositor::load_rgba(self.current())?;
        let composited = overlay.apply(renderer, &base)?;
        Ok(fit_within(&composited, self.max_size.0, self.max_size.1))
    }
}

/// Downscale to fit inside `max_width` x `max_height`, preserving aspect
/// ratio. Images already inside the bounds are returned unscaled.
pub fn fit_within(img: &RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
    let (width, height) = img.dimensions();
    let ratio = (max_width as f32 / width as f32)
        .min(max_height as f32 / height as f32)
        .min(1.0);
    if ratio >= 1.0 {
        return img.clone();
    }
    let new_width = ((width as f32 * ratio) as u32).max(1);
    let new_height = ((height as f32 * ratio) as u32).max(1);
    imageops::resize(img, new_width, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn fit_within_only_downscales() {
        let small = RgbaImage::from_pixel(100, 50, Rgba([1, 2, 3, 255]));
        let out = fit_within(&small, 600, 800);
        assert_eq!(out.dimensions(), (100, 50));

        let large = RgbaImage::from_pixel(1200, 800, Rgba([1, 2, 3, 255]));
        let out = fit_within(&large, 600, 800);
        assert_eq!(out.dimensions(), (600, 400));
    }

    #[test]
    fn session_cycles_through_inputs_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.png", "b.png", "c.png"] {
            RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]))
                .save(dir.path().join(name))
                .unwrap();
        }

        let mut session = PreviewSession::new(dir.path()).unwrap();
        assert_eq!(session.image_count(), 3);
        assert_eq!(session.current().file_name().unwrap(), "a.png");
        assert_eq!(session.advance().file_name().unwrap(), "b.png");
        session.advance();
        assert_eq!(session.advance().file_name().unwrap(), "a.png", "wraps around");
    }

    #[test]
    fn empty_directory_fails_to_open_a_session() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PreviewSession::new(dir.path()).is_err());
    }
}
