//! Sticker overlay
//!
//! Resizes a sticker image relative to the wallpaper width (aspect ratio
//! preserved, Lanczos3 resampling) and alpha-composites it at the shared
//! offset placement.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tapezier_types::{OutputNaming, StickerStyle};

use super::Overlay;
use crate::compositor;
use crate::error::RenderError;
use crate::layout::sticker_layout;
use crate::renderer::Renderer;

/// A sticker overlay for one sticker image and placement snapshot
#[derive(Debug, Clone)]
pub struct StickerOverlay {
    sticker: RgbaImage,
    pub style: StickerStyle,
}

impl StickerOverlay {
    pub fn new(sticker: RgbaImage, style: StickerStyle) -> Result<Self, RenderError> {
        if sticker.width() == 0 || sticker.height() == 0 {
            return Err(RenderError::EmptySticker);
        }
        Ok(Self { sticker, style })
    }

    /// Composite the sticker onto `base`, returning a new image.
    pub fn render(&self, base: &RgbaImage) -> Result<RgbaImage, RenderError> {
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage);
        }

        let layout = sticker_layout(
            width,
            height,
            self.sticker.width(),
            self.sticker.height(),
            &self.style,
        );

        let resized = if layout.width == self.sticker.width()
            && layout.height == self.sticker.height()
        {
            self.sticker.clone()
        } else {
            imageops::resize(&self.sticker, layout.width, layout.height, FilterType::Lanczos3)
        };

        Ok(compositor::overlay_at(base, &resized, layout.x, layout.y))
    }
}

impl Overlay for StickerOverlay {
    fn apply(&self, _renderer: &mut Renderer, base: &RgbaImage) -> Result<RgbaImage, RenderError> {
        self.render(base)
    }

    fn default_naming(&self) -> OutputNaming {
        OutputNaming::Original
    }
}
