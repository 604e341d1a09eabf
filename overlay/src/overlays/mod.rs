//! Complete overlay implementations
//!
//! Each overlay kind takes a decoded wallpaper and produces a new
//! composited buffer; the source is never mutated. Both kinds place their
//! content with the same offset formula, so a frontend can share its
//! position sliders between them.

mod calendar;
mod sticker;

pub use calendar::CalendarOverlay;
pub use sticker::StickerOverlay;

use image::RgbaImage;
use tapezier_types::OutputNaming;

use crate::error::RenderError;
use crate::renderer::Renderer;

/// Unified interface the batch engine and preview path use for any
/// overlay kind.
pub trait Overlay {
    /// Produce a new image with the overlay composited onto `base`.
    fn apply(&self, renderer: &mut Renderer, base: &RgbaImage) -> Result<RgbaImage, RenderError>;

    /// The conventional output naming for this overlay kind.
    fn default_naming(&self) -> OutputNaming;
}
