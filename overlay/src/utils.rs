//! Small shared helpers for overlay rendering

use tapezier_types::Rgb;
use tiny_skia::Color;

/// Build a tiny-skia color from an RGB triple and a byte alpha
#[inline]
pub fn color_from_rgb(rgb: Rgb, alpha: u8) -> Color {
    Color::from_rgba8(rgb[0], rgb[1], rgb[2], alpha)
}

/// Opaque color from an RGB triple
#[inline]
pub fn opaque(rgb: Rgb) -> Color {
    color_from_rgb(rgb, 255)
}
