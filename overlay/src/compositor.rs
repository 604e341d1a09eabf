//! Base-image loading, compositing, and encoding
//!
//! Sources decode to RGBA regardless of input format. Overlays are blended
//! in a single straight-alpha "over" pass; pixels the overlay does not
//! cover come out bit-identical to the source. Destinations with an opaque
//! extension (jpg/jpeg) have the alpha channel dropped before encoding.

use std::path::Path;

use image::{RgbImage, RgbaImage};
use tapezier_core::directory::wants_opaque;

use crate::error::RenderError;

/// Decode a source image into an RGBA buffer.
pub fn load_rgba(path: &Path) -> Result<RgbaImage, RenderError> {
    image::open(path)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|source| RenderError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

/// Blend a finished overlay layer (premultiplied RGBA, as the renderer
/// produces) over the base image. Returns a new buffer; the base is never
/// mutated.
pub fn composite_layer(base: &RgbaImage, layer: &[u8]) -> RgbaImage {
    debug_assert_eq!(layer.len(), (base.width() * base.height() * 4) as usize);
    let mut out = base.clone();

    for (i, pixel) in out.pixels_mut().enumerate() {
        let idx = i * 4;
        let la = layer[idx + 3] as u32;
        if la == 0 {
            continue;
        }

        // Demultiply the layer pixel back to straight alpha
        let lr = ((layer[idx] as u32 * 255 + la / 2) / la).min(255);
        let lg = ((layer[idx + 1] as u32 * 255 + la / 2) / la).min(255);
        let lb = ((layer[idx + 2] as u32 * 255 + la / 2) / la).min(255);

        let inv = 255 - la;
        pixel.0 = [
            ((lr * la + pixel.0[0] as u32 * inv) / 255) as u8,
            ((lg * la + pixel.0[1] as u32 * inv) / 255) as u8,
            ((lb * la + pixel.0[2] as u32 * inv) / 255) as u8,
            (la + pixel.0[3] as u32 * inv / 255) as u8,
        ];
    }

    out
}

/// Blend a straight-alpha RGBA overlay onto the base at `(x, y)`,
/// clipping whatever falls outside the canvas.
pub fn overlay_at(base: &RgbaImage, overlay: &RgbaImage, x: i64, y: i64) -> RgbaImage {
    let mut out = base.clone();
    let (base_width, base_height) = (base.width() as i64, base.height() as i64);

    for (ox, oy, src) in overlay.enumerate_pixels() {
        let px = x + ox as i64;
        let py = y + oy as i64;
        if px < 0 || py < 0 || px >= base_width || py >= base_height {
            continue;
        }

        let sa = src.0[3] as u32;
        if sa == 0 {
            continue;
        }

        let dst = out.get_pixel_mut(px as u32, py as u32);
        let inv = 255 - sa;
        dst.0 = [
            ((src.0[0] as u32 * sa + dst.0[0] as u32 * inv) / 255) as u8,
            ((src.0[1] as u32 * sa + dst.0[1] as u32 * inv) / 255) as u8,
            ((src.0[2] as u32 * sa + dst.0[2] as u32 * inv) / 255) as u8,
            (sa + dst.0[3] as u32 * inv / 255) as u8,
        ];
    }

    out
}

/// Drop the alpha channel, keeping RGB values as they are.
pub fn flatten_to_rgb(img: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        image::Rgb([p.0[0], p.0[1], p.0[2]])
    })
}

/// Encode to `path`, flattening to RGB when the extension implies an
/// opaque format.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<(), RenderError> {
    let encode_err = |source| RenderError::Encode {
        path: path.to_path_buf(),
        source,
    };

    if wants_opaque(path) {
        flatten_to_rgb(img).save(path).map_err(encode_err)
    } else {
        img.save(path).map_err(encode_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn empty_layer_leaves_base_untouched() {
        let base = solid(8, 8, [12, 34, 56, 255]);
        let layer = vec![0u8; 8 * 8 * 4];
        let out = composite_layer(&base, &layer);
        assert_eq!(out, base);
    }

    #[test]
    fn opaque_layer_pixel_fully_occludes() {
        let base = solid(2, 1, [10, 20, 30, 255]);
        // One opaque red pixel at (0,0), premultiplied == straight at a=255
        let mut layer = vec![0u8; 2 * 4];
        layer[..4].copy_from_slice(&[200, 0, 0, 255]);

        let out = composite_layer(&base, &layer);
        assert_eq!(out.get_pixel(0, 0).0, [200, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn overlay_at_clips_out_of_canvas_regions() {
        let base = solid(4, 4, [0, 0, 0, 255]);
        let sticker = solid(3, 3, [255, 255, 255, 255]);

        let out = overlay_at(&base, &sticker, -2, -2);
        // Only the sticker's bottom-right 1x1 corner lands on the canvas
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(0, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn transparent_sticker_pixels_pass_through() {
        let base = solid(2, 2, [9, 9, 9, 255]);
        let sticker = solid(2, 2, [255, 0, 0, 0]);
        let out = overlay_at(&base, &sticker, 0, 0);
        assert_eq!(out, base);
    }

    #[test]
    fn flatten_drops_alpha_verbatim() {
        let img = solid(2, 2, [1, 2, 3, 77]);
        let rgb = flatten_to_rgb(&img);
        assert_eq!(rgb.get_pixel(0, 0).0, [1, 2, 3]);
    }

    #[test]
    fn save_respects_extension() {
        let dir = tempfile::tempdir().unwrap();
        let img = solid(4, 4, [100, 150, 200, 255]);

        let png_path = dir.path().join("out.png");
        save_image(&img, &png_path).unwrap();
        let reloaded = image::open(&png_path).unwrap();
        assert_eq!(reloaded.color(), image::ColorType::Rgba8);

        let jpg_path = dir.path().join("out.jpg");
        save_image(&img, &jpg_path).unwrap();
        let reloaded = image::open(&jpg_path).unwrap();
        assert_eq!(reloaded.color(), image::ColorType::Rgb8);
    }
}
