//! Software renderer using tiny-skia and cosmic-text
//!
//! All drawing happens on the CPU into a plain RGBA layer buffer
//! (premultiplied, as tiny-skia stores pixels). The calendar overlay draws
//! its box and glyphs here, then the compositor blends the finished layer
//! over the source wallpaper.
#![allow(clippy::too_many_arguments)]
use std::collections::HashMap;

use cosmic_text::{
    Buffer, Color as CosmicColor, FontSystem, LayoutGlyph, Metrics, Shaping, SwashCache,
};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, PixmapMut, Transform};

use crate::font::FontSpec;

/// Maximum entries in the text shaping cache (LRU eviction when exceeded)
const TEXT_CACHE_MAX_ENTRIES: usize = 512;

/// Outline thickness for hollow text, in glyph raster pixels.
const HOLLOW_STROKE_WIDTH: i32 = 2;

/// Ink bounding box of a shaped text run, relative to the position passed
/// to [`Renderer::draw_text`]. This is the union of glyph bitmap boxes,
/// not the advance width, so centering math lands on what is actually
/// visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Cached result of text shaping
struct CachedText {
    /// Pre-shaped glyphs ready for rendering
    glyphs: Vec<LayoutGlyph>,
    /// Baseline offset of the (single) layout line
    line_y: f32,
    /// Ink extents, `None` for whitespace-only text or when no font
    /// resolved any glyph
    ink: Option<InkRect>,
    /// LRU tracking: incremented on each access
    last_used: u64,
}

/// Key for the text cache: content, font size in tenths, and font attrs
type TextCacheKey = (String, u32, FontSpec);

/// A software renderer for overlay layers
pub struct Renderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    /// Cache of shaped text to avoid re-shaping across preview ticks and
    /// batch items
    text_cache: HashMap<TextCacheKey, CachedText>,
    /// Counter for LRU tracking
    cache_access_counter: u64,
}

impl Renderer {
    /// Create a renderer backed by the system font catalog.
    pub fn new() -> Self {
        Self::from_font_system(FontSystem::new())
    }

    /// Create a renderer over an explicit font database. Lets callers and
    /// tests control exactly which fonts exist.
    pub fn with_font_db(db: fontdb::Database) -> Self {
        Self::from_font_system(FontSystem::new_with_locale_and_db("en-US".into(), db))
    }

    fn from_font_system(font_system: FontSystem) -> Self {
        Self {
            font_system,
            swash_cache: SwashCache::new(),
            text_cache: HashMap::with_capacity(256),
            cache_access_counter: 0,
        }
    }

    /// The font catalog used for resolution and listings.
    pub fn font_db(&self) -> &fontdb::Database {
        self.font_system.db()
    }

    /// Create a new transparent layer buffer (premultiplied RGBA)
    pub fn create_layer(width: u32, height: u32) -> Vec<u8> {
        vec![0u8; (width * height * 4) as usize]
    }

    // ─────────────────────────────────────────────────────────────────────
    // Shaping cache
    // ─────────────────────────────────────────────────────────────────────

    /// Evict least recently used entries if the cache is too large
    fn evict_lru_if_needed(&mut self) {
        if self.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES {
            return;
        }

        let target_size = TEXT_CACHE_MAX_ENTRIES * 3 / 4;
        let mut entries: Vec<_> = self
            .text_cache
            .iter()
            .map(|(k, v)| (k.clone(), v.last_used))
            .collect();
        entries.sort_by_key(|(_, last_used)| *last_used);

        for (key, _) in entries
            .into_iter()
            .take(self.text_cache.len() - target_size)
        {
            self.text_cache.remove(&key);
        }
    }

    fn find_cached(&mut self, text: &str, size_key: u32, font: &FontSpec) -> Option<&mut CachedText> {
        // Linear search avoids a String allocation on hit; one render call
        // touches well under a hundred unique strings
        self.text_cache
            .iter_mut()
            .find(|(k, _)| k.1 == size_key && k.0 == text && k.2 == *font)
            .map(|(_, v)| v)
    }

    /// Ensure text is cached, shaping and measuring if needed.
    fn ensure_cached(&mut self, text: &str, font: &FontSpec, font_size: f32) {
        let size_key = (font_size * 10.0).round() as u32;

        self.cache_access_counter += 1;
        let current_access = self.cache_access_counter;

        if let Some(cached) = self.find_cached(text, size_key, font) {
            cached.last_used = current_access;
            return;
        }

        // Cache miss: shape the text
        let metrics = Metrics::new(font_size, font_size * 1.2);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);

        let attrs = font.attrs();
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut line_y = 0.0f32;
        for run in text_buffer.layout_runs() {
            line_y = run.line_y;
            for glyph in run.glyphs.iter() {
                glyphs.push(glyph.clone());
            }
        }

        // Measure ink extents from the rasterized glyph placements at the
        // layout origin. Draw positions are rounded to whole pixels, so
        // the same subpixel bin applies at draw time.
        let mut ink: Option<(i32, i32, i32, i32)> = None;
        let baseline = line_y.round() as i32;
        for glyph in &glyphs {
            let physical = glyph.physical((0.0, 0.0), 1.0);
            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical.cache_key)
            {
                if image.placement.width == 0 || image.placement.height == 0 {
                    continue;
                }
                let x0 = physical.x + image.placement.left;
                let y0 = baseline + physical.y - image.placement.top;
                let x1 = x0 + image.placement.width as i32;
                let y1 = y0 + image.placement.height as i32;
                ink = Some(match ink {
                    None => (x0, y0, x1, y1),
                    Some((ax0, ay0, ax1, ay1)) => {
                        (ax0.min(x0), ay0.min(y0), ax1.max(x1), ay1.max(y1))
                    }
                });
            }
        }

        let cached = CachedText {
            glyphs,
            line_y,
            ink: ink.map(|(x0, y0, x1, y1)| InkRect {
                left: x0,
                top: y0,
                width: x1 - x0,
                height: y1 - y0,
            }),
            last_used: current_access,
        };

        self.text_cache.insert((text.to_string(), size_key, font.clone()), cached);
        self.evict_lru_if_needed();
    }

    /// Ink extents for `text`, or `None` when nothing would be inked
    /// (empty text, whitespace, or no usable font).
    pub fn measure_ink(&mut self, text: &str, font: &FontSpec, font_size: f32) -> Option<InkRect> {
        self.ensure_cached(text, font, font_size);
        let size_key = (font_size * 10.0).round() as u32;
        self.find_cached(text, size_key, font).and_then(|c| c.ink)
    }

    fn cached_glyphs(&mut self, text: &str, font: &FontSpec, font_size: f32) -> (Vec<LayoutGlyph>, f32) {
        let size_key = (font_size * 10.0).round() as u32;
        self.find_cached(text, size_key, font)
            .map(|c| (c.glyphs.clone(), c.line_y))
            .unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────

    /// Draw a filled rounded rectangle into the layer
    pub fn fill_rounded_rect(
        &self,
        layer: &mut [u8],
        layer_width: u32,
        layer_height: u32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        color: Color,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(layer, layer_width, layer_height) else {
            return;
        };

        let Some(path) = create_rounded_rect_path(x, y, width, height, radius) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;

        pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    /// Draw filled text with its layout origin at `(x, y)`.
    ///
    /// Positions are rounded to whole pixels so cached glyph placements
    /// stay valid. Use [`Renderer::measure_ink`] to derive the origin that
    /// centers the ink box in a cell.
    pub fn draw_text(
        &mut self,
        layer: &mut [u8],
        layer_width: u32,
        layer_height: u32,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        font_size: f32,
        color: Color,
    ) {
        self.draw_text_impl(
            layer,
            layer_width,
            layer_height,
            text,
            x,
            y,
            font,
            font_size,
            color,
            false,
        );
    }

    /// Draw outline-only ("hollow") text: a fixed-width stroke around each
    /// glyph with no fill.
    pub fn draw_text_hollow(
        &mut self,
        layer: &mut [u8],
        layer_width: u32,
        layer_height: u32,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        font_size: f32,
        color: Color,
    ) {
        self.draw_text_impl(
            layer,
            layer_width,
            layer_height,
            text,
            x,
            y,
            font,
            font_size,
            color,
            true,
        );
    }

    fn draw_text_impl(
        &mut self,
        layer: &mut [u8],
        layer_width: u32,
        layer_height: u32,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        font_size: f32,
        color: Color,
        hollow: bool,
    ) {
        let Some(mut pixmap) = PixmapMut::from_bytes(layer, layer_width, layer_height) else {
            return;
        };

        self.ensure_cached(text, font, font_size);
        // Clone keeps the borrow checker happy: swash_cache needs &mut self
        let (glyphs, line_y) = self.cached_glyphs(text, font, font_size);
        let baseline = line_y.round() as i32;

        let text_color = CosmicColor::rgba(
            (color.red() * 255.0) as u8,
            (color.green() * 255.0) as u8,
            (color.blue() * 255.0) as u8,
            (color.alpha() * 255.0) as u8,
        );

        for glyph in &glyphs {
            let physical = glyph.physical((x.round(), y.round()), 1.0);

            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical.cache_key)
            {
                let glyph_x = physical.x + image.placement.left;
                let glyph_y = baseline + physical.y - image.placement.top;

                if hollow {
                    let (mask, mask_width, mask_height) = outline_mask(
                        &image.data,
                        image.placement.width,
                        image.placement.height,
                        HOLLOW_STROKE_WIDTH,
                    );
                    blend_mask_to_pixmap(
                        &mut pixmap,
                        &mask,
                        mask_width,
                        mask_height,
                        glyph_x - HOLLOW_STROKE_WIDTH,
                        glyph_y - HOLLOW_STROKE_WIDTH,
                        text_color,
                    );
                } else {
                    blend_mask_to_pixmap(
                        &mut pixmap,
                        &image.data,
                        image.placement.width,
                        image.placement.height,
                        glyph_x,
                        glyph_y,
                        text_color,
                    );
                }
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a rounded rectangle path. The radius is limited to half the
/// rectangle extents.
fn create_rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let r = r.max(0.0).min(w / 2.0).min(h / 2.0);

    let mut pb = PathBuilder::new();

    pb.move_to(x + r, y);

    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);

    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);

    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);

    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);

    pb.close();
    pb.finish()
}

/// Expand a glyph alpha mask into its outline: dilate by `radius` and
/// subtract the original coverage. The result is `2 * radius` wider and
/// taller than the input.
fn outline_mask(data: &[u8], width: u32, height: u32, radius: i32) -> (Vec<u8>, u32, u32) {
    let out_width = width + 2 * radius as u32;
    let out_height = height + 2 * radius as u32;
    let mut out = vec![0u8; (out_width * out_height) as usize];

    let sample = |x: i32, y: i32| -> u8 {
        if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
            0
        } else {
            data[(y as u32 * width + x as u32) as usize]
        }
    };

    for oy in 0..out_height as i32 {
        for ox in 0..out_width as i32 {
            let cx = ox - radius;
            let cy = oy - radius;

            let mut dilated = 0u8;
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy > radius * radius {
                        continue;
                    }
                    dilated = dilated.max(sample(cx + dx, cy + dy));
                    if dilated == 255 {
                        break;
                    }
                }
                if dilated == 255 {
                    break;
                }
            }

            out[(oy as u32 * out_width + ox as u32) as usize] =
                dilated.saturating_sub(sample(cx, cy));
        }
    }

    (out, out_width, out_height)
}

/// Blend an alpha mask onto the layer with premultiplied-over arithmetic
fn blend_mask_to_pixmap(
    pixmap: &mut PixmapMut,
    mask: &[u8],
    mask_width: u32,
    mask_height: u32,
    dest_x: i32,
    dest_y: i32,
    color: CosmicColor,
) {
    let pixmap_width = pixmap.width() as i32;
    let pixmap_height = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for my in 0..mask_height as i32 {
        let py = dest_y + my;
        if py < 0 || py >= pixmap_height {
            continue;
        }

        for mx in 0..mask_width as i32 {
            let px = dest_x + mx;
            if px < 0 || px >= pixmap_width {
                continue;
            }

            let mask_idx = (my as u32 * mask_width + mx as u32) as usize;
            if mask_idx >= mask.len() {
                continue;
            }

            let coverage = mask[mask_idx];
            if coverage == 0 {
                continue;
            }

            let pixel_idx = ((py as u32 * pixmap_width as u32 + px as u32) * 4) as usize;
            if pixel_idx + 3 >= data.len() {
                continue;
            }

            let src_a = (coverage as u32 * color.a() as u32) / 255;
            let inv_a = 255 - src_a;

            data[pixel_idx] =
                ((color.r() as u32 * src_a + data[pixel_idx] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 1] =
                ((color.g() as u32 * src_a + data[pixel_idx + 1] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 2] =
                ((color.b() as u32 * src_a + data[pixel_idx + 2] as u32 * inv_a) / 255) as u8;
            data[pixel_idx + 3] = (src_a + (data[pixel_idx + 3] as u32 * inv_a) / 255) as u8;
        }
    }
}
