//! Grid and sticker geometry
//!
//! Pure layout math, no drawing. All sizes derive from the base size
//! (the image's shorter dimension), which keeps the grid inside the
//! canvas for table scales up to 1. Offset fractions position the full
//! overlay bounding box between the near edge (0) and the far edge (1);
//! they are not clamped, so out-of-range values place the overlay partly
//! off-canvas.

use tapezier_types::{CalendarStyle, StickerStyle};

/// Divisor deriving the date font size from `base_size * table_scale`.
const FONT_SIZE_DIVISOR: f32 = 20.0;

/// Day-name and title sizes relative to the date font size.
const DAY_NAME_FONT_FACTOR: f32 = 0.9;
const TITLE_FONT_FACTOR: f32 = 1.1;

/// An axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoxRect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Derived cell, margin, and font sizes for one canvas/style pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub base_size: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub day_name_font_size: f32,
    pub title_font_size: f32,
    pub corner_radius: f32,
}

impl GridGeometry {
    pub fn new(canvas_width: u32, canvas_height: u32, style: &CalendarStyle) -> Self {
        let base_size = canvas_width.min(canvas_height) as f32;
        let scale = style.table_scale;
        let font_size = base_size * scale / FONT_SIZE_DIVISOR * style.font_scale;

        Self {
            base_size,
            cell_width: base_size / 7.0 * scale,
            cell_height: base_size / 8.0 * scale,
            margin: 0.02 * base_size * scale,
            font_size,
            day_name_font_size: font_size * DAY_NAME_FONT_FACTOR,
            title_font_size: font_size * TITLE_FONT_FACTOR,
            corner_radius: style.curvature * base_size / 100.0,
        }
    }

    /// Bounding rectangle of the background box: seven cell columns plus
    /// side margins, a title band, a day-name row, and `rows` week rows.
    pub fn box_rect(
        &self,
        canvas_width: u32,
        canvas_height: u32,
        rows: usize,
        title_height: f32,
        x_offset: f32,
        y_offset: f32,
    ) -> BoxRect {
        let width = 7.0 * self.cell_width + 2.0 * self.margin;
        let height = (rows as f32 + 1.0) * self.cell_height + 2.0 * self.margin + title_height;
        BoxRect {
            x: x_offset * (canvas_width as f32 - width),
            y: y_offset * (canvas_height as f32 - height),
            width,
            height,
        }
    }

    /// Top-left anchor of the title band inside the box.
    pub fn title_band(&self, box_rect: &BoxRect) -> (f32, f32, f32) {
        (
            box_rect.x + self.margin,
            box_rect.y + self.margin,
            7.0 * self.cell_width,
        )
    }

    /// Cell rectangle for `column` (0..7) and `row`, where row 0 is the
    /// day-name header and rows 1.. are the weeks.
    pub fn cell_rect(
        &self,
        box_rect: &BoxRect,
        title_height: f32,
        column: usize,
        row: usize,
    ) -> BoxRect {
        BoxRect {
            x: box_rect.x + self.margin + column as f32 * self.cell_width,
            y: box_rect.y + title_height + 2.0 * self.margin + row as f32 * self.cell_height,
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

/// Placement of a resized sticker on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickerLayout {
    pub width: u32,
    pub height: u32,
    pub x: i64,
    pub y: i64,
}

/// Resize-and-place geometry for a sticker: width is a fraction of the
/// canvas width, height preserves the sticker's aspect ratio, and the
/// position uses the same offset formula as the calendar box.
pub fn sticker_layout(
    canvas_width: u32,
    canvas_height: u32,
    sticker_width: u32,
    sticker_height: u32,
    style: &StickerStyle,
) -> StickerLayout {
    let width = ((canvas_width as f32 * style.scale) as u32).max(1);
    let height = ((sticker_height as f32 * (width as f32 / sticker_width as f32)) as u32).max(1);

    StickerLayout {
        width,
        height,
        x: (style.x_offset * (canvas_width as f32 - width as f32)) as i64,
        y: (style.y_offset * (canvas_height as f32 - height as f32)) as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(table_scale: f32, x_offset: f32, y_offset: f32) -> CalendarStyle {
        CalendarStyle {
            table_scale,
            x_offset,
            y_offset,
            ..CalendarStyle::default()
        }
    }

    #[test]
    fn sizes_derive_from_shorter_dimension() {
        let geometry = GridGeometry::new(1920, 1080, &style(1.0, 0.5, 0.5));
        assert!((geometry.base_size - 1080.0).abs() < f32::EPSILON);
        assert!((geometry.cell_width - 1080.0 / 7.0).abs() < 0.001);
        assert!((geometry.cell_height - 135.0).abs() < 0.001);
        assert!((geometry.margin - 21.6).abs() < 0.001);
        assert!((geometry.font_size - 54.0).abs() < 0.001);
    }

    #[test]
    fn table_scale_shrinks_everything_linearly() {
        let full = GridGeometry::new(1000, 1000, &style(1.0, 0.5, 0.5));
        let half = GridGeometry::new(1000, 1000, &style(0.5, 0.5, 0.5));
        assert!((half.cell_width - full.cell_width / 2.0).abs() < 0.001);
        assert!((half.cell_height - full.cell_height / 2.0).abs() < 0.001);
        assert!((half.margin - full.margin / 2.0).abs() < 0.001);
        assert!((half.font_size - full.font_size / 2.0).abs() < 0.001);
    }

    #[test]
    fn grid_fits_canvas_at_full_scale() {
        let geometry = GridGeometry::new(1920, 1080, &style(1.0, 0.5, 0.5));
        // Six week rows is the worst case
        let rect = geometry.box_rect(1920, 1080, 6, geometry.title_font_size, 0.5, 0.5);
        assert!(rect.width <= 1920.0);
        assert!(rect.height <= 1080.0);
    }

    #[test]
    fn half_offset_centers_the_box() {
        let geometry = GridGeometry::new(1920, 1080, &style(0.8, 0.5, 0.5));
        let rect = geometry.box_rect(1920, 1080, 5, 40.0, 0.5, 0.5);
        let (cx, cy) = rect.center();
        assert!((cx - 960.0).abs() < 0.5);
        assert!((cy - 540.0).abs() < 0.5);
    }

    #[test]
    fn extreme_offsets_touch_the_edges() {
        let geometry = GridGeometry::new(1600, 1200, &style(0.6, 0.0, 1.0));
        let rect = geometry.box_rect(1600, 1200, 5, 30.0, 0.0, 1.0);
        assert!(rect.x.abs() < 0.001);
        assert!((rect.y + rect.height - 1200.0).abs() < 0.001);
    }

    #[test]
    fn offsets_are_not_clamped() {
        let geometry = GridGeometry::new(1000, 1000, &style(0.5, 1.5, -0.25));
        let rect = geometry.box_rect(1000, 1000, 5, 20.0, 1.5, -0.25);
        assert!(rect.x + rect.width > 1000.0, "overflows the right edge");
        assert!(rect.y < 0.0, "overflows the top edge");
    }

    #[test]
    fn cells_tile_the_content_area() {
        let geometry = GridGeometry::new(1200, 900, &style(1.0, 0.5, 0.5));
        let title_height = 50.0;
        let rect = geometry.box_rect(1200, 900, 5, title_height, 0.5, 0.5);

        let first = geometry.cell_rect(&rect, title_height, 0, 0);
        assert!((first.x - (rect.x + geometry.margin)).abs() < 0.001);

        let next_col = geometry.cell_rect(&rect, title_height, 1, 0);
        assert!((next_col.x - first.x - geometry.cell_width).abs() < 0.001);

        let next_row = geometry.cell_rect(&rect, title_height, 0, 1);
        assert!((next_row.y - first.y - geometry.cell_height).abs() < 0.001);

        // Last column's right edge is one margin from the box edge
        let last = geometry.cell_rect(&rect, title_height, 6, 5);
        assert!((last.x + last.width - (rect.x + rect.width - geometry.margin)).abs() < 0.01);
        // Last row's bottom edge lands on the box bottom
        assert!((last.y + last.height - (rect.y + rect.height)).abs() < 0.01);
    }

    #[test]
    fn sticker_preserves_aspect_ratio() {
        let sticker = StickerStyle {
            scale: 0.25,
            x_offset: 0.5,
            y_offset: 0.5,
        };
        let layout = sticker_layout(2000, 1000, 400, 300, &sticker);
        assert_eq!(layout.width, 500);
        assert_eq!(layout.height, 375);
    }

    #[test]
    fn sticker_half_offset_centers_within_half_pixel() {
        let sticker = StickerStyle {
            scale: 0.1,
            x_offset: 0.5,
            y_offset: 0.5,
        };
        let layout = sticker_layout(1001, 601, 100, 100, &sticker);
        let cx = layout.x as f32 + layout.width as f32 / 2.0;
        let cy = layout.y as f32 + layout.height as f32 / 2.0;
        assert!((cx - 1001.0 / 2.0).abs() <= 0.5);
        assert!((cy - 601.0 / 2.0).abs() <= 0.5);
    }

    #[test]
    fn sticker_never_collapses_to_zero() {
        let sticker = StickerStyle {
            scale: 0.0001,
            x_offset: 0.0,
            y_offset: 0.0,
        };
        let layout = sticker_layout(100, 100, 4000, 50, &sticker);
        assert!(layout.width >= 1);
        assert!(layout.height >= 1);
    }
}
