//! Calendar grid overlay
//!
//! Draws a month grid onto its own transparent layer (rounded background
//! box, month title, day-name header, date cells) and composites that
//! layer over the wallpaper in one pass.
#![allow(clippy::too_many_arguments)]
use image::RgbaImage;
use tapezier_core::calendar::{DAY_NAMES, MonthGrid, is_holiday_column};
use tapezier_types::{CalendarStyle, OutputNaming, Rgb};
use tiny_skia::Color;

use super::Overlay;
use crate::compositor;
use crate::error::RenderError;
use crate::font::{self, FontSpec};
use crate::layout::{BoxRect, GridGeometry};
use crate::renderer::Renderer;
use crate::utils::{color_from_rgb, opaque};

/// A calendar overlay for one month and style snapshot
#[derive(Debug, Clone)]
pub struct CalendarOverlay {
    pub year: i32,
    pub month: u32,
    pub style: CalendarStyle,
}

impl CalendarOverlay {
    pub fn new(year: i32, month: u32, style: CalendarStyle) -> Self {
        Self { year, month, style }
    }

    /// Render the calendar onto `base`, returning the composited image.
    pub fn render(
        &self,
        renderer: &mut Renderer,
        base: &RgbaImage,
    ) -> Result<RgbaImage, RenderError> {
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage);
        }

        let grid = MonthGrid::new(self.year, self.month)?;
        let geometry = GridGeometry::new(width, height, &self.style);

        let resolution = font::resolve(
            renderer.font_db(),
            &self.style.font_family,
            self.style.bold,
            self.style.italic,
        );
        if !resolution.matched {
            tracing::warn!(
                family = %self.style.font_family,
                "requested font not installed, using default"
            );
        }
        let font = resolution.spec;

        // The title band height comes from the title's actual ink so the
        // box wraps the content tightly; fall back to the nominal font
        // size when nothing can be measured (e.g. no fonts installed).
        let title = grid.title();
        let title_height = renderer
            .measure_ink(&title, &font, geometry.title_font_size)
            .map(|ink| ink.height as f32)
            .unwrap_or(geometry.title_font_size);

        let box_rect = geometry.box_rect(
            width,
            height,
            grid.week_count(),
            title_height,
            self.style.x_offset,
            self.style.y_offset,
        );

        let mut layer = Renderer::create_layer(width, height);

        let alpha = self.style.box_opacity.to_alpha();
        if alpha > 0 {
            renderer.fill_rounded_rect(
                &mut layer,
                width,
                height,
                box_rect.x,
                box_rect.y,
                box_rect.width,
                box_rect.height,
                geometry.corner_radius,
                color_from_rgb(self.style.box_color, alpha),
            );
        }

        self.draw_title(renderer, &mut layer, width, height, &geometry, &box_rect, &font, &title);
        self.draw_day_names(renderer, &mut layer, width, height, &geometry, &box_rect, title_height, &font);
        self.draw_dates(renderer, &mut layer, width, height, &geometry, &box_rect, title_height, &font, &grid);

        Ok(compositor::composite_layer(base, &layer))
    }

    fn draw_title(
        &self,
        renderer: &mut Renderer,
        layer: &mut [u8],
        width: u32,
        height: u32,
        geometry: &GridGeometry,
        box_rect: &BoxRect,
        font: &FontSpec,
        title: &str,
    ) {
        let Some(ink) = renderer.measure_ink(title, font, geometry.title_font_size) else {
            return;
        };
        let (band_x, band_y, band_width) = geometry.title_band(box_rect);
        let x = band_x + (band_width - ink.width as f32) / 2.0 - ink.left as f32;
        let y = band_y - ink.top as f32;
        self.draw(
            renderer,
            layer,
            width,
            height,
            title,
            x,
            y,
            font,
            geometry.title_font_size,
            opaque(self.style.title_color),
        );
    }

    fn draw_day_names(
        &self,
        renderer: &mut Renderer,
        layer: &mut [u8],
        width: u32,
        height: u32,
        geometry: &GridGeometry,
        box_rect: &BoxRect,
        title_height: f32,
        font: &FontSpec,
    ) {
        for (column, name) in DAY_NAMES.iter().enumerate() {
            let cell = geometry.cell_rect(box_rect, title_height, column, 0);
            self.draw_centered(
                renderer,
                layer,
                width,
                height,
                name,
                &cell,
                font,
                geometry.day_name_font_size,
                self.style.day_name_color,
            );
        }
    }

    fn draw_dates(
        &self,
        renderer: &mut Renderer,
        layer: &mut [u8],
        width: u32,
        height: u32,
        geometry: &GridGeometry,
        box_rect: &BoxRect,
        title_height: f32,
        font: &FontSpec,
        grid: &MonthGrid,
    ) {
        for (week_index, week) in grid.weeks().iter().enumerate() {
            for (column, &day) in week.iter().enumerate() {
                if day == 0 {
                    continue;
                }
                let cell = geometry.cell_rect(box_rect, title_height, column, week_index + 1);
                let color = if is_holiday_column(column) {
                    self.style.holiday_color
                } else {
                    self.style.weekday_color
                };
                self.draw_centered(
                    renderer,
                    layer,
                    width,
                    height,
                    &day.to_string(),
                    &cell,
                    font,
                    geometry.font_size,
                    color,
                );
            }
        }
    }

    /// Center text's ink box within a cell and draw it.
    fn draw_centered(
        &self,
        renderer: &mut Renderer,
        layer: &mut [u8],
        width: u32,
        height: u32,
        text: &str,
        cell: &BoxRect,
        font: &FontSpec,
        font_size: f32,
        color: Rgb,
    ) {
        let Some(ink) = renderer.measure_ink(text, font, font_size) else {
            return;
        };
        let x = cell.x + (cell.width - ink.width as f32) / 2.0 - ink.left as f32;
        let y = cell.y + (cell.height - ink.height as f32) / 2.0 - ink.top as f32;
        self.draw(renderer, layer, width, height, text, x, y, font, font_size, opaque(color));
    }

    fn draw(
        &self,
        renderer: &mut Renderer,
        layer: &mut [u8],
        width: u32,
        height: u32,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        font_size: f32,
        color: Color,
    ) {
        if self.style.hollow {
            renderer.draw_text_hollow(layer, width, height, text, x, y, font, font_size, color);
        } else {
            renderer.draw_text(layer, width, height, text, x, y, font, font_size, color);
        }
    }
}

impl Overlay for CalendarOverlay {
    fn apply(&self, renderer: &mut Renderer, base: &RgbaImage) -> Result<RgbaImage, RenderError> {
        self.render(renderer, base)
    }

    fn default_naming(&self) -> OutputNaming {
        OutputNaming::Prefixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tapezier_types::BoxOpacity;

    fn base(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 255]))
    }

    /// A renderer with an empty catalog draws no text, which isolates the
    /// box-compositing behavior from the host's installed fonts.
    fn fontless_renderer() -> Renderer {
        Renderer::with_font_db(fontdb::Database::new())
    }

    fn style_with_opacity(opacity: BoxOpacity) -> CalendarStyle {
        CalendarStyle {
            box_opacity: opacity,
            box_color: [200, 10, 10],
            curvature: 5.0,
            ..CalendarStyle::default()
        }
    }

    #[test]
    fn transparent_box_leaves_every_pixel_untouched() {
        let mut renderer = fontless_renderer();
        let source = base(200, 160);
        let overlay =
            CalendarOverlay::new(2024, 2, style_with_opacity(BoxOpacity::Fraction(0.0)));
        let out = overlay.render(&mut renderer, &source).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn opaque_box_fully_occludes_its_center() {
        let mut renderer = fontless_renderer();
        let source = base(200, 160);
        let overlay =
            CalendarOverlay::new(2024, 2, style_with_opacity(BoxOpacity::Fraction(1.0)));
        let out = overlay.render(&mut renderer, &source).unwrap();

        // Center of a centered box is deep inside it
        assert_eq!(out.get_pixel(100, 80).0, [200, 10, 10, 255]);
        // Far corner is outside the box and untouched
        assert_eq!(out.get_pixel(1, 1).0, [40, 80, 120, 255]);
    }

    #[test]
    fn byte_alpha_convention_matches_fraction() {
        let mut renderer = fontless_renderer();
        let source = base(120, 120);
        let by_fraction =
            CalendarOverlay::new(2025, 6, style_with_opacity(BoxOpacity::Fraction(0.5)))
                .render(&mut renderer, &source)
                .unwrap();
        let by_byte = CalendarOverlay::new(2025, 6, style_with_opacity(BoxOpacity::Byte(128)))
            .render(&mut renderer, &source)
            .unwrap();
        assert_eq!(by_fraction, by_byte);
    }

    #[test]
    fn invalid_month_is_a_calendar_error() {
        let mut renderer = fontless_renderer();
        let overlay = CalendarOverlay::new(2024, 13, CalendarStyle::default());
        assert!(matches!(
            overlay.render(&mut renderer, &base(50, 50)),
            Err(RenderError::Calendar(_))
        ));
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let mut renderer = fontless_renderer();
        let overlay = CalendarOverlay::new(2024, 2, CalendarStyle::default());
        let empty = RgbaImage::new(0, 0);
        assert!(matches!(
            overlay.render(&mut renderer, &empty),
            Err(RenderError::EmptyImage)
        ));
    }
}
