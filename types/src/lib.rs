//! Shared configuration types for Tapezier
//!
//! This crate contains the serializable configuration that flows between a
//! frontend and the rendering crates: overlay styles, colors, opacity, and
//! the persisted application config. No I/O happens here.

use serde::{Deserialize, Serialize};

/// An RGB color triple. Alpha is carried separately where it matters
/// (see [`BoxOpacity`]); text is always drawn opaque.
pub type Rgb = [u8; 3];

/// Default style colors: white title on a black box, muted weekdays,
/// warm holidays.
pub mod style_colors {
    use super::Rgb;

    pub const TITLE: Rgb = [255, 255, 255];
    pub const BOX: Rgb = [0, 0, 0];
    pub const WEEKDAY: Rgb = [200, 200, 200];
    pub const HOLIDAY: Rgb = [255, 100, 100];
    pub const DAY_NAME: Rgb = [150, 150, 150];
}

// ─────────────────────────────────────────────────────────────────────────────
// Box Opacity
// ─────────────────────────────────────────────────────────────────────────────

/// Opacity of the calendar background box.
///
/// Two conventions exist in the wild for this value: a 0–1 transparency
/// fraction and a raw 0–255 byte alpha. They are not interchangeable, so
/// both are representable and the conversion to a byte alpha happens in
/// exactly one place: [`BoxOpacity::to_alpha`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum BoxOpacity {
    /// 0.0 = fully transparent, 1.0 = fully opaque. Multiplied by 255.
    Fraction(f32),
    /// Raw byte alpha, used verbatim.
    Byte(u8),
}

impl BoxOpacity {
    /// Convert to the byte alpha used when compositing the box.
    pub fn to_alpha(self) -> u8 {
        match self {
            Self::Fraction(f) => (f.clamp(0.0, 1.0) * 255.0).round() as u8,
            Self::Byte(b) => b,
        }
    }

    /// Whether the box is completely invisible and can be skipped.
    pub fn is_transparent(self) -> bool {
        self.to_alpha() == 0
    }
}

impl Default for BoxOpacity {
    fn default() -> Self {
        Self::Fraction(0.5)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Calendar Style
// ─────────────────────────────────────────────────────────────────────────────

/// Style snapshot for one calendar render.
///
/// Immutable per call: the renderer takes a reference and never mutates it.
/// Offset fractions are deliberately not clamped; values outside [0, 1]
/// place the grid partly off-canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarStyle {
    /// Font family name. Empty string selects the platform sans-serif.
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// Outline-only glyphs (no fill).
    #[serde(default)]
    pub hollow: bool,
    /// Multiplier on the derived font size (base_size * table_scale / 20).
    #[serde(default = "default_scale")]
    pub font_scale: f32,

    #[serde(default = "default_title_color")]
    pub title_color: Rgb,
    #[serde(default = "default_weekday_color")]
    pub weekday_color: Rgb,
    #[serde(default = "default_holiday_color")]
    pub holiday_color: Rgb,
    #[serde(default = "default_day_name_color")]
    pub day_name_color: Rgb,
    #[serde(default = "default_box_color")]
    pub box_color: Rgb,
    #[serde(default)]
    pub box_opacity: BoxOpacity,

    /// Corner radius of the background box as a percentage of the base
    /// size (0–100).
    #[serde(default = "default_curvature")]
    pub curvature: f32,
    /// Grid scale factor relative to the image's shorter dimension.
    #[serde(default = "default_scale")]
    pub table_scale: f32,
    /// 0 = left edge, 0.5 = centered, 1 = right edge. Not clamped.
    #[serde(default = "default_offset")]
    pub x_offset: f32,
    /// 0 = top edge, 0.5 = centered, 1 = bottom edge. Not clamped.
    #[serde(default = "default_offset")]
    pub y_offset: f32,
}

impl Default for CalendarStyle {
    fn default() -> Self {
        Self {
            font_family: String::new(),
            bold: false,
            italic: false,
            hollow: false,
            font_scale: 1.0,
            title_color: style_colors::TITLE,
            weekday_color: style_colors::WEEKDAY,
            holiday_color: style_colors::HOLIDAY,
            day_name_color: style_colors::DAY_NAME,
            box_color: style_colors::BOX,
            box_opacity: BoxOpacity::default(),
            curvature: 20.0,
            table_scale: 1.0,
            x_offset: 0.5,
            y_offset: 0.5,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sticker Style
// ─────────────────────────────────────────────────────────────────────────────

/// Placement snapshot for a sticker render.
///
/// The sticker is resized to `wallpaper_width * scale` with its aspect
/// ratio preserved, then placed with the same offset formula the calendar
/// grid uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StickerStyle {
    /// Sticker width as a fraction of the wallpaper width.
    #[serde(default = "default_sticker_scale")]
    pub scale: f32,
    #[serde(default = "default_offset")]
    pub x_offset: f32,
    #[serde(default = "default_offset")]
    pub y_offset: f32,
}

impl Default for StickerStyle {
    fn default() -> Self {
        Self {
            scale: 0.1,
            x_offset: 0.5,
            y_offset: 0.5,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output Naming
// ─────────────────────────────────────────────────────────────────────────────

/// How batch output files are named relative to their input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputNaming {
    /// `calendar_<basename>`, the convention for calendar runs.
    #[default]
    Prefixed,
    /// Input basename unchanged, the convention for sticker runs.
    Original,
}

impl OutputNaming {
    /// Map an input file name to its output file name.
    pub fn apply(self, basename: &str) -> String {
        match self {
            Self::Prefixed => format!("calendar_{basename}"),
            Self::Original => basename.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

/// Persisted application configuration (last-used settings).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory scanned for wallpaper images.
    #[serde(default)]
    pub input_directory: String,
    /// Directory results are written to (created if absent).
    #[serde(default)]
    pub output_directory: String,
    /// Directory holding sticker images (sticker mode only).
    #[serde(default)]
    pub sticker_directory: String,
    /// Selected sticker file name within `sticker_directory`.
    #[serde(default)]
    pub sticker_file: String,

    #[serde(default)]
    pub calendar: CalendarStyle,
    #[serde(default)]
    pub sticker: StickerStyle,
    #[serde(default)]
    pub output_naming: OutputNaming,

    /// Target year; `None` means the current year at render time.
    #[serde(default)]
    pub year: Option<i32>,
    /// Target month (1–12); `None` means the current month at render time.
    #[serde(default)]
    pub month: Option<u32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde Default Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn default_scale() -> f32 {
    1.0
}
fn default_offset() -> f32 {
    0.5
}
fn default_curvature() -> f32 {
    20.0
}
fn default_sticker_scale() -> f32 {
    0.1
}
fn default_title_color() -> Rgb {
    style_colors::TITLE
}
fn default_weekday_color() -> Rgb {
    style_colors::WEEKDAY
}
fn default_holiday_color() -> Rgb {
    style_colors::HOLIDAY
}
fn default_day_name_color() -> Rgb {
    style_colors::DAY_NAME
}
fn default_box_color() -> Rgb {
    style_colors::BOX
}
