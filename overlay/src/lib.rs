//! Tapezier Overlay Library
//!
//! Composites a calendar grid or a sticker onto wallpaper images.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 batch / preview / service            │
//! │     directory runs, preview fitting, debounce        │
//! ├─────────────────────────────────────────────────────┤
//! │                    overlays/                         │
//! │          CalendarOverlay, StickerOverlay             │
//! │         (complete overlay implementations)           │
//! ├─────────────────────────────────────────────────────┤
//! │               layout + compositor                    │
//! │   grid/sticker geometry, alpha-over, encode/decode   │
//! ├─────────────────────────────────────────────────────┤
//! │                    renderer                          │
//! │            tiny-skia + cosmic-text                   │
//! │              (drawing primitives)                    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! The renderer draws onto transparent layers; the compositor blends a
//! finished layer over the source image in one pass, so uncovered source
//! pixels survive bit-identically.

pub mod batch;
pub mod compositor;
pub mod error;
pub mod font;
pub mod layout;
pub mod overlays;
pub mod preview;
pub mod renderer;
pub mod service;
pub mod utils;

// Re-export commonly used types
pub use batch::{BatchProgress, BatchReport, BatchRunner};
pub use error::RenderError;
pub use font::{FontResolution, FontSpec, list_families, monospaced_families};
pub use overlays::{CalendarOverlay, Overlay, StickerOverlay};
pub use preview::PreviewSession;
pub use renderer::{InkRect, Renderer};
pub use service::RenderService;

// Re-export tiny_skia Color for external use
pub use tiny_skia::Color;
