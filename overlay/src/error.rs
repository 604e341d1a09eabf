//! Error types for overlay rendering

use std::path::PathBuf;

use tapezier_core::CalendarError;
use thiserror::Error;

/// Errors rendering a single overlay onto a single image
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode image {path}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("source image has zero width or height")]
    EmptyImage,

    #[error("sticker image has zero width or height")]
    EmptySticker,

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
