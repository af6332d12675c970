use std::io;

use thiserror::Error;

/// Errors produced by the palette engine and its helpers.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("invalid hex color {0:?}: expected 6 hex digits")]
    InvalidHex(String),

    #[error("pixel buffer of {len} bytes does not match {width}x{height} RGBA")]
    InvalidPixelBuffer { width: u32, height: u32, len: usize },

    #[error("palette is empty")]
    EmptyPalette,

    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to encode png: {0}")]
    EncodePng(String),

    #[error("invalid palette json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage error at {path}: {source}")]
    Storage { path: String, source: io::Error },
}

pub type Result<T, E = PaletteError> = std::result::Result<T, E>;
