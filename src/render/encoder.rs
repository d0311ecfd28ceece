//! PNG encoding and data URI packaging.

use crate::config::{CaptchaError, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Encodes the canvas as an opaque RGB PNG.
///
/// # Errors
///
/// Returns `CaptchaError::ImageEncode` if the PNG encoder fails.
pub fn encode_png(canvas: RgbaImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(canvas).into_rgb8();

    let mut png_data = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
        .map_err(|e| CaptchaError::ImageEncode(e.to_string()))?;

    Ok(png_data)
}

#[must_use]
pub fn to_data_uri(png: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(png))
}

/// Encodes the canvas and wraps it in a `data:image/png;base64,` URI.
///
/// # Errors
///
/// Returns `CaptchaError::ImageEncode` if the PNG encoder fails.
pub fn encode(canvas: RgbaImage) -> Result<String> {
    encode_png(canvas).map(|png| to_data_uri(&png))
}

/// Extracts the PNG bytes from a data URI produced by `encode`.
#[must_use]
pub fn decode_data_uri(uri: &str) -> Option<Vec<u8>> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX)?;
    STANDARD.decode(payload).ok()
}
