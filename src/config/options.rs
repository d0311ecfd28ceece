//! Per-request generation options.
//!
//! `Options` is what callers fill in; `Settings` is the resolved form the
//! renderers consume. Unset fields take the defaults below.

use crate::config::{CaptchaError, Result};
use image::Rgb;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 200;
pub const DEFAULT_FONT_SIZE: f32 = 64.0;
pub const DEFAULT_CHARACTER_COUNT: usize = 7;
pub const DEFAULT_LETTER_RATIO: f64 = 0.5;
pub const DEFAULT_BACKGROUND_COLOR: Rgb<u8> = Rgb([0xDC, 0xDC, 0xDC]);
pub const DEFAULT_TEXT_COLOR: Rgb<u8> = Rgb([0x00, 0x00, 0x00]);

/// Upper bound for either canvas dimension.
pub const MAX_DIMENSION: u32 = 8192;

/// Upper bound for the font size in points.
pub const MAX_FONT_SIZE: f32 = 1024.0;

/// Canvas background style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackgroundStyle {
    /// One solid color.
    #[default]
    Fill,
    /// Semi-transparent circles scattered over a white canvas.
    ScatteredCircles,
}

impl std::str::FromStr for BackgroundStyle {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circles" | "scattered_circles" | "scattered-circles" => Ok(Self::ScatteredCircles),
            _ => Ok(Self::Fill),
        }
    }
}

/// Caller-facing options. `None` (and zero for sizes and counts) means default.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub background_color: Option<Rgb<u8>>,
    pub text_color: Option<Rgb<u8>>,
    pub background_style: Option<BackgroundStyle>,
    /// Font size in points.
    pub font_size: Option<f32>,
    pub character_count: Option<usize>,
    /// Fraction of characters drawn from the letter alphabet.
    pub letter_ratio: Option<f64>,
    pub use_identifier: bool,
    pub use_concurrency: bool,
}

/// Fully resolved options.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    pub background_color: Rgb<u8>,
    pub text_color: Rgb<u8>,
    pub background_style: BackgroundStyle,
    pub font_size: f32,
    pub character_count: usize,
    pub letter_ratio: f64,
    pub use_identifier: bool,
    pub use_concurrency: bool,
}

impl Options {
    /// Fills unset fields with defaults and validates the rest.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::InvalidOptions` for a negative, non-finite or
    /// oversized font size, a ratio outside `0.0..=1.0`, or a dimension above
    /// `MAX_DIMENSION`.
    pub fn resolve(&self) -> Result<Settings> {
        let width = dimension("width", self.width, DEFAULT_WIDTH)?;
        let height = dimension("height", self.height, DEFAULT_HEIGHT)?;

        let font_size = match self.font_size {
            None => DEFAULT_FONT_SIZE,
            Some(size) if size == 0.0 => DEFAULT_FONT_SIZE,
            Some(size) if size.is_finite() && size > 0.0 && size <= MAX_FONT_SIZE => size,
            Some(size) => {
                return Err(CaptchaError::InvalidOptions(format!(
                    "font size must be within (0, {MAX_FONT_SIZE}], got {size}"
                )));
            }
        };

        let letter_ratio = match self.letter_ratio {
            None => DEFAULT_LETTER_RATIO,
            Some(ratio) if (0.0..=1.0).contains(&ratio) => ratio,
            Some(ratio) => {
                return Err(CaptchaError::InvalidOptions(format!(
                    "letter ratio must be within 0.0..=1.0, got {ratio}"
                )));
            }
        };

        let character_count = self
            .character_count
            .filter(|&count| count > 0)
            .unwrap_or(DEFAULT_CHARACTER_COUNT);

        Ok(Settings {
            width,
            height,
            background_color: self.background_color.unwrap_or(DEFAULT_BACKGROUND_COLOR),
            text_color: self.text_color.unwrap_or(DEFAULT_TEXT_COLOR),
            background_style: self.background_style.unwrap_or_default(),
            font_size,
            character_count,
            letter_ratio,
            use_identifier: self.use_identifier,
            use_concurrency: self.use_concurrency,
        })
    }
}

fn dimension(name: &str, value: Option<u32>, default: u32) -> Result<u32> {
    match value {
        None | Some(0) => Ok(default),
        Some(v) if v <= MAX_DIMENSION => Ok(v),
        Some(v) => Err(CaptchaError::InvalidOptions(format!(
            "{name} {v} exceeds the {MAX_DIMENSION}px limit"
        ))),
    }
}

/// Parses `#RRGGBB` (leading `#` optional).
#[must_use]
pub fn parse_hex_color(s: &str) -> Option<Rgb<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
