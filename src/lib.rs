//! Library definitions.
//!
//! Image CAPTCHA generation: randomized backgrounds, rotated glyphs, a shared
//! font cache and optional parallel rendering of the image and identifier.

pub mod assets;
pub mod captcha;
pub mod config;
pub mod core;
pub mod render;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;
pub use assets::{FontCache, FontCacheStats, FontFace, FontProvider, FontSource};
pub use captcha::{Captcha, CaptchaGenerator, CaptchaPool, check_values};
pub use config::{BackgroundStyle, CaptchaError, Config, Options, Result, Settings};
pub use core::RandomSource;
