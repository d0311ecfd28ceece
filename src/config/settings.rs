//! Service configuration.
//!
//! Defines the `Config` struct and environment variable loading logic used by
//! the binary and by services embedding the generator.

use crate::assets::FontSource;
use crate::config::options::{BackgroundStyle, Options, parse_hex_color};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_POOL_SIZE: usize = 16;

fn get_env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_bool(key: &str) -> bool {
    env::var(key)
        .map(|v| v.to_lowercase() == "true" || v == "1")
        .unwrap_or(false)
}

fn get_env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    get_env_opt(key).and_then(|s| s.trim().parse().ok())
}

fn get_env_usize_or(key: &str, default: usize) -> usize {
    get_env_parsed(key).unwrap_or(default)
}

/// Application configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Options applied to every generated challenge.
    pub options: Options,
    /// Font file to load; the embedded face is used when unset.
    pub font_path: Option<PathBuf>,
    /// Capacity of the pre-generation pool.
    pub pool_size: usize,
    /// Logging format: "json" or "pretty".
    pub log_format: String,
    /// Number of challenges the binary emits.
    pub count: usize,
    /// Directory the binary writes decoded PNG files into.
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables (and `.env` if present).
    ///
    /// Missing or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        let options = Options {
            width: get_env_parsed("CAPTCHA_WIDTH"),
            height: get_env_parsed("CAPTCHA_HEIGHT"),
            background_color: get_env_opt("CAPTCHA_BACKGROUND_COLOR")
                .and_then(|s| parse_hex_color(&s)),
            text_color: get_env_opt("CAPTCHA_TEXT_COLOR").and_then(|s| parse_hex_color(&s)),
            background_style: get_env_opt("CAPTCHA_BACKGROUND")
                .and_then(|s| s.parse::<BackgroundStyle>().ok()),
            font_size: get_env_parsed("CAPTCHA_FONT_SIZE"),
            character_count: get_env_parsed("CAPTCHA_CHARACTERS"),
            letter_ratio: get_env_parsed::<f64>("CAPTCHA_LETTER_RATIO")
                .filter(|r| (0.0..=1.0).contains(r)),
            use_identifier: get_env_bool("CAPTCHA_IDENTIFIER"),
            use_concurrency: get_env_bool("CAPTCHA_CONCURRENT"),
        };

        Arc::new(Self {
            options,
            font_path: get_env_opt("FONT_PATH").map(PathBuf::from),
            pool_size: get_env_usize_or("POOL_SIZE", DEFAULT_POOL_SIZE).max(1),
            log_format: get_env_or("LOG_FORMAT", "json"),
            count: get_env_usize_or("CAPTCHA_COUNT", 1),
            output_dir: get_env_opt("OUTPUT_DIR").map(PathBuf::from),
        })
    }

    /// Font source selected by this configuration.
    #[must_use]
    pub fn font_source(&self) -> FontSource {
        self.font_path
            .clone()
            .map_or(FontSource::Embedded, FontSource::Path)
    }
}
