//! Configuration management.
//!
//! Per-request `Options` and their resolution into `Settings`, plus the
//! environment-driven `Config` used by the binary.

mod error;
pub mod options;
mod settings;

pub use error::{CaptchaError, Result};
pub use options::{BackgroundStyle, Options, Settings};
pub use settings::Config;
