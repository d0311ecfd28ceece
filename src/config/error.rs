//! Error types and result aliases.
//!
//! Defines the `CaptchaError` enumeration and the common `Result` type.

use thiserror::Error;

/// Generation errors. Every variant aborts the whole generation call.
#[derive(Debug, Error)]
pub enum CaptchaError {
    /// Font asset missing, unreadable, corrupt, or unable to outline a glyph.
    #[error("font load error: {0}")]
    FontLoad(String),

    /// Canvas could not be serialized.
    #[error("image encode error: {0}")]
    ImageEncode(String),

    /// Options could not be resolved into usable settings.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A blocking generation task panicked or was cancelled.
    #[error("generation task failed: {0}")]
    Task(String),
}

/// Result type alias for `CaptchaError`.
pub type Result<T> = std::result::Result<T, CaptchaError>;
