//! Font asset providers.
//!
//! The generator never locates its own font. A `FontProvider` hands over the
//! raw font bytes: compiled in, supplied by the caller, read from a path, or
//! fetched by a callback.

use crate::config::{CaptchaError, Result};
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// DejaVu Sans Mono, compiled into the crate.
pub const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

/// Callback used by `FontSource::Fetch`.
pub type FetchFn = dyn Fn() -> std::io::Result<Vec<u8>> + Send + Sync;

/// Supplies raw font bytes on demand.
pub trait FontProvider: Send + Sync {
    /// Human-readable asset name used in logs and errors.
    fn name(&self) -> Cow<'_, str>;

    /// Returns the font file contents.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::FontLoad` if the asset cannot be obtained.
    fn load(&self) -> Result<Cow<'static, [u8]>>;
}

/// Built-in font providers.
#[derive(Clone, Default)]
pub enum FontSource {
    /// The font compiled into the crate.
    #[default]
    Embedded,
    /// Bytes already held by the caller.
    Bytes(Arc<[u8]>),
    /// A font file on disk, read on every cache miss.
    Path(PathBuf),
    /// Any other locator, e.g. a network fetch.
    Fetch(Arc<FetchFn>),
}

impl FontSource {
    /// Wraps a fetch callback.
    pub fn fetch<F>(f: F) -> Self
    where
        F: Fn() -> std::io::Result<Vec<u8>> + Send + Sync + 'static,
    {
        Self::Fetch(Arc::new(f))
    }
}

impl fmt::Debug for FontSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => f.write_str("Embedded"),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Fetch(_) => f.write_str("Fetch(..)"),
        }
    }
}

impl FontProvider for FontSource {
    fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Embedded => Cow::Borrowed("embedded:DejaVuSansMono"),
            Self::Bytes(_) => Cow::Borrowed("bytes"),
            Self::Path(path) => path.to_string_lossy(),
            Self::Fetch(_) => Cow::Borrowed("fetch"),
        }
    }

    fn load(&self) -> Result<Cow<'static, [u8]>> {
        match self {
            Self::Embedded => Ok(Cow::Borrowed(EMBEDDED_FONT)),
            Self::Bytes(bytes) => Ok(Cow::Owned(bytes.to_vec())),
            Self::Path(path) => std::fs::read(path).map(Cow::Owned).map_err(|e| {
                CaptchaError::FontLoad(format!("failed to read '{}': {e}", path.display()))
            }),
            Self::Fetch(fetch) => fetch()
                .map(Cow::Owned)
                .map_err(|e| CaptchaError::FontLoad(format!("font fetch failed: {e}"))),
        }
    }
}
