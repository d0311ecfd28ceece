//! Test utilities and shared fixtures.
//!
//! Fake font providers and small option presets used by unit tests and,
//! with the `testing` feature, by downstream crates.

#[cfg(any(test, feature = "testing"))]
use crate::assets::source::{EMBEDDED_FONT, FontProvider};
#[cfg(any(test, feature = "testing"))]
use crate::config::{CaptchaError, Options, Result};
#[cfg(any(test, feature = "testing"))]
use std::borrow::Cow;
#[cfg(any(test, feature = "testing"))]
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Serves the embedded font, counts every load and can be switched to fail.
#[cfg(any(test, feature = "testing"))]
#[derive(Default)]
pub struct CountingProvider {
    calls: AtomicUsize,
    failing: AtomicBool,
}

#[cfg(any(test, feature = "testing"))]
impl CountingProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider that fails every load.
    #[must_use]
    pub fn failing() -> Self {
        let provider = Self::default();
        provider.set_failing(true);
        provider
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of load attempts so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[cfg(any(test, feature = "testing"))]
impl FontProvider for CountingProvider {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("counting")
    }

    fn load(&self) -> Result<Cow<'static, [u8]>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CaptchaError::FontLoad("font asset unavailable".to_string()));
        }
        Ok(Cow::Borrowed(EMBEDDED_FONT))
    }
}

/// Small canvas options that keep test renders fast.
#[cfg(any(test, feature = "testing"))]
#[must_use]
pub fn small_options() -> Options {
    Options {
        width: Some(240),
        height: Some(80),
        font_size: Some(32.0),
        character_count: Some(5),
        ..Default::default()
    }
}
