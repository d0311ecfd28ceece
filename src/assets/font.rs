//! Font face cache.
//!
//! Holds at most one parsed face, keyed by point size. Readers share the face
//! through an `Arc`; a miss loads and parses outside the lock and only takes
//! the write lock to install the result.

use crate::assets::source::FontProvider;
use crate::config::{CaptchaError, Result};
use ab_glyph::{Font, FontArc, FontRef, OutlinedGlyph, PxScale, point};
use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// A parsed font together with the pixel scale for one point size.
pub struct FontFace {
    font: FontArc,
    size: f32,
    scale: PxScale,
}

impl FontFace {
    /// Parses `bytes` and sizes the face so one em spans `size` pixels (72 dpi).
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::FontLoad` if the data is not a usable font.
    pub fn from_bytes(bytes: Cow<'static, [u8]>, size: f32) -> Result<Self> {
        let font = match bytes {
            Cow::Borrowed(data) => FontRef::try_from_slice(data).map(FontArc::new),
            Cow::Owned(data) => FontArc::try_from_vec(data),
        }
        .map_err(|e| CaptchaError::FontLoad(format!("invalid font data: {e}")))?;

        let units_per_em = font
            .units_per_em()
            .ok_or_else(|| CaptchaError::FontLoad("font has no units-per-em".to_string()))?;
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);

        Ok(Self { font, size, scale })
    }

    /// Point size this face was loaded for.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[must_use]
    pub fn scale(&self) -> PxScale {
        self.scale
    }

    /// Outlines `ch` with its origin at (0, 0).
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::FontLoad` if the font has no drawable glyph for `ch`.
    pub fn outline(&self, ch: char) -> Result<OutlinedGlyph> {
        let id = self.font.glyph_id(ch);
        if id.0 == 0 {
            return Err(CaptchaError::FontLoad(format!("font has no glyph for '{ch}'")));
        }
        let glyph = id.with_scale_and_position(self.scale, point(0.0, 0.0));
        self.font
            .outline_glyph(glyph)
            .ok_or_else(|| CaptchaError::FontLoad(format!("glyph '{ch}' has no outline")))
    }
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontCacheStats {
    pub hits: u64,
    pub loads: u64,
}

/// Single-entry font cache. The most recently requested size wins.
pub struct FontCache {
    provider: Arc<dyn FontProvider>,
    current: RwLock<Option<Arc<FontFace>>>,
    hits: AtomicU64,
    loads: AtomicU64,
}

impl FontCache {
    #[must_use]
    pub fn new(provider: Arc<dyn FontProvider>) -> Self {
        Self {
            provider,
            current: RwLock::new(None),
            hits: AtomicU64::new(0),
            loads: AtomicU64::new(0),
        }
    }

    /// Returns the face for `size`, loading it on a miss.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::FontLoad` if the provider fails or the font is unusable.
    pub fn load(&self, size: f32) -> Result<Arc<FontFace>> {
        if let Some(face) = self.cached(size) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(size = size, "Font cache hit");
            return Ok(face);
        }

        debug!(size = size, font = %self.provider.name(), "Font cache miss");
        let bytes = self.provider.load()?;
        let face = Arc::new(FontFace::from_bytes(bytes, size)?);
        self.loads.fetch_add(1, Ordering::Relaxed);

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = current.as_ref().filter(|f| same_size(f.size, size)) {
            return Ok(Arc::clone(existing));
        }
        *current = Some(Arc::clone(&face));
        drop(current);

        info!(size = size, font = %self.provider.name(), "Font face loaded");
        Ok(face)
    }

    /// Point size of the cached face, if any.
    #[must_use]
    pub fn cached_size(&self) -> Option<f32> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|f| f.size)
    }

    #[must_use]
    pub fn stats(&self) -> FontCacheStats {
        FontCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
        }
    }

    fn cached(&self, size: f32) -> Option<Arc<FontFace>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|f| same_size(f.size, size))
            .map(Arc::clone)
    }
}

fn same_size(a: f32, b: f32) -> bool {
    a.to_bits() == b.to_bits()
}
