use mavecaptcha::assets::EMBEDDED_FONT;
use mavecaptcha::render::encoder::decode_data_uri;
use mavecaptcha::{CaptchaError, FontCache, FontProvider, Options, Result};
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Serves the embedded font and records how often it was asked.
#[derive(Default)]
pub struct TrackingProvider {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl TrackingProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl FontProvider for TrackingProvider {
    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed("tracking")
    }

    fn load(&self) -> Result<Cow<'static, [u8]>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CaptchaError::FontLoad("asset missing".to_string()));
        }
        Ok(Cow::Borrowed(EMBEDDED_FONT))
    }
}

pub fn tracked_cache() -> (Arc<TrackingProvider>, Arc<FontCache>) {
    let provider = Arc::new(TrackingProvider::default());
    let cache = Arc::new(FontCache::new(provider.clone()));
    (provider, cache)
}

pub fn small_options() -> Options {
    Options {
        width: Some(240),
        height: Some(80),
        font_size: Some(32.0),
        character_count: Some(5),
        ..Default::default()
    }
}

/// Decodes a data URI and returns the PNG dimensions.
pub fn png_dimensions(uri: &str) -> (u32, u32) {
    let png = decode_data_uri(uri).expect("not a PNG data URI");
    let image = image::load_from_memory_with_format(&png, image::ImageFormat::Png)
        .expect("invalid PNG");
    (image.width(), image.height())
}
