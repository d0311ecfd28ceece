//! CAPTCHA generation.
//!
//! Resolves options, renders the challenge image and builds the optional
//! identifier, either one after the other or as two parallel units.

use crate::assets::{FontCache, FontSource};
use crate::captcha::{identifier, verify};
use crate::config::{CaptchaError, Options, Result, Settings};
use crate::core::{RandomSource, Task, run_all};
use crate::render::{self, RenderedImage};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// A generated challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Captcha {
    image_reference: String,
    value: String,
    identifier: String,
}

impl Captcha {
    /// Rebuilds a challenge, e.g. from a session store.
    #[must_use]
    pub fn new(image_reference: String, value: String, identifier: String) -> Self {
        Self {
            image_reference,
            value,
            identifier,
        }
    }

    /// PNG image as a `data:image/png;base64,` URI.
    #[must_use]
    pub fn image_reference(&self) -> &str {
        &self.image_reference
    }

    /// The text drawn in the image.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Empty unless an identifier was requested.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns true if `candidate` matches the value, ignoring case.
    #[must_use]
    pub fn check_value(&self, candidate: &str) -> bool {
        verify::check_values(&self.value, candidate)
    }
}

pub struct CaptchaGenerator {
    fonts: Arc<FontCache>,
}

impl CaptchaGenerator {
    /// Creates a generator sharing `fonts` with any other holder of the cache.
    #[must_use]
    pub fn new(fonts: Arc<FontCache>) -> Self {
        Self { fonts }
    }

    /// Creates a generator with its own cache over `source`.
    #[must_use]
    pub fn from_source(source: FontSource) -> Self {
        Self::new(Arc::new(FontCache::new(Arc::new(source))))
    }

    #[must_use]
    pub fn fonts(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Generates a challenge with a freshly seeded random source.
    ///
    /// # Errors
    ///
    /// Returns `CaptchaError::InvalidOptions` for options that cannot be
    /// resolved, `CaptchaError::FontLoad` if the font is unavailable and
    /// `CaptchaError::ImageEncode` if the image cannot be encoded.
    pub fn generate(&self, options: &Options) -> Result<Captcha> {
        self.generate_with(options, &mut RandomSource::new())
    }

    /// Generates a challenge drawing all randomness from `rng`.
    ///
    /// The same seed and options always produce the same value and image.
    ///
    /// # Errors
    ///
    /// See [`CaptchaGenerator::generate`].
    pub fn generate_with(&self, options: &Options, rng: &mut RandomSource) -> Result<Captcha> {
        let settings = options.resolve()?;

        let (image, identifier) = if settings.use_concurrency {
            self.run_concurrent(&settings, rng)?
        } else {
            self.run_sequential(&settings, rng)?
        };

        debug!(
            width = settings.width,
            height = settings.height,
            identifier = settings.use_identifier,
            concurrent = settings.use_concurrency,
            "Captcha generated"
        );

        Ok(Captcha {
            image_reference: image.image_reference,
            value: image.value,
            identifier,
        })
    }

    /// Runs [`CaptchaGenerator::generate`] on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns the generation error, or `CaptchaError::Task` if the blocking
    /// task panicked or was cancelled.
    pub async fn generate_async(self: Arc<Self>, options: Options) -> Result<Captcha> {
        tokio::task::spawn_blocking(move || self.generate(&options))
            .await
            .map_err(|e| CaptchaError::Task(e.to_string()))?
    }

    fn run_sequential(
        &self,
        settings: &Settings,
        rng: &mut RandomSource,
    ) -> Result<(RenderedImage, String)> {
        let identifier = if settings.use_identifier {
            identifier::generate(rng)
        } else {
            String::new()
        };
        let image = render::render(settings, &self.fonts, rng)?;

        Ok((image, identifier))
    }

    fn run_concurrent(
        &self,
        settings: &Settings,
        rng: &mut RandomSource,
    ) -> Result<(RenderedImage, String)> {
        let mut id = String::new();
        let mut image = None;

        {
            let mut tasks: Vec<Task<'_>> = Vec::with_capacity(2);

            if settings.use_identifier {
                let mut id_rng = rng.fork();
                let slot = &mut id;
                tasks.push(Box::new(move || -> Result<()> {
                    *slot = identifier::generate(&mut id_rng);
                    Ok(())
                }));
            }

            let fonts = &*self.fonts;
            let slot = &mut image;
            tasks.push(Box::new(move || -> Result<()> {
                *slot = Some(render::render(settings, fonts, rng)?);
                Ok(())
            }));

            run_all(tasks)?;
        }

        let image = image
            .ok_or_else(|| CaptchaError::Task("image unit finished without output".to_string()))?;
        Ok((image, id))
    }
}

impl Default for CaptchaGenerator {
    fn default() -> Self {
        Self::from_source(FontSource::Embedded)
    }
}
