//! Image rendering pipeline.
//!
//! Paints the background, draws the challenge characters on the same canvas
//! and encodes the finished canvas. All randomness comes from the caller's
//! `RandomSource`, drawn in a fixed order on a single thread.

pub mod background;
pub mod characters;
pub mod encoder;

use crate::assets::FontCache;
use crate::config::{Result, Settings};
use crate::core::RandomSource;
use image::{GrayImage, Pixel, Rgb, Rgba, RgbaImage};
use tracing::debug;

/// Output of one image-generation unit.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub image_reference: String,
    pub value: String,
}

/// Renders and encodes one challenge image.
///
/// # Errors
///
/// Returns `CaptchaError::FontLoad` if the face cannot be loaded or a glyph
/// cannot be outlined, and `CaptchaError::ImageEncode` if encoding fails.
pub fn render(
    settings: &Settings,
    fonts: &FontCache,
    rng: &mut RandomSource,
) -> Result<RenderedImage> {
    let face = fonts.load(settings.font_size)?;

    let mut canvas = background::paint(settings, rng);
    let value = characters::draw(&mut canvas, settings, &face, rng)?;
    let image_reference = encoder::encode(canvas)?;

    debug!(
        width = settings.width,
        height = settings.height,
        characters = settings.character_count,
        encoded_len = image_reference.len(),
        "Challenge image rendered"
    );

    Ok(RenderedImage {
        image_reference,
        value,
    })
}

/// Blends `color` onto `canvas` through a coverage mask whose top-left corner
/// sits at `origin`. Mask pixels outside the canvas are skipped.
fn blend_mask(
    canvas: &mut RgbaImage,
    mask: &GrayImage,
    origin: (i64, i64),
    color: Rgb<u8>,
    alpha: u8,
) {
    let (width, height) = canvas.dimensions();
    let [r, g, b] = color.0;

    for (mx, my, coverage) in mask.enumerate_pixels() {
        let coverage = coverage.0[0];
        if coverage == 0 {
            continue;
        }
        let (Ok(x), Ok(y)) = (
            u32::try_from(origin.0 + i64::from(mx)),
            u32::try_from(origin.1 + i64::from(my)),
        ) else {
            continue;
        };
        if x >= width || y >= height {
            continue;
        }

        let a = u16::from(alpha) * u16::from(coverage) / 255;
        let a = u8::try_from(a).unwrap_or(u8::MAX);
        canvas.get_pixel_mut(x, y).blend(&Rgba([r, g, b, a]));
    }
}
