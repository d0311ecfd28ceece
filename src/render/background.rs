//! Background painting.

use crate::config::options::DEFAULT_HEIGHT;
use crate::config::{BackgroundStyle, Settings};
use crate::core::RandomSource;
use crate::render::blend_mask;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// One scattered background circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: (i32, i32),
    pub radius: i32,
    pub alpha: u8,
}

/// Creates the canvas and paints its full area.
#[must_use]
pub fn paint(settings: &Settings, rng: &mut RandomSource) -> RgbaImage {
    let [r, g, b] = settings.background_color.0;

    match settings.background_style {
        BackgroundStyle::Fill => {
            RgbaImage::from_pixel(settings.width, settings.height, Rgba([r, g, b, 255]))
        }
        BackgroundStyle::ScatteredCircles => {
            let mut canvas = RgbaImage::from_pixel(settings.width, settings.height, WHITE);
            for circle in scatter_circles(settings.width, settings.height, rng) {
                draw_circle(&mut canvas, &circle, settings.background_color);
            }
            canvas
        }
    }
}

/// Lays out circles from just left of the canvas to just past its right edge.
///
/// The stride is at least `width / 80` over a span of `1.375 * width`, so at
/// most ~110 circles are placed whatever the random draws.
pub fn scatter_circles(width: u32, height: u32, rng: &mut RandomSource) -> Vec<Circle> {
    let width_f = f64::from(width);
    let height_f = f64::from(height);
    let area = width_f * height_f;
    let half_height = height_f / 2.0;

    let max_stride = width / 5 + 1;
    let min_stride = width_f / 80.0;
    let max_radius = to_u32(area / 1000.0) + 1;
    let min_radius = area / 600.0;

    let mut circles = Vec::new();
    let mut x = -width_f * 0.125;
    let end = width_f * 1.25;

    while x < end {
        let alpha = u8::try_from(255 - rng.below(129)).unwrap_or(u8::MAX);
        let radius = f64::from(rng.below(max_radius)) + min_radius;
        let offset = f64::from(rng.below(21)) - 10.0;
        let y = offset * f64::from(DEFAULT_HEIGHT) / height_f + half_height;

        circles.push(Circle {
            center: (to_i32(x), to_i32(y)),
            radius: to_i32(radius),
            alpha,
        });

        x += f64::from(rng.below(max_stride)) + min_stride;
    }

    circles
}

fn draw_circle(canvas: &mut RgbaImage, circle: &Circle, color: image::Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let (cx, cy) = (i64::from(circle.center.0), i64::from(circle.center.1));
    let r = i64::from(circle.radius);

    let x0 = (cx - r).max(0);
    let y0 = (cy - r).max(0);
    let x1 = (cx + r).min(i64::from(width) - 1);
    let y1 = (cy + r).min(i64::from(height) - 1);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let (Ok(mask_w), Ok(mask_h)) = (u32::try_from(x1 - x0 + 1), u32::try_from(y1 - y0 + 1)) else {
        return;
    };
    let mut mask = GrayImage::new(mask_w, mask_h);
    let local_center = (to_i32_i64(cx - x0), to_i32_i64(cy - y0));
    draw_filled_circle_mut(&mut mask, local_center, circle.radius, Luma([255]));

    blend_mask(canvas, &mask, (x0, y0), color, circle.alpha);
}

fn to_i32(v: f64) -> i32 {
    v.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn to_i32_i64(v: i64) -> i32 {
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}

fn to_u32(v: f64) -> u32 {
    v.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}
