//! Background fills: gradient presets, solid colors, uploaded images.

use mimika_core::{BackgroundSetting, Color, PixelSource};

use crate::canvas::Canvas;

/// Brightness factor applied to uploaded backdrops so the avatar stays
/// readable in front of them.
const IMAGE_DIM: f64 = 0.7;

/// Dither amplitude for the gradient presets.
const NOISE_AMPLITUDE: f64 = 0.02;

/// Gradient preset table: name → (top, bottom).
fn preset_colors(name: &str) -> (Color, Color) {
    match name {
        "studio" => (Color::rgb(0.17, 0.19, 0.30), Color::rgb(0.07, 0.07, 0.12)),
        "sunset" => (Color::rgb(0.98, 0.58, 0.32), Color::rgb(0.36, 0.13, 0.35)),
        "meadow" => (Color::rgb(0.53, 0.81, 0.92), Color::rgb(0.22, 0.48, 0.28)),
        "dusk" => (Color::rgb(0.30, 0.22, 0.44), Color::rgb(0.05, 0.05, 0.10)),
        // Unknown names fall back to the studio look.
        _ => preset_colors("studio"),
    }
}

/// Fills the whole canvas with the configured backdrop.
///
/// Runs in device space; the caller applies the camera transform after.
pub fn draw_background(canvas: &mut Canvas, setting: &BackgroundSetting, noise_seed: u32) {
    canvas.reset_transform();

    match setting {
        BackgroundSetting::Solid { color } => {
            canvas.clear(*color);
        }
        BackgroundSetting::Preset { name } => {
            let (top, bottom) = preset_colors(name);
            fill_gradient_noise(canvas, top, bottom, noise_seed);
        }
        BackgroundSetting::Image { source } => {
            fill_image_cover(canvas, source);
        }
    }
}

/// Vertical gradient with a stable per-pixel dither.
fn fill_gradient_noise(canvas: &mut Canvas, top: Color, bottom: Color, seed: u32) {
    let width = canvas.width();
    let height = canvas.height();
    let denom = (height.saturating_sub(1)).max(1) as f64;

    for y in 0..height {
        let t = y as f64 / denom;
        let row = top.lerp(&bottom, t);
        for x in 0..width {
            let n = (hash01(x, y, seed) - 0.5) * 2.0 * NOISE_AMPLITUDE;
            canvas.blend_pixel(x as i64, y as i64, row.scaled(1.0 + n).clamp());
        }
    }
}

/// Scales the image to cover the canvas (center crop) at reduced
/// brightness.
fn fill_image_cover(canvas: &mut Canvas, source: &PixelSource) {
    let cw = canvas.width() as f64;
    let ch = canvas.height() as f64;
    let iw = source.width as f64;
    let ih = source.height as f64;

    let scale = (cw / iw).max(ch / ih);
    let offset_x = (iw * scale - cw) / 2.0;
    let offset_y = (ih * scale - ch) / 2.0;

    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let sx = ((x as f64 + offset_x) / scale) as u32;
            let sy = ((y as f64 + offset_y) / scale) as u32;
            let c = source.sample(sx, sy).scaled(IMAGE_DIM);
            canvas.blend_pixel(x as i64, y as i64, c);
        }
    }
}

/// Cheap stable hash → [0, 1). The dither must not shimmer between
/// frames, so it depends only on position and the session seed.
fn hash01(x: u32, y: u32, seed: u32) -> f64 {
    let mut h = x
        .wrapping_mul(374_761_393)
        .wrapping_add(y.wrapping_mul(668_265_263))
        .wrapping_add(seed.wrapping_mul(2_246_822_519));
    h ^= h >> 13;
    h = h.wrapping_mul(1_274_126_177);
    h ^= h >> 16;
    h as f64 / u32::MAX as f64
}
