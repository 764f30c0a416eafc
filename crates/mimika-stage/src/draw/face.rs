//! Head and facial features: eyes, eyebrows, mouth.

use mimika_core::PixelSource;

use crate::canvas::Canvas;
use crate::params::FrameParams;

use super::palette;

/// Head geometry in head space.
const HEAD_RX: f64 = 85.0;
const HEAD_RY: f64 = 95.0;

/// Eye geometry.
const EYE_X: f64 = 32.0;
const EYE_Y: f64 = -18.0;
const EYE_RX: f64 = 16.0;
const EYE_RY: f64 = 11.0;
const IRIS_R: f64 = 7.0;
/// How far the iris travels with a full gaze deflection.
const GAZE_TRAVEL: f64 = 8.0;
/// Minimum eyelid opening so a blink never leaves a zero-height slit.
const MIN_LID: f64 = 0.06;

/// Eyebrow geometry.
const BROW_W: f64 = 26.0;
const BROW_H: f64 = 5.0;
const BROW_Y: f64 = -40.0;
/// Head-space pixels per unit of eyebrow offset.
const BROW_TRAVEL: f64 = 10.0;

/// Mouth geometry.
const MOUTH_Y: f64 = 40.0;
const MOUTH_HALF_W: f64 = 24.0;
const LIP_THICKNESS: f64 = 6.0;
/// Mouth interior height at full openness.
const MOUTH_GAPE: f64 = 26.0;
/// Head-space pixels of corner curvature per unit of smile curve.
const SMILE_DEPTH: f64 = 18.0;

/// Draws the head and face into the current (rotated) transform.
///
/// When an uploaded portrait is present it replaces the drawn head
/// shape; the animated features render on top either way, so a missing
/// or still-loading image degrades to the built-in look instead of
/// failing the frame.
pub fn draw_face(
    canvas: &mut Canvas,
    params: &FrameParams,
    blink_openness: f64,
    gaze: (f64, f64),
    avatar_image: Option<&PixelSource>,
) {
    match avatar_image {
        Some(image) => draw_portrait(canvas, image),
        None => {
            canvas.fill_ellipse(0.0, 2.0, HEAD_RX + 4.0, HEAD_RY + 4.0, palette::SKIN_SHADE);
            canvas.fill_ellipse(0.0, 0.0, HEAD_RX, HEAD_RY, palette::SKIN);
        }
    }

    draw_eye(canvas, -EYE_X, blink_openness, gaze);
    draw_eye(canvas, EYE_X, blink_openness, gaze);
    draw_brows(canvas, params.eyebrow_offset);
    draw_mouth(canvas, params.mouth_open, params.smile_curve);
}

/// Maps the portrait onto the head rectangle with nearest sampling.
fn draw_portrait(canvas: &mut Canvas, image: &PixelSource) {
    let w = image.width as f64;
    let h = image.height as f64;
    canvas.fill_shape(
        (-HEAD_RX, -HEAD_RY, HEAD_RX, HEAD_RY),
        move |lx, ly| {
            let u = (lx + HEAD_RX) / (HEAD_RX * 2.0);
            let v = (ly + HEAD_RY) / (HEAD_RY * 2.0);
            let sx = (u * (w - 1.0)).round() as u32;
            let sy = (v * (h - 1.0)).round() as u32;
            Some(image.sample(sx, sy))
        },
    );
}

fn draw_eye(canvas: &mut Canvas, center_x: f64, blink_openness: f64, gaze: (f64, f64)) {
    let lid = blink_openness.clamp(0.0, 1.0).max(MIN_LID);
    let ry = EYE_RY * lid;

    canvas.fill_ellipse(center_x, EYE_Y, EYE_RX, ry, palette::EYE_WHITE);

    let iris_x = center_x + gaze.0.clamp(-1.0, 1.0) * GAZE_TRAVEL;
    let iris_y = EYE_Y + gaze.1.clamp(-1.0, 1.0) * GAZE_TRAVEL * 0.5;
    // The iris is clipped by the lid: its vertical radius follows it.
    canvas.fill_ellipse(iris_x, iris_y, IRIS_R, IRIS_R.min(ry), palette::IRIS);
}

fn draw_brows(canvas: &mut Canvas, eyebrow_offset: f64) {
    let y = BROW_Y + eyebrow_offset * BROW_TRAVEL;
    canvas.fill_rect(-EYE_X - BROW_W / 2.0, y, BROW_W, BROW_H, palette::BROW);
    canvas.fill_rect(EYE_X - BROW_W / 2.0, y, BROW_W, BROW_H, palette::BROW);
}

/// Two-layer mouth: lip band along the smile quadratic, interior scaled
/// by openness.
fn draw_mouth(canvas: &mut Canvas, mouth_open: f64, smile_curve: f64) {
    let gape = mouth_open.clamp(0.0, 1.0) * MOUTH_GAPE;

    // Interior first, then lips over its edges.
    if gape > 0.5 {
        canvas.fill_shape(
            (-MOUTH_HALF_W, MOUTH_Y - 2.0, MOUTH_HALF_W, MOUTH_Y + SMILE_DEPTH + gape + 2.0),
            move |lx, ly| {
                let top = lip_curve(lx, smile_curve);
                let bottom = top + gape;
                (ly >= top && ly <= bottom).then_some(palette::MOUTH_INTERIOR)
            },
        );
    }

    for edge in [0.0, gape] {
        canvas.fill_shape(
            (
                -MOUTH_HALF_W,
                MOUTH_Y - LIP_THICKNESS - 2.0,
                MOUTH_HALF_W,
                MOUTH_Y + SMILE_DEPTH + gape + LIP_THICKNESS + 2.0,
            ),
            move |lx, ly| {
                let center = lip_curve(lx, smile_curve) + edge;
                ((ly - center).abs() <= LIP_THICKNESS / 2.0).then_some(palette::LIP)
            },
        );
        if gape <= 0.5 {
            break; // closed mouth: one lip band
        }
    }
}

/// The smile quadratic: lip height across the mouth. `x` in
/// [-MOUTH_HALF_W, MOUTH_HALF_W]; corners sit at MOUTH_Y, the middle sags
/// (or lifts) with the curve value.
fn lip_curve(x: f64, smile_curve: f64) -> f64 {
    let t = ((x + MOUTH_HALF_W) / (MOUTH_HALF_W * 2.0)).clamp(0.0, 1.0);
    let control = MOUTH_Y + smile_curve * SMILE_DEPTH;
    let inv = 1.0 - t;
    inv * inv * MOUTH_Y + 2.0 * inv * t * control + t * t * MOUTH_Y
}
