//! Procedural swinging arms.
//!
//! Each arm is a gradient-filled quadrilateral capsule from the shoulder
//! to the hand, capped by a circular hand. The swing angle comes straight
//! from the per-frame parameters.

use crate::canvas::Canvas;
use crate::params::FrameParams;

use super::palette;

/// Shoulder anchors in head space.
const SHOULDER_X: f64 = 100.0;
const SHOULDER_Y: f64 = 96.0;
/// Arm dimensions.
const ARM_LENGTH: f64 = 118.0;
const ARM_WIDTH_TOP: f64 = 26.0;
const ARM_WIDTH_TIP: f64 = 18.0;
const HAND_RADIUS: f64 = 13.0;
/// Resting outward lean in degrees; the swing angle adds to it.
const REST_LEAN_DEG: f64 = 16.0;

/// Draws both arms.
pub fn draw_arms(canvas: &mut Canvas, params: &FrameParams) {
    draw_arm(canvas, -1.0, params.arm_phase_deg[0]);
    draw_arm(canvas, 1.0, params.arm_phase_deg[1]);
}

fn draw_arm(canvas: &mut Canvas, side: f64, swing_deg: f64) {
    let shoulder = (SHOULDER_X * side, SHOULDER_Y);

    // Angle measured from straight down; the swing tilts it, the resting
    // lean pushes it away from the torso.
    let angle = (REST_LEAN_DEG * side + swing_deg).to_radians();
    let dir = (angle.sin(), angle.cos());
    let hand = (
        shoulder.0 + dir.0 * ARM_LENGTH,
        shoulder.1 + dir.1 * ARM_LENGTH,
    );

    // Perpendicular half-widths at the shoulder and the wrist.
    let perp = (-dir.1, dir.0);
    let top = ARM_WIDTH_TOP / 2.0;
    let tip = ARM_WIDTH_TIP / 2.0;

    let quad = [
        (shoulder.0 + perp.0 * top, shoulder.1 + perp.1 * top),
        (shoulder.0 - perp.0 * top, shoulder.1 - perp.1 * top),
        (hand.0 - perp.0 * tip, hand.1 - perp.1 * tip),
        (hand.0 + perp.0 * tip, hand.1 + perp.1 * tip),
    ];

    canvas.fill_quad_gradient(quad, palette::PANEL, palette::PANEL_EDGE);
    canvas.fill_ellipse(hand.0, hand.1, HAND_RADIUS, HAND_RADIUS, palette::HAND);
}
