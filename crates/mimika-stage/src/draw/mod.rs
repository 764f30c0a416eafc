//! The avatar draw pass.
//!
//! Draw order per frame: clear → background → camera transform → body
//! panel (with emotion-driven glow) → head and facial features → arms.
//! All geometry is defined in head-centered local space and mapped
//! through the camera transform, so the same code serves every preset.

mod arms;
mod background;
mod body;
mod face;

use mimika_core::{BackgroundSetting, Color, PixelSource};

use crate::camera::Transform2D;
use crate::canvas::Canvas;
use crate::params::FrameParams;

pub use arms::draw_arms;
pub use background::draw_background;
pub use body::draw_body;
pub use face::draw_face;

/// Avatar palette. One place so the passes stay in tune.
pub(crate) mod palette {
    use mimika_core::Color;

    pub const SKIN: Color = Color::rgb(0.96, 0.80, 0.69);
    pub const SKIN_SHADE: Color = Color::rgb(0.88, 0.70, 0.58);
    pub const PANEL: Color = Color::rgb(0.23, 0.26, 0.38);
    pub const PANEL_EDGE: Color = Color::rgb(0.16, 0.18, 0.28);
    pub const GLOW: Color = Color::rgb(1.0, 0.78, 0.35);
    pub const EYE_WHITE: Color = Color::rgb(0.97, 0.97, 0.99);
    pub const IRIS: Color = Color::rgb(0.18, 0.30, 0.48);
    pub const BROW: Color = Color::rgb(0.24, 0.16, 0.12);
    pub const LIP: Color = Color::rgb(0.72, 0.32, 0.34);
    pub const MOUTH_INTERIOR: Color = Color::rgb(0.28, 0.10, 0.12);
    pub const HAND: Color = Color::rgb(0.94, 0.76, 0.64);
}

/// Everything one frame's draw pass needs besides the canvas.
pub struct FrameScene<'a> {
    pub background: &'a BackgroundSetting,
    pub params: &'a FrameParams,
    /// Eyelid openness in [0, 1].
    pub blink_openness: f64,
    /// Gaze direction after idle jitter, each axis nominally in [-1, 1].
    pub gaze: (f64, f64),
    /// Total non-neutral emotion weight, drives the panel glow.
    pub expressive_weight: f64,
    /// Session noise seed for the background dither.
    pub noise_seed: u32,
    /// Uploaded avatar portrait, when present.
    pub avatar_image: Option<&'a PixelSource>,
}

/// Renders one complete frame.
pub fn compose_frame(canvas: &mut Canvas, base: Transform2D, scene: &FrameScene<'_>) {
    canvas.reset_transform();
    canvas.clear(Color::black());
    draw_background(canvas, scene.background, scene.noise_seed);

    // Body and arms follow the camera; the head additionally rotates.
    canvas.set_transform(base);
    draw_body(canvas, scene.expressive_weight);

    let head = base.rotated_deg(scene.params.head_rotation_deg);
    canvas.set_transform(head);
    draw_face(
        canvas,
        scene.params,
        scene.blink_openness,
        scene.gaze,
        scene.avatar_image,
    );

    canvas.set_transform(base);
    draw_arms(canvas, scene.params);
    canvas.reset_transform();
}
