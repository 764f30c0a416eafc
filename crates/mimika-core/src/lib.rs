//! mimika shared data model.
//!
//! This crate holds the types that flow between the audio pipeline, the
//! procedural animator, and the export pipeline:
//!
//! - **Emotion weights**: five independent sliders blended additively into
//!   animation parameters ([`EmotionState`])
//! - **Pose parameters**: head tilt, gaze direction, hand energy, and the
//!   active camera preset ([`PoseState`], [`CameraAngle`])
//! - **Background selection**: preset gradient, solid color, or uploaded
//!   image ([`BackgroundSetting`])
//! - **Source bookkeeping**: what media is currently loaded
//!   ([`AudioSourceMeta`])
//!
//! It also provides the [`FaultCode`] trait every mimika error type
//! implements for uniform reporting, and the deterministic RNG helpers used
//! by the animator's stochastic pieces (blink timing, idle jitter,
//! background noise).
//!
//! # Modules
//!
//! - [`error`]: the `FaultCode` reporting trait
//! - [`emotion`]: emotion weight set
//! - [`pose`]: pose parameters and camera angle enumeration
//! - [`background`]: background setting and pixel sources
//! - [`color`]: RGBA color with f64 components
//! - [`source`]: audio source metadata
//! - [`rng`]: deterministic PCG32 construction and seed derivation

pub mod background;
pub mod color;
pub mod emotion;
pub mod error;
pub mod pose;
pub mod rng;
pub mod source;

pub use background::{BackgroundSetting, PixelSource};
pub use color::Color;
pub use emotion::EmotionState;
pub use error::FaultCode;
pub use pose::{CameraAngle, PoseState, Vec2};
pub use rng::{create_component_rng, create_rng, derive_component_seed};
pub use source::{AudioSourceMeta, SourceKind};

/// Clamps a scalar to the unit interval.
///
/// Small helper used across the animator's derived parameters, which are all
/// specified as clamped-to-[0,1] blends.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
