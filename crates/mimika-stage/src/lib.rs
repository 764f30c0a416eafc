//! mimika procedural animator.
//!
//! The render loop lives here. Each frame the session:
//!
//! 1. advances the blink state machine,
//! 2. advances the idle micro-motion accumulator (only on frames that
//!    arrive more than 32 ms apart),
//! 3. derives the expression parameters from the current audio level and
//!    emotion weights,
//! 4. computes the camera-relative transform for the active preset,
//! 5. draws the composed scene into the software canvas.
//!
//! Everything is procedural (formulas and state machines, no keyframe
//! data), and everything stochastic draws from seeded PCG32 streams, so a
//! session replays identically for a given seed and input timeline.
//!
//! # Modules
//!
//! - [`blink`]: the blink state machine
//! - [`camera`]: preset table and coordinate transform
//! - [`params`]: per-frame derived expression parameters
//! - [`idle`]: idle micro-motion
//! - [`canvas`]: software RGBA framebuffer with transform-aware fills
//! - [`draw`]: background, body, face, and arm passes
//! - [`image_slot`]: avatar image ownership with stale-load protection
//! - [`session`]: the render session driving one frame per display tick

pub mod blink;
pub mod camera;
pub mod canvas;
pub mod draw;
pub mod error;
pub mod idle;
pub mod image_slot;
pub mod params;
pub mod session;

pub use blink::{BlinkDriver, BlinkState};
pub use camera::{preset, CameraPreset, Transform2D};
pub use canvas::Canvas;
pub use error::{StageError, StageResult};
pub use idle::{IdleMotion, IdleOffsets};
pub use image_slot::{ImageSlot, LoadTicket};
pub use params::{derive_frame_params, FrameInputs, FrameParams};
pub use session::{SceneState, StageConfig, StageSession};
