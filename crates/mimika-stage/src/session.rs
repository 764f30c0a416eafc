//! The render session.
//!
//! One session owns one continuous animation: the canvas, the blink
//! machine, the idle accumulator, and the avatar image slot. The
//! embedding shell calls [`StageSession::render_frame`] once per display
//! frame with the current wall time, scene state, and audio level; the
//! session is otherwise inert. Shutting the session down cancels the
//! frame work and releases the image, so a callback firing after
//! teardown cannot touch dead resources.

use mimika_core::{
    create_component_rng, derive_component_seed, BackgroundSetting, EmotionState, PixelSource,
    PoseState,
};

use crate::blink::{BlinkDriver, BlinkState};
use crate::camera::preset;
use crate::canvas::Canvas;
use crate::draw::{compose_frame, FrameScene};
use crate::error::StageResult;
use crate::idle::IdleMotion;
use crate::image_slot::{ImageSlot, LoadTicket};
use crate::params::{derive_frame_params, FrameInputs};

/// Frame gap assumed for the very first frame, in milliseconds.
const DEFAULT_FRAME_MS: f64 = 16.7;

/// Session construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageConfig {
    pub width: u32,
    pub height: u32,
    /// Session seed; all stochastic streams derive from it.
    pub seed: u32,
}

impl StageConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 640,
            seed: 0,
        }
    }
}

/// The UI-owned state a frame renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneState {
    pub emotion: EmotionState,
    pub pose: PoseState,
    pub background: BackgroundSetting,
}

/// The per-session render loop owner.
#[derive(Debug)]
pub struct StageSession {
    canvas: Canvas,
    blink: BlinkDriver,
    idle: IdleMotion,
    avatar: ImageSlot,
    noise_seed: u32,
    last_frame_ms: Option<f64>,
    frame_count: u64,
    running: bool,
}

impl StageSession {
    pub fn new(config: StageConfig) -> Self {
        let blink_rng = create_component_rng(config.seed, "blink");
        let mut jitter_rng = create_component_rng(config.seed, "jitter");

        Self {
            canvas: Canvas::new(config.width, config.height),
            blink: BlinkDriver::new(blink_rng, 0.0),
            idle: IdleMotion::new(&mut jitter_rng),
            avatar: ImageSlot::new(),
            noise_seed: derive_component_seed(config.seed, "background"),
            last_frame_ms: None,
            frame_count: 0,
            running: true,
        }
    }

    /// Renders one frame at `now_ms` and returns the canvas.
    ///
    /// A session that has been shut down leaves the canvas untouched;
    /// the loop is continuous and non-restartable within a session.
    pub fn render_frame(
        &mut self,
        now_ms: f64,
        scene: &SceneState,
        audio_level: f64,
    ) -> &Canvas {
        if !self.running {
            return &self.canvas;
        }

        let delta_ms = self
            .last_frame_ms
            .map(|last| (now_ms - last).max(0.0))
            .unwrap_or(DEFAULT_FRAME_MS);
        self.last_frame_ms = Some(now_ms);
        self.frame_count += 1;

        self.idle.advance(delta_ms);
        let blink_openness = self.blink.step(now_ms);
        let offsets = self.idle.offsets();

        let cam = preset(scene.pose.camera_angle);
        let inputs = FrameInputs {
            audio_level: audio_level.clamp(0.0, 1.0),
            emotion: scene.emotion,
            head_nod: scene.pose.head_tilt + offsets.head_deg,
            hand_gesture: scene.pose.hand_energy + offsets.hand_phase,
            camera_offset_x: cam.x_offset,
        };
        let params = derive_frame_params(&inputs);

        let gaze = (
            (scene.pose.eye_direction.x + offsets.gaze.0).clamp(-1.0, 1.0),
            (scene.pose.eye_direction.y + offsets.gaze.1).clamp(-1.0, 1.0),
        );

        let base = cam.transform(self.canvas.width(), self.canvas.height());
        let frame = FrameScene {
            background: &scene.background,
            params: &params,
            blink_openness,
            gaze,
            expressive_weight: scene.emotion.expressive_weight(),
            noise_seed: self.noise_seed,
            avatar_image: self.avatar.image(),
        };
        compose_frame(&mut self.canvas, base, &frame);

        &self.canvas
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current blink record, mainly for diagnostics.
    pub fn blink_state(&self) -> BlinkState {
        self.blink.state()
    }

    /// Starts an avatar image load; the previous image is invalidated
    /// immediately.
    pub fn begin_avatar_load(&mut self) -> LoadTicket {
        self.avatar.begin_load()
    }

    /// Completes an avatar image load. Stale tickets are discarded.
    pub fn complete_avatar_load(
        &mut self,
        ticket: LoadTicket,
        image: PixelSource,
    ) -> StageResult<bool> {
        self.avatar.complete(ticket, image)
    }

    /// Drops the avatar image.
    pub fn clear_avatar(&mut self) {
        self.avatar.invalidate();
    }

    /// Cancels the render loop and releases per-frame resources.
    ///
    /// Idempotent; frames requested afterwards are no-ops.
    pub fn shutdown(&mut self) {
        if self.running {
            log::debug!("stage session shut down after {} frames", self.frame_count);
        }
        self.running = false;
        self.avatar.invalidate();
        self.last_frame_ms = None;
    }
}
