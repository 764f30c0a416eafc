//! Pose parameters and camera angle enumeration.

use serde::{Deserialize, Serialize};

/// A 2D vector with both axes clamped to [-1, 1] on construction.
///
/// Used for the gaze direction: (-1, -1) is up-left, (1, 1) is down-right.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// Creates a vector, clamping each axis to [-1, 1].
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }
}

/// The fixed set of camera framings.
///
/// Each angle maps to a (x offset, y fraction, scale) preset owned by the
/// animator; the enumeration itself is pure data so it can travel through
/// UI state and serialization without dragging the preset table along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraAngle {
    Front,
    ThreeQuarterLeft,
    ThreeQuarterRight,
    CloseUp,
    Wide,
}

impl CameraAngle {
    /// All angles in UI presentation order.
    pub const ALL: [CameraAngle; 5] = [
        CameraAngle::Front,
        CameraAngle::ThreeQuarterLeft,
        CameraAngle::ThreeQuarterRight,
        CameraAngle::CloseUp,
        CameraAngle::Wide,
    ];
}

impl Default for CameraAngle {
    fn default() -> Self {
        CameraAngle::Front
    }
}

/// Body pose parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseState {
    /// Head tilt in signed degrees.
    pub head_tilt: f64,
    /// Gaze direction, each axis in [-1, 1].
    pub eye_direction: Vec2,
    /// Hand gesture phase/amplitude driver.
    pub hand_energy: f64,
    /// Active camera framing.
    pub camera_angle: CameraAngle,
}

impl PoseState {
    pub fn new(head_tilt: f64, eye_direction: Vec2, hand_energy: f64, camera_angle: CameraAngle) -> Self {
        Self {
            head_tilt,
            eye_direction,
            hand_energy,
            camera_angle,
        }
    }
}

impl Default for PoseState {
    fn default() -> Self {
        Self {
            head_tilt: 0.0,
            eye_direction: Vec2::default(),
            hand_energy: 0.0,
            camera_angle: CameraAngle::Front,
        }
    }
}
