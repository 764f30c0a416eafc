//! Per-frame derived expression parameters.
//!
//! Pure functions of the current inputs; the only hidden state in the
//! animator is the blink machine. The blend constants are load-bearing:
//! changing them changes the avatar's personality.

use mimika_core::{clamp01, EmotionState};

/// Everything the parameter derivation reads for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    /// Amplitude estimate in [0, 1] from the audio pipeline.
    pub audio_level: f64,
    /// Current emotion weights.
    pub emotion: EmotionState,
    /// Head nod driver in degrees (pose tilt plus idle jitter).
    pub head_nod: f64,
    /// Hand gesture phase driver (pose energy plus idle jitter).
    pub hand_gesture: f64,
    /// Horizontal offset of the active camera preset.
    pub camera_offset_x: f64,
}

/// The derived parameters the draw pass consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Mouth openness in [0, 1].
    pub mouth_open: f64,
    /// Vertical eyebrow shift in head-space units; positive lowers them.
    pub eyebrow_offset: f64,
    /// Mouth corner curvature; higher is a wider smile.
    pub smile_curve: f64,
    /// Head rotation in degrees.
    pub head_rotation_deg: f64,
    /// Arm swing amplitude.
    pub hand_amplitude: f64,
    /// Per-arm swing angle in degrees.
    pub arm_phase_deg: [f64; 2],
}

/// Derives the frame parameters from the inputs.
pub fn derive_frame_params(inputs: &FrameInputs) -> FrameParams {
    let e = &inputs.emotion;
    let level = inputs.audio_level;

    let mouth_open = clamp01(level * (0.65 + e.surprised / 180.0) + (e.happy - e.sad) / 400.0);
    let eyebrow_offset = (e.angry - e.happy) / 150.0;
    let smile_curve = 0.4 + e.happy / 120.0 - e.sad / 180.0;
    let head_rotation_deg = inputs.head_nod * 0.5 + inputs.camera_offset_x * 0.03;

    let hand_amplitude = level * 14.0 + e.happy / 16.0;
    let arm_phase_deg = [
        (inputs.hand_gesture + hand_amplitude).sin() * 40.0,
        (inputs.hand_gesture + hand_amplitude * 1.1).sin() * 40.0,
    ];

    FrameParams {
        mouth_open,
        eyebrow_offset,
        smile_curve,
        head_rotation_deg,
        hand_amplitude,
        arm_phase_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(level: f64, emotion: EmotionState) -> FrameInputs {
        FrameInputs {
            audio_level: level,
            emotion,
            head_nod: 0.0,
            hand_gesture: 0.0,
            camera_offset_x: 0.0,
        }
    }

    #[test]
    fn test_mouth_open_clamped_over_domain() {
        // Boundary sweep including the extremes named in the acceptance
        // checks: level=1 with surprised=100, and happy=0 with sad=100.
        for &level in &[0.0, 0.25, 0.5, 1.0] {
            for &happy in &[0.0, 50.0, 100.0] {
                for &sad in &[0.0, 50.0, 100.0] {
                    for &surprised in &[0.0, 100.0] {
                        let e = EmotionState::new(happy, sad, 0.0, surprised, 0.0);
                        let p = derive_frame_params(&inputs(level, e));
                        assert!(
                            (0.0..=1.0).contains(&p.mouth_open),
                            "mouth_open {} for level={} happy={} sad={} surprised={}",
                            p.mouth_open,
                            level,
                            happy,
                            sad,
                            surprised
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_loud_surprise_saturates_mouth() {
        let e = EmotionState::new(0.0, 0.0, 0.0, 100.0, 0.0);
        let p = derive_frame_params(&inputs(1.0, e));
        assert_eq!(p.mouth_open, 1.0);
    }

    #[test]
    fn test_sadness_pulls_mouth_shut() {
        let e = EmotionState::new(0.0, 100.0, 0.0, 0.0, 0.0);
        let p = derive_frame_params(&inputs(0.0, e));
        assert_eq!(p.mouth_open, 0.0);
    }

    #[test]
    fn test_eyebrows_track_anger_minus_happiness() {
        let angry = EmotionState::new(0.0, 0.0, 75.0, 0.0, 0.0);
        assert!((derive_frame_params(&inputs(0.0, angry)).eyebrow_offset - 0.5).abs() < 1e-9);

        let happy = EmotionState::new(75.0, 0.0, 0.0, 0.0, 0.0);
        assert!((derive_frame_params(&inputs(0.0, happy)).eyebrow_offset + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_smile_baseline() {
        let p = derive_frame_params(&inputs(0.0, EmotionState::resting()));
        assert!((p.smile_curve - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_head_rotation_blend() {
        let mut i = inputs(0.0, EmotionState::resting());
        i.head_nod = 10.0;
        i.camera_offset_x = 100.0;
        let p = derive_frame_params(&i);
        assert!((p.head_rotation_deg - (5.0 + 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_arm_phases_diverge() {
        let mut i = inputs(0.8, EmotionState::new(40.0, 0.0, 0.0, 0.0, 0.0));
        i.hand_gesture = 1.0;
        let p = derive_frame_params(&i);
        assert!(p.hand_amplitude > 0.0);
        assert_ne!(p.arm_phase_deg[0], p.arm_phase_deg[1]);
        assert!(p.arm_phase_deg[0].abs() <= 40.0);
        assert!(p.arm_phase_deg[1].abs() <= 40.0);
    }
}
