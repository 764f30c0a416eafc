//! Idle micro-motion.
//!
//! A slow phase accumulator adds bounded sinusoidal jitter to the head,
//! hand, and gaze inputs, so the avatar keeps breathing even with zero
//! audio and neutral sliders. The accumulator only advances on frames
//! that arrive more than 32 ms apart: at full display rate the motion
//! crawls, and it never speeds up when the frame loop hiccups.

use rand::Rng;
use rand_pcg::Pcg32;

/// Inter-frame gap that gates accumulator advancement, in milliseconds.
const ADVANCE_GATE_MS: f64 = 32.0;
/// Phase added per qualifying frame.
const PHASE_STEP: f64 = 0.03;

/// Jitter offsets applied to the animator inputs before derivation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IdleOffsets {
    /// Added to the head nod driver, in degrees.
    pub head_deg: f64,
    /// Added to the hand gesture phase.
    pub hand_phase: f64,
    /// Added to the gaze direction, per axis.
    pub gaze: (f64, f64),
}

/// The phase accumulator.
#[derive(Debug)]
pub struct IdleMotion {
    phase: f64,
}

impl IdleMotion {
    /// Starts at a random phase so parallel sessions do not sway in
    /// lockstep.
    pub fn new(rng: &mut Pcg32) -> Self {
        Self {
            phase: rng.gen::<f64>() * std::f64::consts::TAU,
        }
    }

    /// Advances the accumulator when the frame gap clears the gate.
    pub fn advance(&mut self, delta_ms: f64) {
        if delta_ms > ADVANCE_GATE_MS {
            self.phase += PHASE_STEP;
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Current jitter offsets. Amplitudes are small by construction:
    /// the idle motion seasons the pose, it never overrides it.
    pub fn offsets(&self) -> IdleOffsets {
        IdleOffsets {
            head_deg: (self.phase * 0.9).sin() * 1.5,
            hand_phase: (self.phase * 0.7).sin() * 0.35,
            gaze: ((self.phase * 0.5).sin() * 0.05, (self.phase * 0.35).cos() * 0.04),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimika_core::create_rng;

    #[test]
    fn test_fast_frames_do_not_advance() {
        let mut rng = create_rng(1);
        let mut idle = IdleMotion::new(&mut rng);
        let before = idle.phase();
        for _ in 0..100 {
            idle.advance(16.7);
        }
        assert_eq!(idle.phase(), before);
    }

    #[test]
    fn test_slow_frames_advance() {
        let mut rng = create_rng(1);
        let mut idle = IdleMotion::new(&mut rng);
        let before = idle.phase();
        idle.advance(33.0);
        assert!(idle.phase() > before);
    }

    #[test]
    fn test_offsets_bounded() {
        let mut rng = create_rng(2);
        let mut idle = IdleMotion::new(&mut rng);
        for _ in 0..10_000 {
            idle.advance(40.0);
            let o = idle.offsets();
            assert!(o.head_deg.abs() <= 1.5);
            assert!(o.hand_phase.abs() <= 0.35);
            assert!(o.gaze.0.abs() <= 0.05);
            assert!(o.gaze.1.abs() <= 0.04);
        }
    }

    #[test]
    fn test_never_perfectly_static() {
        // Two accumulator steps far enough apart change the offsets.
        let mut rng = create_rng(3);
        let mut idle = IdleMotion::new(&mut rng);
        let a = idle.offsets();
        for _ in 0..20 {
            idle.advance(40.0);
        }
        let b = idle.offsets();
        assert_ne!(a, b);
    }
}
