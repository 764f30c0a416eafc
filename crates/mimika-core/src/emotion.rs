//! Emotion weight set driving expression parameters.

use serde::{Deserialize, Serialize};

/// Five independent emotion weights.
///
/// The UI exposes each slider as 0-100, but the animator treats the weights
/// as unbounded additive influences: nothing forces them to sum to a
/// constant, and values are only required to be non-negative. Negative
/// inputs are clamped to zero on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    pub happy: f64,
    pub sad: f64,
    pub angry: f64,
    pub surprised: f64,
    pub neutral: f64,
}

impl EmotionState {
    /// Creates an emotion state, clamping negative weights to zero.
    pub fn new(happy: f64, sad: f64, angry: f64, surprised: f64, neutral: f64) -> Self {
        Self {
            happy: happy.max(0.0),
            sad: sad.max(0.0),
            angry: angry.max(0.0),
            surprised: surprised.max(0.0),
            neutral: neutral.max(0.0),
        }
    }

    /// The resting state: full neutral, everything else zero.
    pub fn resting() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0, 100.0)
    }

    /// Total non-neutral weight, used for the body-panel glow intensity.
    pub fn expressive_weight(&self) -> f64 {
        self.happy + self.sad + self.angry + self.surprised
    }
}

impl Default for EmotionState {
    fn default() -> Self {
        Self::resting()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_weights_clamped() {
        let e = EmotionState::new(-5.0, 10.0, -1.0, 0.0, 50.0);
        assert_eq!(e.happy, 0.0);
        assert_eq!(e.sad, 10.0);
        assert_eq!(e.angry, 0.0);
    }

    #[test]
    fn test_resting_state() {
        let e = EmotionState::resting();
        assert_eq!(e.neutral, 100.0);
        assert_eq!(e.expressive_weight(), 0.0);
    }

    #[test]
    fn test_no_sum_invariant() {
        // Sliders are independent; all can be maxed at once.
        let e = EmotionState::new(100.0, 100.0, 100.0, 100.0, 100.0);
        assert_eq!(e.expressive_weight(), 400.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let e = EmotionState::new(30.0, 0.0, 12.5, 80.0, 20.0);
        let json = serde_json::to_string(&e).unwrap();
        let back: EmotionState = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
