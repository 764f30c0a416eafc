//! The blink state machine.
//!
//! Three phases: open (openness 1), closing (fixed step down per frame),
//! opening (fixed step up per frame). The close trigger is stochastic: a
//! deadline drawn as 2800 ms plus up to 2000 ms is checked on every frame,
//! regardless of the current phase, and rearmed whenever it fires. The
//! per-frame deltas are applied per displayed frame, not time-scaled;
//! that framerate coupling is part of the look.

use rand::Rng;
use rand_pcg::Pcg32;

/// Openness decrease per frame while closing.
pub const CLOSE_STEP: f64 = 0.15;
/// Openness increase per frame while reopening.
pub const OPEN_STEP: f64 = 0.12;
/// Base delay between blinks in milliseconds.
pub const DELAY_BASE_MS: f64 = 2800.0;
/// Uniform random spread added to the base delay, in milliseconds.
pub const DELAY_SPREAD_MS: f64 = 2000.0;

/// The eyelid record mutated every frame.
///
/// Created once per render session and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkState {
    /// Eyelid openness in [0, 1]; 1 is fully open.
    pub openness: f64,
    /// Whether the lid is in the closing phase.
    pub closing: bool,
    /// Openness the current phase is heading toward (0 or 1).
    pub target: f64,
}

impl BlinkState {
    fn open() -> Self {
        Self {
            openness: 1.0,
            closing: false,
            target: 1.0,
        }
    }
}

/// Owns the blink state, the deadline, and the RNG stream feeding it.
#[derive(Debug)]
pub struct BlinkDriver {
    state: BlinkState,
    last_blink_ms: f64,
    next_delay_ms: f64,
    rng: Pcg32,
}

impl BlinkDriver {
    /// Creates a driver with eyes open and the first deadline armed.
    pub fn new(mut rng: Pcg32, now_ms: f64) -> Self {
        let next_delay_ms = draw_delay(&mut rng);
        Self {
            state: BlinkState::open(),
            last_blink_ms: now_ms,
            next_delay_ms,
            rng,
        }
    }

    /// Current eyelid record.
    pub fn state(&self) -> BlinkState {
        self.state
    }

    /// Advances one displayed frame; returns the new openness.
    pub fn step(&mut self, now_ms: f64) -> f64 {
        // The deadline check runs every frame regardless of phase; firing
        // mid-blink only pushes the next deadline out.
        if now_ms - self.last_blink_ms >= self.next_delay_ms {
            self.state.closing = true;
            self.state.target = 0.0;
            self.last_blink_ms = now_ms;
            self.next_delay_ms = draw_delay(&mut self.rng);
        }

        if self.state.closing {
            self.state.openness = (self.state.openness - CLOSE_STEP).max(0.0);
            if self.state.openness <= 0.0 {
                self.state.closing = false;
                self.state.target = 1.0;
            }
        } else if self.state.openness < 1.0 {
            self.state.openness = (self.state.openness + OPEN_STEP).min(1.0);
        }

        self.state.openness
    }
}

fn draw_delay(rng: &mut Pcg32) -> f64 {
    DELAY_BASE_MS + rng.gen::<f64>() * DELAY_SPREAD_MS
}
