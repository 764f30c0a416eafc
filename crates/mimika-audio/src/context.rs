//! Audio context lifecycle.
//!
//! Models the host audio subsystem the graph hangs off: it may be
//! constructed lazily, may start suspended under an autoplay policy, and
//! must be resumed by an explicit call once a user gesture has unlocked
//! it. Device I/O itself belongs to the embedding shell; the context here
//! carries the states and failure modes the pipeline has to navigate.

use crate::error::{AudioError, AudioResult};

/// Highest sample rate the context accepts.
const MAX_SAMPLE_RATE: u32 = 384_000;

/// Context construction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextOptions {
    /// Context sample rate in Hz.
    pub sample_rate: u32,
    /// Whether the context starts suspended (autoplay policy).
    pub start_suspended: bool,
    /// Whether resuming requires a prior user gesture.
    pub gesture_locked: bool,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            start_suspended: true,
            gesture_locked: false,
        }
    }
}

/// Context run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Suspended,
    Running,
    Closed,
}

/// The host audio subsystem handle.
#[derive(Debug)]
pub struct AudioContext {
    state: ContextState,
    sample_rate: u32,
    gesture_locked: bool,
}

impl AudioContext {
    /// Constructs a context.
    ///
    /// # Errors
    /// `Unsupported` when the requested configuration cannot be realized.
    pub fn new(options: ContextOptions) -> AudioResult<Self> {
        if options.sample_rate == 0 || options.sample_rate > MAX_SAMPLE_RATE {
            return Err(AudioError::unsupported(format!(
                "sample rate {} Hz out of range",
                options.sample_rate
            )));
        }

        Ok(Self {
            state: if options.start_suspended {
                ContextState::Suspended
            } else {
                ContextState::Running
            },
            sample_rate: options.sample_rate,
            gesture_locked: options.gesture_locked,
        })
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Marks the user gesture that satisfies the autoplay policy.
    pub fn unlock(&mut self) {
        self.gesture_locked = false;
    }

    /// Attempts to move the context to Running.
    ///
    /// Resuming an already-running context is a no-op.
    ///
    /// # Errors
    /// `BlockedByPolicy` while the context is still gesture-locked;
    /// `Unsupported` on a closed context.
    pub fn resume(&mut self) -> AudioResult<()> {
        match self.state {
            ContextState::Running => Ok(()),
            ContextState::Closed => Err(AudioError::unsupported("context is closed")),
            ContextState::Suspended => {
                if self.gesture_locked {
                    return Err(AudioError::BlockedByPolicy);
                }
                self.state = ContextState::Running;
                Ok(())
            }
        }
    }

    /// Closes the context; it cannot be resumed afterwards.
    pub fn close(&mut self) {
        self.state = ContextState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_suspended_by_default() {
        let ctx = AudioContext::new(ContextOptions::default()).unwrap();
        assert_eq!(ctx.state(), ContextState::Suspended);
    }

    #[test]
    fn test_resume_transitions_to_running() {
        let mut ctx = AudioContext::new(ContextOptions::default()).unwrap();
        ctx.resume().unwrap();
        assert_eq!(ctx.state(), ContextState::Running);
        // Idempotent.
        ctx.resume().unwrap();
        assert_eq!(ctx.state(), ContextState::Running);
    }

    #[test]
    fn test_gesture_lock_blocks_resume() {
        let mut ctx = AudioContext::new(ContextOptions {
            gesture_locked: true,
            ..ContextOptions::default()
        })
        .unwrap();

        assert!(matches!(ctx.resume(), Err(AudioError::BlockedByPolicy)));
        assert_eq!(ctx.state(), ContextState::Suspended);

        ctx.unlock();
        ctx.resume().unwrap();
        assert_eq!(ctx.state(), ContextState::Running);
    }

    #[test]
    fn test_invalid_rate_unsupported() {
        assert!(AudioContext::new(ContextOptions {
            sample_rate: 0,
            ..ContextOptions::default()
        })
        .is_err());
        assert!(AudioContext::new(ContextOptions {
            sample_rate: 1_000_000,
            ..ContextOptions::default()
        })
        .is_err());
    }

    #[test]
    fn test_closed_cannot_resume() {
        let mut ctx = AudioContext::new(ContextOptions::default()).unwrap();
        ctx.close();
        assert!(ctx.resume().is_err());
    }
}
