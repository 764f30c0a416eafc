//! Error types for the voice synthesizer.

use mimika_core::FaultCode;
use thiserror::Error;

/// Result type for voice operations.
pub type VoiceResult<T> = Result<T, VoiceError>;

/// Errors that can occur during speech synthesis or encoding.
#[derive(Debug, Error)]
pub enum VoiceError {
    /// The input text contained nothing to voice.
    #[error("nothing to synthesize: text has no letters")]
    EmptyText,

    /// Encoding the sample buffer to a container failed.
    #[error("audio encoding failed: {message}")]
    Encode {
        /// What went wrong.
        message: String,
    },

    /// The encode worker is no longer running.
    #[error("encode worker unavailable")]
    WorkerUnavailable,
}

impl VoiceError {
    /// Creates an encoding error.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}

impl FaultCode for VoiceError {
    fn code(&self) -> &'static str {
        match self {
            VoiceError::EmptyText => "VOICE_001",
            VoiceError::Encode { .. } => "VOICE_002",
            VoiceError::WorkerUnavailable => "VOICE_003",
        }
    }

    fn category(&self) -> &'static str {
        "voice"
    }
}
