//! Error types for the audio pipeline.

use mimika_core::FaultCode;
use thiserror::Error;

/// Result type for audio pipeline operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur in the audio pipeline.
#[derive(Debug, Error)]
pub enum AudioError {
    /// The audio subsystem cannot be constructed as configured.
    #[error("audio unsupported: {message}")]
    Unsupported {
        /// Why construction failed.
        message: String,
    },

    /// Playback needs a user gesture before the context may run.
    #[error("playback blocked: interact with the page to enable audio")]
    BlockedByPolicy,

    /// Synthesis was asked for with no usable text.
    #[error("nothing to synthesize: text has no letters")]
    EmptyText,

    /// An uploaded file could not be decoded.
    #[error("could not decode source: {0}")]
    Decode(#[from] mimika_media::MediaError),

    /// No media is loaded.
    #[error("no media loaded")]
    NoSource,

    /// Speech synthesis or encoding failed.
    #[error(transparent)]
    Voice(mimika_voice::VoiceError),
}

impl AudioError {
    /// Creates an unsupported-capability error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}

impl From<mimika_voice::VoiceError> for AudioError {
    fn from(err: mimika_voice::VoiceError) -> Self {
        match err {
            // Empty text is its own reportable condition at this boundary.
            mimika_voice::VoiceError::EmptyText => AudioError::EmptyText,
            other => AudioError::Voice(other),
        }
    }
}

impl FaultCode for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::Unsupported { .. } => "AUDIO_001",
            AudioError::BlockedByPolicy => "AUDIO_002",
            AudioError::EmptyText => "AUDIO_003",
            AudioError::Decode(_) => "AUDIO_004",
            AudioError::NoSource => "AUDIO_005",
            AudioError::Voice(_) => "AUDIO_006",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
