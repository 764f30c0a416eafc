//! Error types for container codecs.

use thiserror::Error;

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while encoding or decoding containers.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The byte stream is not the container it claims to be.
    #[error("invalid {container} data: {message}")]
    InvalidContainer {
        /// Container name ("wav", "avi").
        container: &'static str,
        /// What went wrong.
        message: String,
    },

    /// The container is valid but uses a layout we do not handle.
    #[error("unsupported {container} layout: {message}")]
    UnsupportedLayout {
        container: &'static str,
        message: String,
    },

    /// WAV decode error from the reader backend.
    #[error("WAV decode error: {0}")]
    WavDecode(#[from] hound::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Creates an invalid-container error.
    pub fn invalid(container: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidContainer {
            container,
            message: message.into(),
        }
    }

    /// Creates an unsupported-layout error.
    pub fn unsupported(container: &'static str, message: impl Into<String>) -> Self {
        Self::UnsupportedLayout {
            container,
            message: message.into(),
        }
    }
}
