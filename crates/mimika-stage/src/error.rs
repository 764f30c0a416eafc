//! Error types for the animator.

use mimika_core::FaultCode;
use thiserror::Error;

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;

/// Errors that can occur while managing stage resources.
///
/// The render loop itself never fails: missing images and empty inputs
/// degrade to placeholder visuals. Errors only arise on the resource
/// operations around it.
#[derive(Debug, Error)]
pub enum StageError {
    /// Submitted image data does not describe a valid pixel buffer.
    #[error("invalid image data: {message}")]
    BadImage {
        /// Why the buffer was rejected.
        message: String,
    },
}

impl StageError {
    pub fn bad_image(message: impl Into<String>) -> Self {
        Self::BadImage {
            message: message.into(),
        }
    }
}

impl FaultCode for StageError {
    fn code(&self) -> &'static str {
        match self {
            StageError::BadImage { .. } => "STAGE_001",
        }
    }

    fn category(&self) -> &'static str {
        "stage"
    }
}
