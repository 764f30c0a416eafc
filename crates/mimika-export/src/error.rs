//! Error types for the export pipeline.

use mimika_core::FaultCode;
use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while recording or exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// `start_recording` was called while a recording is active.
    #[error("a recording is already in progress")]
    AlreadyRecording,

    /// The requested encoding is not available in this build.
    #[error("recording format not supported: {format}")]
    UnsupportedFormat {
        /// Human-readable format description.
        format: String,
    },

    /// A failure mid-recording; partial data has been discarded.
    #[error("recorder fault: {message}")]
    RecorderFault {
        /// What went wrong.
        message: String,
    },

    /// There is no finished recording to download.
    #[error("no completed recording to download")]
    NotReady,
}

impl ExportError {
    pub fn fault(message: impl Into<String>) -> Self {
        Self::RecorderFault {
            message: message.into(),
        }
    }
}

impl FaultCode for ExportError {
    fn code(&self) -> &'static str {
        match self {
            ExportError::AlreadyRecording => "EXPORT_001",
            ExportError::UnsupportedFormat { .. } => "EXPORT_002",
            ExportError::RecorderFault { .. } => "EXPORT_003",
            ExportError::NotReady => "EXPORT_004",
        }
    }

    fn category(&self) -> &'static str {
        "export"
    }
}
