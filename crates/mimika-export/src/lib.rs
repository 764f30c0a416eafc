//! mimika capture/export pipeline.
//!
//! Records the rendered canvas plus the audio pipeline's capturable
//! stream into a downloadable AVI. Capture runs at a fixed 60 fps target:
//! frames delivered faster than the cadence are dropped, gaps are filled
//! by repeating the previous frame, and the audio track is drained
//! alongside so the mux stays in sync.
//!
//! Recorder lifecycle: `Idle → Recording → Processing → Complete`, with
//! `Error` reachable from `Idle` or `Recording`; a new
//! [`Recorder::start_recording`] call is the only way out of `Complete`.
//!
//! # Modules
//!
//! - [`format`]: the two supported encodings and their capabilities
//! - [`recorder`]: the recorder state machine and muxing
//! - [`download`]: unique timestamped filenames for repeated exports
//! - [`error`]: export error type

pub mod download;
pub mod error;
pub mod format;
pub mod recorder;

pub use download::DownloadArtifact;
pub use error::{ExportError, ExportResult};
pub use format::RecordingFormat;
pub use recorder::{DownloadHandle, Recorder, RecorderOptions, RecorderPhase, StopOutcome};
