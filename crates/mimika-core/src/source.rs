//! Audio source metadata.

use serde::{Deserialize, Serialize};

/// How the current source entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Uploaded audio file.
    Upload,
    /// Procedurally synthesized speech.
    Synthesized,
    /// Audio track extracted from an uploaded video file.
    Video,
}

/// Metadata for the currently loaded source.
///
/// Created when a source is loaded, replaced wholesale on each new load,
/// and dropped on release. Never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSourceMeta {
    pub kind: SourceKind,
    /// Display label, e.g. the uploaded filename or a synthesis excerpt.
    pub label: String,
    /// Media duration in seconds.
    pub duration_seconds: f64,
    /// Opaque locator for the media data (upload id, synthesis id).
    pub locator: String,
}

impl AudioSourceMeta {
    pub fn new(
        kind: SourceKind,
        label: impl Into<String>,
        duration_seconds: f64,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            label: label.into(),
            duration_seconds,
            locator: locator.into(),
        }
    }
}
