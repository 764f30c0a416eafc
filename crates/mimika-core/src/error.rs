//! Uniform error reporting across mimika components.

/// Trait implemented by every mimika error type.
///
/// Operation failures are surfaced to the embedding UI as a user-visible
/// message plus a stable code, so the shell can decide how to present them
/// (toast, inline hint, retry affordance) without matching on strings.
pub trait FaultCode: std::error::Error {
    /// Get the fault code for reporting.
    ///
    /// Returns a static string like "AUDIO_002", "EXPORT_003", etc.
    /// These codes are stable and can be used for programmatic handling.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the fault.
    ///
    /// Defaults to the `Display` output but is guaranteed to return an
    /// owned String for reporting flexibility.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the component category for grouping related faults.
    ///
    /// Returns a category like "audio", "voice", "stage", "export".
    fn category(&self) -> &'static str;
}

/// A reported fault detached from its source error type.
///
/// Captures code, message, and category from any [`FaultCode`] implementor
/// so callers can hold faults from different components uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Stable fault code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Component category.
    pub category: &'static str,
}

impl Fault {
    /// Captures a fault from any component error.
    pub fn from_error<E: FaultCode>(err: &E) -> Self {
        Self {
            code: err.code(),
            message: err.message(),
            category: err.category(),
        }
    }
}

impl std::fmt::Display for Fault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}
