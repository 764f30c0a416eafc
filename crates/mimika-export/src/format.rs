//! The two supported recording encodings.

use mimika_media::VideoCodec;

/// Video/audio pairings the recorder can produce.
///
/// Both mux into an AVI container with 16-bit PCM audio. The raw pairing
/// is the royalty-free default and always available; MJPEG is the
/// best-effort alternative and only present when the `mjpeg` feature is
/// compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingFormat {
    /// Uncompressed BGR24 video + PCM audio (default).
    Raw,
    /// MJPEG video + PCM audio (experimental).
    Mjpeg,
}

impl RecordingFormat {
    /// Whether this build can encode the format.
    pub fn is_supported(&self) -> bool {
        match self {
            RecordingFormat::Raw => true,
            RecordingFormat::Mjpeg => cfg!(feature = "mjpeg"),
        }
    }

    /// Container extension for downloaded files.
    pub fn extension(&self) -> &'static str {
        "avi"
    }

    /// Mux-level codec selector.
    pub fn codec(&self) -> VideoCodec {
        match self {
            RecordingFormat::Raw => VideoCodec::RawBgr24,
            RecordingFormat::Mjpeg => VideoCodec::Mjpeg,
        }
    }

    /// Human-readable description for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            RecordingFormat::Raw => "AVI (raw BGR24 + PCM)",
            RecordingFormat::Mjpeg => "AVI (MJPEG + PCM)",
        }
    }
}

impl Default for RecordingFormat {
    fn default() -> Self {
        RecordingFormat::Raw
    }
}
