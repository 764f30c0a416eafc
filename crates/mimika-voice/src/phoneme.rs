//! Text filtering and per-character timing/pitch planning.

use crate::error::{VoiceError, VoiceResult};

/// Seconds a space contributes to the utterance.
pub const SPACE_SECONDS: f64 = 0.08;
/// Nominal seconds per letter burst.
pub const LETTER_SECONDS: f64 = 0.06;
/// Floor on any single unit's duration.
pub const MIN_UNIT_SECONDS: f64 = 0.04;
/// Minimum voiced content length; very short inputs are padded up to this.
pub const MIN_CONTENT_SECONDS: f64 = 0.9;
/// Extra pause budget appended per word.
pub const WORD_PAUSE_SECONDS: f64 = 0.08;
/// Additive overlap between consecutive bursts.
pub const OVERLAP_SECONDS: f64 = 0.015;

/// One planned unit: a pitched burst for a letter, or a silent gap for a
/// space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhonemeUnit {
    /// Start offset in seconds.
    pub start: f64,
    /// Burst (or gap) length in seconds.
    pub duration: f64,
    /// Base frequency in Hz; None for a silent gap.
    pub base_freq: Option<f64>,
}

/// The full utterance plan.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechPlan {
    pub units: Vec<PhonemeUnit>,
    pub word_count: usize,
    /// Voiced content length (sum of unit durations, floored at
    /// [`MIN_CONTENT_SECONDS`]).
    pub content_seconds: f64,
    /// Content plus the per-word pauses; determines the buffer length.
    pub total_seconds: f64,
}

/// Maps a character code to its base frequency.
///
/// `160 + (code * 13) mod 120` Hz keeps every letter inside a plausible
/// voice band while giving adjacent letters distinct pitches.
pub fn base_frequency(c: char) -> f64 {
    160.0 + ((c as u32).wrapping_mul(13) % 120) as f64
}

/// Builds the utterance plan for the given text.
///
/// The input is lower-cased and filtered to ASCII letters and spaces; a
/// text with no letters at all is rejected as empty.
pub fn plan_speech(text: &str) -> VoiceResult<SpeechPlan> {
    let filtered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect();

    if !filtered.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(VoiceError::EmptyText);
    }

    let word_count = filtered.split_whitespace().count();

    let mut units = Vec::with_capacity(filtered.len());
    let mut cursor = 0.0f64;
    let mut content = 0.0f64;

    for c in filtered.chars() {
        let (duration, base_freq) = if c == ' ' {
            (SPACE_SECONDS, None)
        } else {
            (LETTER_SECONDS.max(MIN_UNIT_SECONDS), Some(base_frequency(c)))
        };

        units.push(PhonemeUnit {
            start: cursor,
            duration,
            base_freq,
        });

        content += duration;
        // Next burst starts before this one ends so there is no audible gap.
        cursor += (duration - OVERLAP_SECONDS).max(0.0);
    }

    let content_seconds = content.max(MIN_CONTENT_SECONDS);
    let total_seconds = content_seconds + WORD_PAUSE_SECONDS * word_count as f64;

    Ok(SpeechPlan {
        units,
        word_count,
        content_seconds,
        total_seconds,
    })
}
