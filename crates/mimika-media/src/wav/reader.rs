//! WAV decoding for uploaded audio files.

use std::io::Cursor;

use crate::error::{MediaError, MediaResult};

/// A decoded upload, folded down to mono f32.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedWav {
    /// Mono samples in [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Original sample rate in Hz.
    pub sample_rate: u32,
}

impl DecodedWav {
    /// Media duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decodes a WAV byte buffer to mono f32 samples.
///
/// Multi-channel audio is converted to mono by averaging channels. The
/// original sample rate is preserved and returned alongside the data.
///
/// # Errors
/// Returns an error if the buffer is not a WAV file, uses a non-PCM
/// sample format other than 32-bit float, or an unhandled bit depth.
pub fn read_wav(bytes: &[u8]) -> MediaResult<DecodedWav> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    let mono = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => {
            let samples: Result<Vec<f32>, _> = reader.samples::<f32>().collect();
            fold_to_mono(&samples?, spec.channels, 1.0)
        }
        (hound::SampleFormat::Int, 16) => {
            let samples: Result<Vec<i16>, _> = reader.samples::<i16>().collect();
            let widened: Vec<f32> = samples?.iter().map(|&s| s as f32).collect();
            fold_to_mono(&widened, spec.channels, 32768.0)
        }
        (hound::SampleFormat::Int, 24) | (hound::SampleFormat::Int, 32) => {
            let samples: Result<Vec<i32>, _> = reader.samples::<i32>().collect();
            let widened: Vec<f32> = samples?.iter().map(|&s| s as f32).collect();
            let max = if spec.bits_per_sample == 24 {
                8_388_608.0
            } else {
                2_147_483_648.0
            };
            fold_to_mono(&widened, spec.channels, max)
        }
        (format, bits) => {
            return Err(MediaError::unsupported(
                "wav",
                format!("{:?} samples at {} bits", format, bits),
            ));
        }
    };

    Ok(DecodedWav {
        samples: mono,
        sample_rate: spec.sample_rate,
    })
}

/// Averages interleaved channels into mono, dividing by `scale`.
fn fold_to_mono(samples: &[f32], channels: u16, scale: f32) -> Vec<f32> {
    if channels <= 1 {
        return samples.iter().map(|&s| s / scale).collect();
    }

    let channels = channels as usize;
    let frame_count = samples.len() / channels;
    let mut mono = Vec::with_capacity(frame_count);

    for frame_idx in 0..frame_count {
        let mut sum = 0.0f32;
        for ch in 0..channels {
            sum += samples[frame_idx * channels + ch];
        }
        mono.push(sum / channels as f32 / scale);
    }

    mono
}
