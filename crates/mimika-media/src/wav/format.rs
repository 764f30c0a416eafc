//! WAV format parameters.

/// Format parameters for a PCM WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (16 for everything we emit).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Mono 16-bit at the given rate, the synthesizer's output format.
    pub fn mono16(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Bytes per second of audio data.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Bytes per sample frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono16_derived_fields() {
        let fmt = WavFormat::mono16(48_000);
        assert_eq!(fmt.block_align(), 2);
        assert_eq!(fmt.byte_rate(), 96_000);
    }

    #[test]
    fn test_stereo_block_align() {
        let fmt = WavFormat {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
        };
        assert_eq!(fmt.block_align(), 4);
        assert_eq!(fmt.byte_rate(), 176_400);
    }
}
