//! f32 <-> 16-bit PCM conversion.

/// Converts f32 samples to 16-bit PCM bytes.
///
/// Samples are expected to be in range [-1.0, 1.0]. Values outside this
/// range are clipped.
///
/// # Returns
/// PCM data as little-endian 16-bit samples
pub fn samples_to_pcm16(samples: &[f32]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);

    for &sample in samples {
        let clipped = sample.clamp(-1.0, 1.0);
        let pcm_value = (clipped * 32767.0).round() as i16;
        pcm.extend_from_slice(&pcm_value.to_le_bytes());
    }

    pcm
}

/// Converts little-endian 16-bit PCM bytes back to f32 samples.
///
/// A trailing odd byte, if any, is ignored.
pub fn pcm16_to_samples(pcm: &[u8]) -> Vec<f32> {
    let mut samples = Vec::with_capacity(pcm.len() / 2);

    for chunk in pcm.chunks_exact(2) {
        let value = i16::from_le_bytes([chunk[0], chunk[1]]);
        samples.push(value as f32 / 32768.0);
    }

    samples
}
