//! Shared helpers for the mimika end-to-end tests.

use mimika_audio::AudioPipeline;

/// Milliseconds per simulated display frame (60 Hz).
pub const FRAME_MS: f64 = 1000.0 / 60.0;

/// Pumps pipeline ticks until a pending speech encode resolves.
///
/// Panics if the worker never answers; the encode of test-sized inputs
/// finishes in well under the allotted second.
pub fn settle_speech(pipeline: &mut AudioPipeline) {
    for _ in 0..1000 {
        pipeline.tick(0.0);
        if !pipeline.has_pending_speech() {
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
    panic!("speech encode never settled");
}

/// Builds a WAV upload byte buffer from mono samples.
pub fn wav_bytes(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    mimika_media::write_wav_to_vec(
        &mimika_media::WavFormat::mono16(sample_rate),
        &mimika_media::samples_to_pcm16(samples),
    )
}
