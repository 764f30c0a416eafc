//! The "Hi" acceptance scenario and speech source behavior.

use mimika_audio::{AudioPipeline, SourceInput};
use mimika_core::SourceKind;
use mimika_media::read_wav;
use mimika_tests::{settle_speech, wav_bytes};
use mimika_voice::{synthesize, EncodeWorker, SAMPLE_RATE};

#[test]
fn test_hi_duration_and_container_length() {
    let speech = synthesize("Hi").unwrap();

    // Two letters, one word: max(2*0.06, 0.9) content + 1*0.08 pause.
    let expected = (2.0f64 * 0.06).max(0.9) + 0.08;
    assert!(
        (speech.duration_seconds - expected).abs() < 1e-6,
        "duration {} vs {}",
        speech.duration_seconds,
        expected
    );

    let worker = EncodeWorker::spawn();
    let sample_count = speech.samples.len();
    let encoded = worker
        .submit(speech.samples, speech.sample_rate)
        .unwrap()
        .wait()
        .unwrap();

    // Container byte length = 44 + sampleCount * 2.
    assert_eq!(encoded.wav_bytes.len(), 44 + sample_count * 2);

    // Round trip: same count, same rate, 16-bit-bounded error.
    let decoded = read_wav(&encoded.wav_bytes).unwrap();
    assert_eq!(decoded.samples.len(), sample_count);
    assert_eq!(decoded.sample_rate, SAMPLE_RATE);
}

#[test]
fn test_generated_speech_becomes_the_source() {
    let mut pipeline = AudioPipeline::new();

    // Load an upload first, then replace it with speech.
    pipeline
        .load_source(SourceInput::AudioUpload {
            label: "before.wav".into(),
            bytes: wav_bytes(&vec![0.2; 4800], 48_000),
        })
        .unwrap();
    assert_eq!(pipeline.meta().unwrap().kind, SourceKind::Upload);

    pipeline.generate_speech("Hi").unwrap();
    settle_speech(&mut pipeline);

    let meta = pipeline.meta().unwrap().clone();
    assert_eq!(meta.kind, SourceKind::Synthesized);
    assert_eq!(meta.label, "Hi");
    assert!((meta.duration_seconds - 0.98).abs() < 0.01);

    // The playable duration matches the plan, and playback through the
    // first burst produces nonzero levels.
    pipeline.toggle_play().unwrap();
    pipeline.tick(0.05);
    assert!(pipeline.sample_level() > 0.0);
}

#[test]
fn test_speech_failure_preserves_current_source() {
    let mut pipeline = AudioPipeline::new();
    pipeline
        .load_source(SourceInput::AudioUpload {
            label: "keep-me.wav".into(),
            bytes: wav_bytes(&vec![0.2; 4800], 48_000),
        })
        .unwrap();

    // Rejected synchronously: nothing queued, source untouched.
    assert!(pipeline.generate_speech("!!!").is_err());
    assert!(!pipeline.has_pending_speech());
    assert_eq!(pipeline.meta().unwrap().label, "keep-me.wav");
    assert!(pipeline.take_faults().is_empty());
}

#[test]
fn test_rapid_speech_requests_last_writer_wins() {
    let mut pipeline = AudioPipeline::new();
    pipeline.generate_speech("first request").unwrap();
    pipeline.generate_speech("second request").unwrap();
    settle_speech(&mut pipeline);

    // The second request replaced the first before it landed.
    assert_eq!(pipeline.meta().unwrap().label, "second request");
}
