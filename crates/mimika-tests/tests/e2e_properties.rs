//! Cross-crate property checks from the acceptance list.

use mimika_audio::AudioPipeline;
use mimika_core::{CameraAngle, EmotionState, PoseState, Vec2};
use mimika_stage::camera::preset;
use mimika_stage::{derive_frame_params, FrameInputs, SceneState, StageConfig, StageSession};
use mimika_tests::{wav_bytes, FRAME_MS};

#[test]
fn test_mouth_open_clamped_at_named_boundaries() {
    // level=1, surprised=100 must not exceed 1; happy=0, sad=100 must
    // not go below 0.
    let loud = derive_frame_params(&FrameInputs {
        audio_level: 1.0,
        emotion: EmotionState::new(0.0, 0.0, 0.0, 100.0, 0.0),
        head_nod: 0.0,
        hand_gesture: 0.0,
        camera_offset_x: 0.0,
    });
    assert_eq!(loud.mouth_open, 1.0);

    let glum = derive_frame_params(&FrameInputs {
        audio_level: 0.0,
        emotion: EmotionState::new(0.0, 100.0, 0.0, 0.0, 0.0),
        head_nod: 0.0,
        hand_gesture: 0.0,
        camera_offset_x: 0.0,
    });
    assert_eq!(glum.mouth_open, 0.0);
}

#[test]
fn test_close_up_preset_exact_values() {
    let p = preset(CameraAngle::CloseUp);
    assert_eq!(p.scale, 1.18);
    assert_eq!(p.y_fraction, 0.45);
}

#[test]
fn test_blink_bounded_through_a_long_session() {
    // Small canvas keeps the loop about the state machines, not pixels.
    let mut stage = StageSession::new(StageConfig {
        width: 96,
        height: 128,
        seed: 21,
    });
    let mut scene = SceneState::default();
    scene.pose = PoseState::new(8.0, Vec2::new(0.4, -0.2), 1.2, CameraAngle::CloseUp);
    scene.emotion = EmotionState::new(60.0, 10.0, 5.0, 30.0, 0.0);

    // Over a hundred simulated seconds at 60 Hz with varying audio.
    for i in 0..6_400u64 {
        let now = i as f64 * FRAME_MS;
        let level = ((i as f64 * 0.05).sin() * 0.5 + 0.5).clamp(0.0, 1.0);
        stage.render_frame(now, &scene, level);
        let blink = stage.blink_state();
        assert!(
            (0.0..=1.0).contains(&blink.openness),
            "openness {} at frame {}",
            blink.openness,
            i
        );
    }
    assert_eq!(stage.frame_count(), 6_400);
}

#[test]
fn test_release_idempotence_observable_state() {
    let mut pipeline = AudioPipeline::new();
    pipeline
        .load_source(mimika_audio::SourceInput::AudioUpload {
            label: "x.wav".into(),
            bytes: wav_bytes(&vec![0.4; 48_000], 48_000),
        })
        .unwrap();
    pipeline.toggle_play().unwrap();
    pipeline.tick(0.5);

    pipeline.release();
    let snapshot = (
        pipeline.meta().cloned(),
        pipeline.position(),
        pipeline.duration(),
        pipeline.is_playing(),
        pipeline.sample_level(),
        pipeline.capture_stream().is_some(),
    );

    pipeline.release();
    let again = (
        pipeline.meta().cloned(),
        pipeline.position(),
        pipeline.duration(),
        pipeline.is_playing(),
        pipeline.sample_level(),
        pipeline.capture_stream().is_some(),
    );

    assert_eq!(snapshot, again);
    assert_eq!(snapshot.0, None);
    assert!(!snapshot.5);
}

#[test]
fn test_seek_non_finite_noops_via_public_surface() {
    let mut pipeline = AudioPipeline::new();
    pipeline
        .load_source(mimika_audio::SourceInput::AudioUpload {
            label: "x.wav".into(),
            bytes: wav_bytes(&vec![0.4; 96_000], 48_000),
        })
        .unwrap();

    pipeline.seek(1.5);
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        pipeline.seek(bad);
        assert!((pipeline.position() - 1.5).abs() < 1e-9);
    }
}
