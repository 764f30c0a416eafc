//! AVI mux/demux round-trip tests.

use pretty_assertions::assert_eq;

use super::*;
use crate::pcm::samples_to_pcm16;

fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        pixels.extend_from_slice(&rgba);
    }
    rgba_to_bgr24_bottom_up(&pixels, width, height)
}

#[test]
fn test_video_only_round_trip() {
    let mut writer = AviWriter::new(32, 24, 60, VideoCodec::RawBgr24).unwrap();
    for i in 0..10 {
        writer
            .push_frame(solid_frame(32, 24, [i * 20, 0, 0, 255]))
            .unwrap();
    }
    let bytes = writer.finish(None).unwrap();

    let info = read_info(&bytes).unwrap();
    assert_eq!(info.width, 32);
    assert_eq!(info.height, 24);
    assert_eq!(info.fps, 60);
    assert_eq!(info.video_frames, 10);
    assert_eq!(&info.video_handler, b"DIB ");
    assert_eq!(info.audio, None);
}

#[test]
fn test_av_round_trip_preserves_audio() {
    let sample_rate = 48_000u32;
    let samples: Vec<f32> = (0..sample_rate / 2)
        .map(|i| ((i as f32) * 0.01).sin() * 0.5)
        .collect();

    let mut writer = AviWriter::new(16, 16, 60, VideoCodec::RawBgr24).unwrap();
    for _ in 0..30 {
        writer.push_frame(solid_frame(16, 16, [0, 128, 0, 255])).unwrap();
    }
    let bytes = writer
        .finish(Some(AviAudio {
            sample_rate,
            pcm: samples_to_pcm16(&samples),
        }))
        .unwrap();

    let info = read_info(&bytes).unwrap();
    let audio = info.audio.expect("audio stream present");
    assert_eq!(audio.sample_rate, sample_rate);
    assert_eq!(audio.channels, 1);
    assert_eq!(audio.bits_per_sample, 16);

    let (extracted, rate) = extract_audio_track(&bytes).unwrap();
    assert_eq!(rate, sample_rate);
    assert_eq!(extracted.len(), samples.len());
    for (a, b) in samples.iter().zip(extracted.iter()) {
        assert!((a - b).abs() <= 1.0 / 32768.0);
    }
}

#[test]
fn test_extract_audio_rejects_video_only() {
    let mut writer = AviWriter::new(16, 16, 30, VideoCodec::RawBgr24).unwrap();
    writer.push_frame(solid_frame(16, 16, [0, 0, 0, 255])).unwrap();
    let bytes = writer.finish(None).unwrap();

    assert!(extract_audio_track(&bytes).is_err());
}

#[test]
fn test_raw_frame_payload_length_checked() {
    let mut writer = AviWriter::new(32, 24, 60, VideoCodec::RawBgr24).unwrap();
    assert!(writer.push_frame(vec![0u8; 7]).is_err());
}

#[test]
fn test_mjpeg_payload_taken_as_is() {
    // The muxer does not inspect JPEG payloads; any bytes go through.
    let mut writer = AviWriter::new(32, 24, 30, VideoCodec::Mjpeg).unwrap();
    writer.push_frame(vec![0xFF, 0xD8, 0xFF, 0xD9]).unwrap();
    let bytes = writer.finish(None).unwrap();

    let info = read_info(&bytes).unwrap();
    assert_eq!(&info.video_handler, b"MJPG");
    assert_eq!(info.video_frames, 1);
}

#[test]
fn test_empty_recording_rejected() {
    let writer = AviWriter::new(32, 24, 60, VideoCodec::RawBgr24).unwrap();
    assert!(writer.finish(None).is_err());
}

#[test]
fn test_garbage_rejected() {
    assert!(read_info(b"RIFFxxxxWAVE").is_err());
    assert!(read_info(b"").is_err());
}

#[test]
fn test_bgr_conversion_flips_and_pads() {
    // 2x2 RGBA: top row red, bottom row blue.
    let rgba = [
        255, 0, 0, 255, 255, 0, 0, 255, //
        0, 0, 255, 255, 0, 0, 255, 255,
    ];
    let bgr = rgba_to_bgr24_bottom_up(&rgba, 2, 2);

    // Stride pads 6 bytes up to 8 per row.
    assert_eq!(bgr.len(), 16);
    // First stored row is the bottom image row (blue): B=255, G=0, R=0.
    assert_eq!(&bgr[0..3], &[255, 0, 0]);
    // Second stored row is the top image row (red): B=0, G=0, R=255.
    assert_eq!(&bgr[8..11], &[0, 0, 255]);
}
