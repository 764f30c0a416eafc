//! WAV round-trip and header layout tests.

use pretty_assertions::assert_eq;

use super::*;
use crate::pcm::{pcm16_to_samples, samples_to_pcm16};

#[test]
fn test_header_layout_exact() {
    let format = WavFormat::mono16(48_000);
    let pcm = samples_to_pcm16(&[0.0f32; 100]);
    let bytes = write_wav_to_vec(&format, &pcm);

    // 44-byte header plus 2 bytes per sample.
    assert_eq!(bytes.len(), 44 + 200);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(&bytes[12..16], b"fmt ");
    assert_eq!(&bytes[36..40], b"data");

    // RIFF size = file length - 8.
    let riff_size = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    assert_eq!(riff_size as usize, bytes.len() - 8);

    // fmt fields: PCM, mono, 48kHz, byte rate 96000, block align 2, 16 bit.
    assert_eq!(u16::from_le_bytes(bytes[20..22].try_into().unwrap()), 1);
    assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 1);
    assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 48_000);
    assert_eq!(u32::from_le_bytes(bytes[28..32].try_into().unwrap()), 96_000);
    assert_eq!(u16::from_le_bytes(bytes[32..34].try_into().unwrap()), 2);
    assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);

    // data size covers exactly the PCM payload.
    let data_size = u32::from_le_bytes(bytes[40..44].try_into().unwrap());
    assert_eq!(data_size as usize, pcm.len());
}

#[test]
fn test_write_is_deterministic() {
    let format = WavFormat::mono16(48_000);
    let samples: Vec<f32> = (0..2048).map(|i| ((i as f32) * 0.02).sin()).collect();
    let pcm = samples_to_pcm16(&samples);

    let a = write_wav_to_vec(&format, &pcm);
    let b = write_wav_to_vec(&format, &pcm);
    assert_eq!(a, b);
}

#[test]
fn test_round_trip_preserves_count_rate_and_values() {
    let rate = 48_000;
    let samples: Vec<f32> = (0..4800)
        .map(|i| ((i as f32) * 0.005).sin() * 0.8)
        .collect();

    let bytes = write_wav_to_vec(&WavFormat::mono16(rate), &samples_to_pcm16(&samples));
    let decoded = read_wav(&bytes).unwrap();

    assert_eq!(decoded.sample_rate, rate);
    assert_eq!(decoded.samples.len(), samples.len());
    for (a, b) in samples.iter().zip(decoded.samples.iter()) {
        assert!((a - b).abs() <= 1.0 / 32768.0);
    }
}

#[test]
fn test_stereo_upload_folds_to_mono() {
    // Interleave L = 0.5, R = -0.5; the fold should land on silence.
    let mut pcm = Vec::new();
    for _ in 0..100 {
        pcm.extend_from_slice(&samples_to_pcm16(&[0.5]));
        pcm.extend_from_slice(&samples_to_pcm16(&[-0.5]));
    }
    let format = WavFormat {
        channels: 2,
        sample_rate: 44_100,
        bits_per_sample: 16,
    };
    let bytes = write_wav_to_vec(&format, &pcm);

    let decoded = read_wav(&bytes).unwrap();
    assert_eq!(decoded.samples.len(), 100);
    for s in &decoded.samples {
        assert!(s.abs() < 1e-3);
    }
}

#[test]
fn test_garbage_rejected() {
    assert!(read_wav(b"definitely not a wav file").is_err());
    assert!(read_wav(&[]).is_err());
}

#[test]
fn test_duration() {
    let decoded = DecodedWav {
        samples: vec![0.0; 24_000],
        sample_rate: 48_000,
    };
    assert!((decoded.duration_seconds() - 0.5).abs() < 1e-9);
}

#[test]
fn test_pcm_round_trip_bound() {
    let samples: Vec<f32> = (0..256).map(|i| (i as f32 / 128.0) - 1.0).collect();
    let back = pcm16_to_samples(&samples_to_pcm16(&samples));
    for (a, b) in samples.iter().zip(back.iter()) {
        assert!((a - b).abs() <= 1.0 / 32768.0);
    }
}
