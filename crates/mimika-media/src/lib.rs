//! mimika binary container codecs.
//!
//! Two RIFF-family containers cover everything the system reads or writes:
//!
//! - **WAV**: the synthesizer's output format (mono 16-bit linear PCM) and
//!   the upload format for audio files. The writer produces byte-exact
//!   headers computed from sample count and rate; the reader accepts
//!   arbitrary PCM WAVs (any channel count and common bit depths) and
//!   normalizes them to mono f32.
//! - **AVI**: the export container (uncompressed BGR24 or MJPEG video plus
//!   PCM audio) and the upload format for video files, from which the audio
//!   pipeline extracts the sound track.
//!
//! Everything here is synchronous, allocation-honest, and deterministic:
//! identical inputs produce identical bytes.

pub mod avi;
pub mod error;
pub mod pcm;
pub mod wav;

pub use avi::{AviAudio, AviInfo, AviWriter, VideoCodec};
pub use error::{MediaError, MediaResult};
pub use pcm::{pcm16_to_samples, samples_to_pcm16};
pub use wav::{read_wav, write_wav, write_wav_to_vec, WavFormat};
