//! Linear-PCM WAV encoding and decoding.
//!
//! The writer emits mono 16-bit PCM with no timestamps or variable
//! metadata, so identical sample buffers produce identical files. The
//! reader accepts uploaded WAVs in any common PCM layout and folds them
//! down to mono f32.

mod format;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use format::WavFormat;
pub use reader::{read_wav, DecodedWav};
pub use writer::{write_wav, write_wav_to_vec};
