//! AVI container reader.
//!
//! Walks the chunk tree without decoding video payloads. Used by tests to
//! verify exported files and by the audio pipeline to pull the sound track
//! out of an uploaded video.

use crate::error::{MediaError, MediaResult};
use crate::pcm::pcm16_to_samples;

/// Audio stream parameters from the `strf` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AviStreamAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

/// What the reader learned about a file.
#[derive(Debug, Clone, PartialEq)]
pub struct AviInfo {
    pub width: u32,
    pub height: u32,
    /// Frames per second, from the main header's frame period.
    pub fps: u32,
    /// Video chunks counted in the movi list.
    pub video_frames: u32,
    /// Video handler fourcc from `strh` (e.g. "DIB " or "MJPG").
    pub video_handler: [u8; 4],
    /// Audio stream parameters, when an audio stream exists.
    pub audio: Option<AviStreamAudio>,
}

/// Parses container structure and stream headers.
pub fn read_info(bytes: &[u8]) -> MediaResult<AviInfo> {
    let mut walker = Walker::open(bytes)?;

    let mut width = 0u32;
    let mut height = 0u32;
    let mut fps = 0u32;
    let mut video_frames = 0u32;
    let mut video_handler = [0u8; 4];
    let mut audio = None;

    while let Some(chunk) = walker.next_chunk()? {
        match &chunk.id {
            b"LIST" => match chunk.list_type()? {
                b"hdrl" => {
                    parse_hdrl(
                        chunk.list_payload(),
                        &mut width,
                        &mut height,
                        &mut fps,
                        &mut video_handler,
                        &mut audio,
                    )?;
                }
                b"movi" => {
                    video_frames = count_video_chunks(chunk.list_payload())?;
                }
                _ => {}
            },
            _ => {} // idx1 and any vendor chunks
        }
    }

    if width == 0 || height == 0 {
        return Err(MediaError::invalid("avi", "missing or empty hdrl list"));
    }

    Ok(AviInfo {
        width,
        height,
        fps,
        video_frames,
        video_handler,
        audio,
    })
}

/// Extracts the audio track as mono f32 samples plus its sample rate.
///
/// # Errors
/// Fails when the file has no audio stream, or when the stream is not the
/// 16-bit PCM layout our own muxer writes.
pub fn extract_audio_track(bytes: &[u8]) -> MediaResult<(Vec<f32>, u32)> {
    let info = read_info(bytes)?;
    let audio = info
        .audio
        .ok_or_else(|| MediaError::unsupported("avi", "no audio stream"))?;

    if audio.bits_per_sample != 16 {
        return Err(MediaError::unsupported(
            "avi",
            format!("{}-bit audio (expected 16-bit PCM)", audio.bits_per_sample),
        ));
    }

    let mut pcm = Vec::new();
    let mut walker = Walker::open(bytes)?;
    while let Some(chunk) = walker.next_chunk()? {
        if &chunk.id == b"LIST" && chunk.list_type()? == b"movi" {
            collect_audio_chunks(chunk.list_payload(), &mut pcm)?;
        }
    }

    let mut samples = pcm16_to_samples(&pcm);
    if audio.channels > 1 {
        samples = fold_channels(&samples, audio.channels as usize);
    }
    Ok((samples, audio.sample_rate))
}

fn fold_channels(samples: &[f32], channels: usize) -> Vec<f32> {
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

fn parse_hdrl(
    payload: &[u8],
    width: &mut u32,
    height: &mut u32,
    fps: &mut u32,
    video_handler: &mut [u8; 4],
    audio: &mut Option<AviStreamAudio>,
) -> MediaResult<()> {
    let mut walker = Walker::over(payload);
    while let Some(chunk) = walker.next_chunk()? {
        match &chunk.id {
            b"avih" => {
                let avih = chunk.payload;
                if avih.len() < 40 {
                    return Err(MediaError::invalid("avi", "truncated avih chunk"));
                }
                let micros = read_u32(avih, 0);
                *fps = if micros > 0 { 1_000_000 / micros } else { 0 };
                *width = read_u32(avih, 32);
                *height = read_u32(avih, 36);
            }
            b"LIST" if chunk.list_type()? == b"strl" => {
                parse_strl(chunk.list_payload(), video_handler, audio)?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn parse_strl(
    payload: &[u8],
    video_handler: &mut [u8; 4],
    audio: &mut Option<AviStreamAudio>,
) -> MediaResult<()> {
    let mut walker = Walker::over(payload);
    let mut stream_type = [0u8; 4];

    while let Some(chunk) = walker.next_chunk()? {
        match &chunk.id {
            b"strh" => {
                if chunk.payload.len() < 8 {
                    return Err(MediaError::invalid("avi", "truncated strh chunk"));
                }
                stream_type.copy_from_slice(&chunk.payload[0..4]);
                if &stream_type == b"vids" {
                    video_handler.copy_from_slice(&chunk.payload[4..8]);
                }
            }
            b"strf" if &stream_type == b"auds" => {
                let strf = chunk.payload;
                if strf.len() < 16 {
                    return Err(MediaError::invalid("avi", "truncated audio strf chunk"));
                }
                *audio = Some(AviStreamAudio {
                    channels: read_u16(strf, 2),
                    sample_rate: read_u32(strf, 4),
                    bits_per_sample: read_u16(strf, 14),
                });
            }
            _ => {}
        }
    }
    Ok(())
}

fn count_video_chunks(payload: &[u8]) -> MediaResult<u32> {
    let mut walker = Walker::over(payload);
    let mut count = 0u32;
    while let Some(chunk) = walker.next_chunk()? {
        if chunk.id.ends_with(b"db") || chunk.id.ends_with(b"dc") {
            count += 1;
        }
    }
    Ok(count)
}

fn collect_audio_chunks(payload: &[u8], pcm: &mut Vec<u8>) -> MediaResult<()> {
    let mut walker = Walker::over(payload);
    while let Some(chunk) = walker.next_chunk()? {
        if chunk.id.ends_with(b"wb") {
            pcm.extend_from_slice(chunk.payload);
        }
    }
    Ok(())
}

/// One parsed chunk: id plus payload slice.
struct Chunk<'a> {
    id: [u8; 4],
    payload: &'a [u8],
}

impl<'a> Chunk<'a> {
    /// For LIST chunks: the list type fourcc.
    fn list_type(&self) -> MediaResult<&[u8; 4]> {
        if self.payload.len() < 4 {
            return Err(MediaError::invalid("avi", "truncated LIST chunk"));
        }
        Ok(self.payload[0..4].try_into().unwrap())
    }

    /// For LIST chunks: the payload after the list type fourcc.
    fn list_payload(&self) -> &'a [u8] {
        &self.payload[4..]
    }
}

/// Sequential chunk walker over a RIFF byte range.
struct Walker<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Walker<'a> {
    /// Opens a top-level AVI file, validating the RIFF signature.
    fn open(bytes: &'a [u8]) -> MediaResult<Self> {
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"AVI " {
            return Err(MediaError::invalid("avi", "not a RIFF AVI file"));
        }
        let declared = read_u32(bytes, 4) as usize;
        let end = (8 + declared).min(bytes.len());
        Ok(Self {
            data: &bytes[..end],
            pos: 12,
        })
    }

    /// Walks an already-extracted chunk payload.
    fn over(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn next_chunk(&mut self) -> MediaResult<Option<Chunk<'a>>> {
        if self.pos + 8 > self.data.len() {
            return Ok(None);
        }

        let id: [u8; 4] = self.data[self.pos..self.pos + 4].try_into().unwrap();
        let size = read_u32(self.data, self.pos + 4) as usize;
        let start = self.pos + 8;
        let end = start + size;
        if end > self.data.len() {
            return Err(MediaError::invalid(
                "avi",
                format!("chunk {:?} overruns the file", String::from_utf8_lossy(&id)),
            ));
        }

        // Chunks are word-aligned; skip the pad byte on odd sizes.
        self.pos = end + (size % 2);

        Ok(Some(Chunk {
            id,
            payload: &self.data[start..end],
        }))
    }
}

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes(data[offset..offset + 2].try_into().unwrap())
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}
