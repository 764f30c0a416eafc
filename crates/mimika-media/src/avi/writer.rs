//! AVI container writer.

use crate::error::{MediaError, MediaResult};

/// Video encodings the muxer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoCodec {
    /// Uncompressed bottom-up BGR24 (`DIB ` handler, `00db` chunks).
    RawBgr24,
    /// Motion JPEG (`MJPG` handler, `00dc` chunks); each frame payload is
    /// a complete baseline JPEG.
    Mjpeg,
}

impl VideoCodec {
    /// Stream handler fourcc for `strh`.
    fn handler(&self) -> &'static [u8; 4] {
        match self {
            VideoCodec::RawBgr24 => b"DIB ",
            VideoCodec::Mjpeg => b"MJPG",
        }
    }

    /// `biCompression` value for `strf`.
    fn compression(&self) -> u32 {
        match self {
            VideoCodec::RawBgr24 => 0, // BI_RGB
            VideoCodec::Mjpeg => u32::from_le_bytes(*b"MJPG"),
        }
    }

    /// movi chunk id for frames of this codec.
    fn chunk_id(&self) -> &'static [u8; 4] {
        match self {
            VideoCodec::RawBgr24 => b"00db",
            VideoCodec::Mjpeg => b"00dc",
        }
    }
}

/// Mono 16-bit PCM track to interleave with the video.
#[derive(Debug, Clone)]
pub struct AviAudio {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Little-endian 16-bit mono PCM bytes.
    pub pcm: Vec<u8>,
}

/// Incremental AVI muxer.
///
/// Frames are pushed as they are captured; `finish` lays out the container
/// in one pass and returns the complete file bytes.
#[derive(Debug)]
pub struct AviWriter {
    width: u32,
    height: u32,
    fps: u32,
    codec: VideoCodec,
    frames: Vec<Vec<u8>>,
}

impl AviWriter {
    /// Creates a muxer for the given frame geometry and rate.
    pub fn new(width: u32, height: u32, fps: u32, codec: VideoCodec) -> MediaResult<Self> {
        if width == 0 || height == 0 {
            return Err(MediaError::invalid("avi", "zero frame dimension"));
        }
        if fps == 0 {
            return Err(MediaError::invalid("avi", "zero frame rate"));
        }
        Ok(Self {
            width,
            height,
            fps,
            codec,
            frames: Vec::new(),
        })
    }

    /// Appends one encoded frame payload.
    ///
    /// For [`VideoCodec::RawBgr24`] the payload length must match the
    /// padded BGR24 geometry exactly; MJPEG payloads are taken as-is.
    pub fn push_frame(&mut self, payload: Vec<u8>) -> MediaResult<()> {
        if self.codec == VideoCodec::RawBgr24 {
            let expected = raw_frame_size(self.width, self.height);
            if payload.len() != expected {
                return Err(MediaError::invalid(
                    "avi",
                    format!(
                        "raw frame payload is {} bytes, expected {} for {}x{}",
                        payload.len(),
                        expected,
                        self.width,
                        self.height
                    ),
                ));
            }
        }
        self.frames.push(payload);
        Ok(())
    }

    /// Number of frames pushed so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Lays out the container and returns the file bytes.
    ///
    /// When an audio track is supplied it is sliced into one `01wb` chunk
    /// per video frame; the remainder rides along with the last frame.
    pub fn finish(self, audio: Option<AviAudio>) -> MediaResult<Vec<u8>> {
        if self.frames.is_empty() {
            return Err(MediaError::invalid("avi", "no frames to write"));
        }
        if let Some(a) = &audio {
            if a.sample_rate == 0 {
                return Err(MediaError::invalid("avi", "zero audio sample rate"));
            }
        }

        let audio_slices = audio
            .as_ref()
            .map(|a| slice_audio(&a.pcm, a.sample_rate, self.fps, self.frames.len()));

        // movi payload and the index entries that describe it. Offsets are
        // relative to the position of the 'movi' fourcc; the first chunk
        // therefore sits at offset 4.
        let mut movi = Vec::new();
        movi.extend_from_slice(b"movi");
        let mut index: Vec<(&'static [u8; 4], u32, u32)> = Vec::new();
        let mut max_chunk = 0usize;

        for (i, frame) in self.frames.iter().enumerate() {
            let offset = movi.len() as u32;
            index.push((self.codec.chunk_id(), offset, frame.len() as u32));
            append_chunk(&mut movi, self.codec.chunk_id(), frame);
            max_chunk = max_chunk.max(frame.len());

            if let Some(slices) = &audio_slices {
                let slice = &slices[i];
                if !slice.is_empty() {
                    let offset = movi.len() as u32;
                    index.push((b"01wb", offset, slice.len() as u32));
                    append_chunk(&mut movi, b"01wb", slice);
                    max_chunk = max_chunk.max(slice.len());
                }
            }
        }

        let mut idx1 = Vec::with_capacity(index.len() * 16);
        for (id, offset, size) in &index {
            idx1.extend_from_slice(*id);
            idx1.extend_from_slice(&0x10u32.to_le_bytes()); // AVIIF_KEYFRAME
            idx1.extend_from_slice(&offset.to_le_bytes());
            idx1.extend_from_slice(&size.to_le_bytes());
        }

        let hdrl = self.build_hdrl(audio.as_ref(), max_chunk as u32);

        // Assemble the RIFF file: hdrl list, movi list, idx1 chunk.
        let mut body = Vec::new();
        append_chunk(&mut body, b"LIST", &hdrl);
        append_chunk(&mut body, b"LIST", &movi);
        append_chunk(&mut body, b"idx1", &idx1);

        let mut file = Vec::with_capacity(12 + body.len());
        file.extend_from_slice(b"RIFF");
        file.extend_from_slice(&((body.len() + 4) as u32).to_le_bytes());
        file.extend_from_slice(b"AVI ");
        file.extend_from_slice(&body);
        Ok(file)
    }

    /// Builds the `hdrl` list payload (starting with its fourcc).
    fn build_hdrl(&self, audio: Option<&AviAudio>, max_chunk: u32) -> Vec<u8> {
        let frames = self.frames.len() as u32;
        let streams: u32 = if audio.is_some() { 2 } else { 1 };
        let video_byte_rate = raw_frame_size(self.width, self.height) as u32 * self.fps;
        let audio_byte_rate = audio.map(|a| a.sample_rate * 2).unwrap_or(0);

        // AVIF_HASINDEX, plus AVIF_ISINTERLEAVED when audio rides along.
        let flags = if audio.is_some() { 0x0110 } else { 0x0010 };

        let mut avih = Vec::with_capacity(56);
        push_u32(&mut avih, 1_000_000 / self.fps);
        push_u32(&mut avih, video_byte_rate + audio_byte_rate);
        push_u32(&mut avih, 0); // padding granularity
        push_u32(&mut avih, flags);
        push_u32(&mut avih, frames);
        push_u32(&mut avih, 0); // initial frames
        push_u32(&mut avih, streams);
        push_u32(&mut avih, max_chunk);
        push_u32(&mut avih, self.width);
        push_u32(&mut avih, self.height);
        avih.extend_from_slice(&[0u8; 16]); // reserved

        let mut hdrl = Vec::new();
        hdrl.extend_from_slice(b"hdrl");
        append_chunk(&mut hdrl, b"avih", &avih);

        // Video stream list.
        let mut strl = Vec::new();
        strl.extend_from_slice(b"strl");
        append_chunk(&mut strl, b"strh", &self.video_strh(frames, max_chunk));
        append_chunk(&mut strl, b"strf", &self.video_strf());
        append_chunk(&mut hdrl, b"LIST", &strl);

        // Audio stream list, when present.
        if let Some(a) = audio {
            let mut strl = Vec::new();
            strl.extend_from_slice(b"strl");
            append_chunk(&mut strl, b"strh", &audio_strh(a, max_chunk));
            append_chunk(&mut strl, b"strf", &audio_strf(a));
            append_chunk(&mut hdrl, b"LIST", &strl);
        }

        hdrl
    }

    fn video_strh(&self, frames: u32, max_chunk: u32) -> Vec<u8> {
        let mut strh = Vec::with_capacity(56);
        strh.extend_from_slice(b"vids");
        strh.extend_from_slice(self.codec.handler());
        push_u32(&mut strh, 0); // flags
        push_u16(&mut strh, 0); // priority
        push_u16(&mut strh, 0); // language
        push_u32(&mut strh, 0); // initial frames
        push_u32(&mut strh, 1); // scale
        push_u32(&mut strh, self.fps); // rate: rate/scale = fps
        push_u32(&mut strh, 0); // start
        push_u32(&mut strh, frames);
        push_u32(&mut strh, max_chunk);
        push_u32(&mut strh, u32::MAX); // quality: driver default
        push_u32(&mut strh, 0); // sample size: one chunk per frame
        push_u16(&mut strh, 0); // rcFrame
        push_u16(&mut strh, 0);
        push_u16(&mut strh, self.width as u16);
        push_u16(&mut strh, self.height as u16);
        strh
    }

    fn video_strf(&self) -> Vec<u8> {
        let size_image = raw_frame_size(self.width, self.height) as u32;
        let mut strf = Vec::with_capacity(40);
        push_u32(&mut strf, 40); // biSize
        push_u32(&mut strf, self.width);
        push_u32(&mut strf, self.height);
        push_u16(&mut strf, 1); // planes
        push_u16(&mut strf, 24); // bit count
        push_u32(&mut strf, self.codec.compression());
        push_u32(&mut strf, size_image);
        push_u32(&mut strf, 0); // x pixels per meter
        push_u32(&mut strf, 0); // y pixels per meter
        push_u32(&mut strf, 0); // colors used
        push_u32(&mut strf, 0); // colors important
        strf
    }
}

fn audio_strh(audio: &AviAudio, max_chunk: u32) -> Vec<u8> {
    let total_samples = (audio.pcm.len() / 2) as u32;
    let mut strh = Vec::with_capacity(56);
    strh.extend_from_slice(b"auds");
    push_u32(&mut strh, 0); // no handler
    push_u32(&mut strh, 0); // flags
    push_u16(&mut strh, 0);
    push_u16(&mut strh, 0);
    push_u32(&mut strh, 0);
    push_u32(&mut strh, 1); // scale
    push_u32(&mut strh, audio.sample_rate); // rate/scale = samples per second
    push_u32(&mut strh, 0); // start
    push_u32(&mut strh, total_samples);
    push_u32(&mut strh, max_chunk);
    push_u32(&mut strh, u32::MAX);
    push_u32(&mut strh, 2); // sample size: block align
    strh.extend_from_slice(&[0u8; 8]); // rcFrame unused for audio
    strh
}

fn audio_strf(audio: &AviAudio) -> Vec<u8> {
    let mut strf = Vec::with_capacity(16);
    push_u16(&mut strf, 1); // WAVE_FORMAT_PCM
    push_u16(&mut strf, 1); // mono
    push_u32(&mut strf, audio.sample_rate);
    push_u32(&mut strf, audio.sample_rate * 2);
    push_u16(&mut strf, 2); // block align
    push_u16(&mut strf, 16); // bits per sample
    strf
}

/// Splits a PCM byte buffer into one slice per frame.
///
/// Each slice holds `sample_rate / fps` whole samples; the division
/// remainder accumulates and the final slice absorbs whatever is left so
/// no audio is dropped.
fn slice_audio(pcm: &[u8], sample_rate: u32, fps: u32, frames: usize) -> Vec<Vec<u8>> {
    let bytes_per_frame = (sample_rate as usize / fps as usize) * 2;
    let mut slices = Vec::with_capacity(frames);
    let mut cursor = 0usize;

    for i in 0..frames {
        let end = if i + 1 == frames {
            pcm.len()
        } else {
            (cursor + bytes_per_frame).min(pcm.len())
        };
        // Keep sample alignment.
        let end = end - (end - cursor) % 2;
        slices.push(pcm[cursor..end].to_vec());
        cursor = end;
    }

    slices
}

/// Payload size of one uncompressed BGR24 frame with 4-byte row padding.
pub(crate) fn raw_frame_size(width: u32, height: u32) -> usize {
    let stride = (width as usize * 3 + 3) & !3;
    stride * height as usize
}

/// Converts a row-major RGBA8 buffer to bottom-up padded BGR24.
///
/// This is the payload layout `DIB ` frames use.
pub fn rgba_to_bgr24_bottom_up(rgba: &[u8], width: u32, height: u32) -> Vec<u8> {
    let w = width as usize;
    let h = height as usize;
    let stride = (w * 3 + 3) & !3;
    let mut out = vec![0u8; stride * h];

    for y in 0..h {
        let src_row = y * w * 4;
        let dst_row = (h - 1 - y) * stride;
        for x in 0..w {
            let src = src_row + x * 4;
            let dst = dst_row + x * 3;
            out[dst] = rgba[src + 2]; // B
            out[dst + 1] = rgba[src + 1]; // G
            out[dst + 2] = rgba[src]; // R
        }
    }

    out
}

fn push_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_le_bytes());
}

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

/// Appends `id size payload [pad]`.
fn append_chunk(buf: &mut Vec<u8>, id: &[u8; 4], payload: &[u8]) {
    buf.extend_from_slice(id);
    buf.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    buf.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        buf.push(0);
    }
}
