//! The recorder state machine.

use mimika_audio::CaptureStream;
use mimika_media::avi::{rgba_to_bgr24_bottom_up, AviAudio, AviWriter};
use mimika_media::samples_to_pcm16;

use crate::download::{DownloadArtifact, FilenameSeries};
use crate::error::{ExportError, ExportResult};
use crate::format::RecordingFormat;

/// Fixed capture rate.
const CAPTURE_FPS: u32 = 60;
/// Cap on gap-filling duplicates per delivered frame, so one huge stall
/// cannot balloon the recording.
const MAX_GAP_FILL: u64 = 600;

/// Recorder lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderPhase {
    Idle,
    Recording,
    Processing,
    Complete,
    Error,
}

/// Recorder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderOptions {
    pub format: RecordingFormat,
    /// Fall back to the default encoding when the requested one is
    /// unsupported, instead of reporting an error.
    pub allow_fallback: bool,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            format: RecordingFormat::Raw,
            allow_fallback: false,
        }
    }
}

/// What `stop_recording` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// A recording was finalized; the download handle is ready.
    Finalized,
    /// Nothing was recording; informational no-op.
    NothingActive,
}

/// The finished container held for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadHandle {
    pub bytes: Vec<u8>,
    pub format: RecordingFormat,
}

/// State carried only while recording.
#[derive(Debug)]
struct ActiveRecording {
    format: RecordingFormat,
    width: u32,
    height: u32,
    frame_period_ms: f64,
    next_due_ms: f64,
    frames: Vec<Vec<u8>>,
    audio: Option<CaptureStream>,
    audio_pcm: Vec<u8>,
}

/// Records canvas frames plus the audio capture stream into an AVI.
#[derive(Debug)]
pub struct Recorder {
    options: RecorderOptions,
    phase: RecorderPhase,
    active: Option<ActiveRecording>,
    download: Option<DownloadHandle>,
    filenames: FilenameSeries,
}

impl Recorder {
    pub fn new(options: RecorderOptions) -> Self {
        Self {
            options,
            phase: RecorderPhase::Idle,
            active: None,
            download: None,
            filenames: FilenameSeries::default(),
        }
    }

    pub fn phase(&self) -> RecorderPhase {
        self.phase
    }

    /// The held download handle, once a recording has completed.
    pub fn download_handle(&self) -> Option<&DownloadHandle> {
        self.download.as_ref()
    }

    /// Begins capturing at the fixed 60 fps target.
    ///
    /// `audio` is the pipeline's capturable stream when one exists;
    /// samples that accumulated before this call are discarded so the
    /// track starts at the recording boundary.
    ///
    /// # Errors
    /// `AlreadyRecording` while a recording is active (the internal
    /// recorder state is left untouched); `UnsupportedFormat` when the
    /// configured encoding is unavailable and fallback is not allowed.
    pub fn start_recording(
        &mut self,
        width: u32,
        height: u32,
        now_ms: f64,
        audio: Option<CaptureStream>,
    ) -> ExportResult<()> {
        if self.phase == RecorderPhase::Recording {
            return Err(ExportError::AlreadyRecording);
        }

        let format = self.resolve_format()?;

        if width == 0 || height == 0 {
            self.phase = RecorderPhase::Error;
            return Err(ExportError::fault("capture surface has zero size"));
        }

        // Drop pre-roll audio so the track starts here.
        if let Some(stream) = &audio {
            let dropped = stream.drain().len();
            if dropped > 0 {
                log::debug!("discarded {} pre-roll audio samples", dropped);
            }
        }

        log::info!(
            "recording started: {}x{} {} at {} fps{}",
            width,
            height,
            format.describe(),
            CAPTURE_FPS,
            if audio.is_some() { " with audio" } else { "" }
        );

        self.active = Some(ActiveRecording {
            format,
            width,
            height,
            frame_period_ms: 1000.0 / CAPTURE_FPS as f64,
            next_due_ms: now_ms,
            frames: Vec::new(),
            audio,
            audio_pcm: Vec::new(),
        });
        self.phase = RecorderPhase::Recording;
        Ok(())
    }

    /// Offers the current canvas frame (row-major RGBA8) to the capture
    /// cadence.
    ///
    /// Ignored while not recording. Frames ahead of the 60 fps timeline
    /// are dropped; when the clock has moved several periods, the frame
    /// is repeated to fill the gap.
    pub fn push_frame(
        &mut self,
        now_ms: f64,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) -> ExportResult<()> {
        if self.phase != RecorderPhase::Recording {
            return Ok(());
        }
        let (locked_w, locked_h, format) = match &self.active {
            Some(a) => (a.width, a.height, a.format),
            None => return Ok(()),
        };

        if width != locked_w || height != locked_h {
            return self.fail(format!(
                "capture surface changed size ({}x{} -> {}x{})",
                locked_w, locked_h, width, height
            ));
        }
        if rgba.len() != width as usize * height as usize * 4 {
            return self.fail("frame buffer length mismatch".to_string());
        }

        // Keep the audio drained on every offered frame, dropped or not.
        let due = {
            let Some(active) = &mut self.active else {
                return Ok(());
            };
            if let Some(stream) = &active.audio {
                let samples = stream.drain();
                active.audio_pcm.extend_from_slice(&samples_to_pcm16(&samples));
            }
            now_ms + 1e-9 >= active.next_due_ms
        };
        if !due {
            return Ok(()); // ahead of the cadence: drop
        }

        let payload = match encode_frame(format, rgba, width, height) {
            Ok(payload) => payload,
            Err(message) => return self.fail(message),
        };

        let Some(active) = &mut self.active else {
            return Ok(());
        };
        let gap = ((now_ms - active.next_due_ms) / active.frame_period_ms) as u64;
        let copies = (gap + 1).min(MAX_GAP_FILL);
        for _ in 0..copies {
            active.frames.push(payload.clone());
        }
        active.next_due_ms += copies as f64 * active.frame_period_ms;

        Ok(())
    }

    /// Finalizes the recording into a download handle.
    ///
    /// Calling with no active recording is an informational no-op, not
    /// an error.
    pub fn stop_recording(&mut self) -> ExportResult<StopOutcome> {
        if self.phase != RecorderPhase::Recording {
            log::debug!("stop_recording with nothing active");
            return Ok(StopOutcome::NothingActive);
        }
        let Some(mut active) = self.active.take() else {
            self.phase = RecorderPhase::Idle;
            return Ok(StopOutcome::NothingActive);
        };

        self.phase = RecorderPhase::Processing;

        // Final audio drain so the tail is not clipped.
        if let Some(stream) = &active.audio {
            let samples = stream.drain();
            active.audio_pcm.extend_from_slice(&samples_to_pcm16(&samples));
        }

        let result = mux(&active);
        match result {
            Ok(bytes) => {
                log::info!(
                    "recording finalized: {} frames, {} bytes",
                    active.frames.len(),
                    bytes.len()
                );
                // Any previous pending handle is released before the
                // replacement lands.
                self.download = Some(DownloadHandle {
                    bytes,
                    format: active.format,
                });
                self.phase = RecorderPhase::Complete;
                Ok(StopOutcome::Finalized)
            }
            Err(err) => {
                self.phase = RecorderPhase::Error;
                log::warn!("recording mux failed: {}", err);
                Err(ExportError::fault(err.to_string()))
            }
        }
    }

    /// Produces the download artifact with a timestamped unique name.
    ///
    /// # Errors
    /// `NotReady` unless a recording has completed.
    pub fn download(&mut self) -> ExportResult<DownloadArtifact> {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
        self.download_with_timestamp(&stamp)
    }

    /// Timestamp-injectable variant of [`download`](Self::download).
    pub fn download_with_timestamp(&mut self, stamp: &str) -> ExportResult<DownloadArtifact> {
        let handle = self.download.as_ref().ok_or(ExportError::NotReady)?;
        let filename = self.filenames.next(stamp, handle.format.extension());
        Ok(DownloadArtifact {
            filename,
            bytes: handle.bytes.clone(),
        })
    }

    /// Applies the configured format, falling back when allowed.
    fn resolve_format(&mut self) -> ExportResult<RecordingFormat> {
        let requested = self.options.format;
        if requested.is_supported() {
            return Ok(requested);
        }
        if self.options.allow_fallback {
            log::warn!(
                "{} unavailable, falling back to {}",
                requested.describe(),
                RecordingFormat::Raw.describe()
            );
            return Ok(RecordingFormat::Raw);
        }
        self.phase = RecorderPhase::Error;
        Err(ExportError::UnsupportedFormat {
            format: requested.describe().to_string(),
        })
    }

    /// Mid-recording failure: discard partial data, park in Error.
    fn fail(&mut self, message: String) -> ExportResult<()> {
        log::warn!("recorder fault: {}", message);
        self.active = None;
        self.phase = RecorderPhase::Error;
        Err(ExportError::fault(message))
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new(RecorderOptions::default())
    }
}

fn mux(active: &ActiveRecording) -> Result<Vec<u8>, mimika_media::MediaError> {
    let mut writer = AviWriter::new(
        active.width,
        active.height,
        CAPTURE_FPS,
        active.format.codec(),
    )?;
    for frame in &active.frames {
        writer.push_frame(frame.clone())?;
    }

    let audio = active.audio.as_ref().filter(|_| !active.audio_pcm.is_empty());
    let track = audio.map(|stream| AviAudio {
        sample_rate: stream.sample_rate(),
        pcm: active.audio_pcm.clone(),
    });

    writer.finish(track)
}

/// Encodes one RGBA frame into the payload for the active codec.
fn encode_frame(
    format: RecordingFormat,
    rgba: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    match format {
        RecordingFormat::Raw => Ok(rgba_to_bgr24_bottom_up(rgba, width, height)),
        RecordingFormat::Mjpeg => encode_mjpeg(rgba, width, height),
    }
}

#[cfg(feature = "mjpeg")]
fn encode_mjpeg(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
    use image::codecs::jpeg::JpegEncoder;
    use image::ExtendedColorType;

    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[0..3]);
    }

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, 85);
    encoder
        .encode(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| format!("JPEG encode failed: {}", e))?;
    Ok(out)
}

#[cfg(not(feature = "mjpeg"))]
fn encode_mjpeg(_rgba: &[u8], _width: u32, _height: u32) -> Result<Vec<u8>, String> {
    // Unreachable in practice: format resolution rejects MJPEG when the
    // feature is absent.
    Err("MJPEG encoding not compiled in".to_string())
}
