//! The audio pipeline facade.

use mimika_core::error::Fault;
use mimika_core::{AudioSourceMeta, SourceKind};
use mimika_media::avi::extract_audio_track;
use mimika_media::wav::read_wav;
use mimika_voice::{synthesize, EncodeJob, EncodeWorker};

use crate::context::{AudioContext, ContextOptions};
use crate::error::{AudioError, AudioResult};
use crate::graph::{AnalysisGraph, CaptureStream};
use crate::transport::Transport;

/// A media source handed to [`AudioPipeline::load_source`].
#[derive(Debug, Clone)]
pub enum SourceInput {
    /// An uploaded audio file (WAV bytes).
    AudioUpload { label: String, bytes: Vec<u8> },
    /// An uploaded video file (AVI bytes); only its audio track is used.
    VideoUpload { label: String, bytes: Vec<u8> },
}

/// Decoded media the transport plays over.
#[derive(Debug, Clone, PartialEq)]
struct MediaBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl MediaBuffer {
    fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// A speech synthesis whose container encode is still in flight.
#[derive(Debug)]
struct PendingSpeech {
    job: EncodeJob,
    label: String,
}

/// Owns the media buffer, the analysis graph, and the transport.
///
/// One pipeline instance serves one avatar session. All methods run on the
/// session's scheduling context; the only background activity is the voice
/// encode worker, reached exclusively through channels.
#[derive(Debug)]
pub struct AudioPipeline {
    context_options: ContextOptions,
    context: Option<AudioContext>,
    graph: Option<AnalysisGraph>,
    media: Option<MediaBuffer>,
    meta: Option<AudioSourceMeta>,
    transport: Transport,
    worker: EncodeWorker,
    pending_speech: Option<PendingSpeech>,
    encoded_speech: Option<mimika_voice::EncodedAudio>,
    faults: Vec<Fault>,
    load_counter: u64,
}

impl AudioPipeline {
    /// A pipeline with default context options.
    pub fn new() -> Self {
        Self::with_options(ContextOptions::default())
    }

    /// A pipeline whose lazily-built contexts use the given options.
    pub fn with_options(context_options: ContextOptions) -> Self {
        Self {
            context_options,
            context: None,
            graph: None,
            media: None,
            meta: None,
            transport: Transport::default(),
            worker: EncodeWorker::spawn(),
            pending_speech: None,
            encoded_speech: None,
            faults: Vec::new(),
            load_counter: 0,
        }
    }

    /// Loads a new source, replacing whatever was loaded before.
    ///
    /// The existing analysis graph is fully torn down before the new
    /// source is installed, so calling this repeatedly in quick
    /// succession cannot leak graph resources. A decode failure leaves
    /// the previous source in place.
    pub fn load_source(&mut self, input: SourceInput) -> AudioResult<()> {
        let (kind, label, media) = match input {
            SourceInput::AudioUpload { label, bytes } => {
                let decoded = read_wav(&bytes)?;
                (
                    SourceKind::Upload,
                    label,
                    MediaBuffer {
                        samples: decoded.samples,
                        sample_rate: decoded.sample_rate,
                    },
                )
            }
            SourceInput::VideoUpload { label, bytes } => {
                let (samples, sample_rate) = extract_audio_track(&bytes)?;
                (
                    SourceKind::Video,
                    label,
                    MediaBuffer {
                        samples,
                        sample_rate,
                    },
                )
            }
        };

        self.install_source(kind, label, media);
        Ok(())
    }

    /// Synthesizes speech from `text` and queues it as the next source.
    ///
    /// Synthesis itself is immediate; the container encode runs on the
    /// worker and the source is swapped in by [`tick`](Self::tick) once
    /// the encode lands. Until then, and if the encode fails, the
    /// current source stays untouched.
    pub fn generate_speech(&mut self, text: &str) -> AudioResult<()> {
        let speech = synthesize(text)?;

        let label: String = text.trim().chars().take(32).collect();
        let job = self.worker.submit(speech.samples, speech.sample_rate)?;

        log::debug!("speech encode queued: {:?}", label);
        self.pending_speech = Some(PendingSpeech { job, label });
        Ok(())
    }

    /// True while a speech encode is still in flight.
    pub fn has_pending_speech(&self) -> bool {
        self.pending_speech.is_some()
    }

    /// The most recent successfully encoded speech container.
    pub fn encoded_speech(&self) -> Option<&mimika_voice::EncodedAudio> {
        self.encoded_speech.as_ref()
    }

    /// Lazily constructs the audio context and the analysis graph.
    pub fn ensure_graph(&mut self) -> AudioResult<()> {
        if self.graph.is_some() {
            return Ok(());
        }

        if self.context.is_none() {
            self.context = Some(AudioContext::new(self.context_options)?);
        }
        let sample_rate = self
            .context
            .as_ref()
            .map(|c| c.sample_rate())
            .unwrap_or(self.context_options.sample_rate);

        log::debug!("analysis graph wired at {} Hz", sample_rate);
        self.graph = Some(AnalysisGraph::new(sample_rate));
        Ok(())
    }

    /// Records the user gesture that unlocks a policy-locked context.
    pub fn unlock(&mut self) {
        self.context_options.gesture_locked = false;
        if let Some(ctx) = &mut self.context {
            ctx.unlock();
        }
    }

    /// Starts or pauses playback; returns the new playing state.
    ///
    /// Starting playback builds the graph on demand and resumes a
    /// suspended context. When the resume is blocked by policy the error
    /// is returned and the transport stays paused.
    pub fn toggle_play(&mut self) -> AudioResult<bool> {
        if self.media.is_none() {
            return Err(AudioError::NoSource);
        }

        if !self.transport.is_playing() {
            self.ensure_graph()?;
            if let Some(ctx) = &mut self.context {
                ctx.resume()?;
            }
        }

        Ok(self.transport.toggle())
    }

    /// Pauses and rewinds to the start.
    pub fn stop(&mut self) {
        self.transport.stop();
    }

    /// Jumps to `time` seconds; non-finite input is a no-op.
    pub fn seek(&mut self, time: f64) {
        self.transport.seek(time);
    }

    pub fn position(&self) -> f64 {
        self.transport.position()
    }

    pub fn duration(&self) -> f64 {
        self.transport.duration()
    }

    pub fn is_playing(&self) -> bool {
        self.transport.is_playing()
    }

    /// Metadata for the currently loaded source.
    pub fn meta(&self) -> Option<&AudioSourceMeta> {
        self.meta.as_ref()
    }

    /// Current amplitude estimate in [0, 1].
    ///
    /// O(window) and non-blocking; safe to call on every animation tick.
    pub fn sample_level(&self) -> f64 {
        self.graph.as_ref().map(|g| g.level()).unwrap_or(0.0)
    }

    /// The recordable sink's stream, or None before the graph exists.
    pub fn capture_stream(&self) -> Option<CaptureStream> {
        self.graph.as_ref().map(|g| g.capture_stream())
    }

    /// Per-frame advance: swaps in finished speech, then feeds the graph
    /// the samples playback covered during `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.poll_pending_speech();

        let (start, end) = self.transport.advance(dt);
        if end <= start {
            return;
        }

        let (Some(media), Some(graph)) = (&self.media, &mut self.graph) else {
            return;
        };

        let rate = media.sample_rate as f64;
        let from = ((start * rate).round() as usize).min(media.samples.len());
        let to = ((end * rate).round() as usize).min(media.samples.len());
        if to > from {
            graph.process(&media.samples[from..to]);
        }
    }

    /// Faults recorded by background completions since the last call.
    pub fn take_faults(&mut self) -> Vec<Fault> {
        std::mem::take(&mut self.faults)
    }

    /// Tears everything down and returns to the initial empty state.
    ///
    /// Safe to call any number of times; every call lands in the same
    /// state.
    pub fn release(&mut self) {
        if let Some(ctx) = &mut self.context {
            ctx.close();
        }
        self.graph = None;
        self.context = None;
        self.media = None;
        self.meta = None;
        self.transport = Transport::default();
        self.pending_speech = None;
        self.encoded_speech = None;
        self.faults.clear();
        log::debug!("audio pipeline released");
    }

    fn install_source(&mut self, kind: SourceKind, label: String, media: MediaBuffer) {
        // Full disconnect before reconnect.
        self.graph = None;
        self.pending_speech = None;

        self.load_counter += 1;
        let locator = format!("{}:{}", kind_tag(kind), self.load_counter);
        let duration = media.duration_seconds();

        log::info!(
            "source loaded: {:?} ({:.2}s) as {}",
            label,
            duration,
            locator
        );

        self.meta = Some(AudioSourceMeta::new(kind, label, duration, locator));
        self.media = Some(media);
        self.transport = Transport::new(duration);
    }

    fn poll_pending_speech(&mut self) {
        let Some(pending) = &self.pending_speech else {
            return;
        };
        let Some(result) = pending.job.poll() else {
            return;
        };
        let pending = self.pending_speech.take().expect("pending speech present");

        match result {
            Ok(encoded) => {
                // Play what the container actually holds, exactly as a
                // media element sourced from the encoded file would.
                match read_wav(&encoded.wav_bytes) {
                    Ok(decoded) => {
                        self.install_source(
                            SourceKind::Synthesized,
                            pending.label,
                            MediaBuffer {
                                samples: decoded.samples,
                                sample_rate: decoded.sample_rate,
                            },
                        );
                        self.encoded_speech = Some(encoded);
                    }
                    Err(err) => {
                        let err = AudioError::from(err);
                        log::warn!("synthesized speech unreadable: {}", err);
                        self.faults.push(Fault::from_error(&err));
                    }
                }
            }
            Err(err) => {
                let err = AudioError::from(err);
                log::warn!("speech encode failed: {}", err);
                self.faults.push(Fault::from_error(&err));
            }
        }
    }
}

impl Default for AudioPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_tag(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Upload => "upload",
        SourceKind::Synthesized => "speech",
        SourceKind::Video => "video",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimika_media::avi::{AviAudio, AviWriter, VideoCodec};
    use mimika_media::{samples_to_pcm16, write_wav_to_vec, WavFormat};

    fn wav_upload(samples: &[f32], rate: u32) -> SourceInput {
        SourceInput::AudioUpload {
            label: "clip.wav".into(),
            bytes: write_wav_to_vec(&WavFormat::mono16(rate), &samples_to_pcm16(samples)),
        }
    }

    /// Pumps ticks until the pending speech resolves.
    fn settle_speech(pipeline: &mut AudioPipeline) {
        for _ in 0..1000 {
            pipeline.tick(0.0);
            if !pipeline.has_pending_speech() {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        panic!("speech encode never settled");
    }

    #[test]
    fn test_load_upload_sets_meta_and_duration() {
        let mut p = AudioPipeline::new();
        p.load_source(wav_upload(&vec![0.5; 24_000], 48_000)).unwrap();

        let meta = p.meta().unwrap();
        assert_eq!(meta.kind, SourceKind::Upload);
        assert_eq!(meta.label, "clip.wav");
        assert!((p.duration() - 0.5).abs() < 1e-6);
        assert!(!p.is_playing());
    }

    #[test]
    fn test_bad_upload_keeps_previous_source() {
        let mut p = AudioPipeline::new();
        p.load_source(wav_upload(&vec![0.5; 4800], 48_000)).unwrap();

        let err = p.load_source(SourceInput::AudioUpload {
            label: "junk".into(),
            bytes: b"not audio".to_vec(),
        });
        assert!(err.is_err());
        assert_eq!(p.meta().unwrap().label, "clip.wav");
    }

    #[test]
    fn test_video_upload_extracts_audio_track() {
        let samples: Vec<f32> = (0..48_000).map(|i| ((i as f32) * 0.01).sin() * 0.4).collect();
        let mut writer = AviWriter::new(16, 16, 60, VideoCodec::RawBgr24).unwrap();
        let frame = mimika_media::avi::rgba_to_bgr24_bottom_up(&vec![0u8; 16 * 16 * 4], 16, 16);
        for _ in 0..60 {
            writer.push_frame(frame.clone()).unwrap();
        }
        let avi = writer
            .finish(Some(AviAudio {
                sample_rate: 48_000,
                pcm: samples_to_pcm16(&samples),
            }))
            .unwrap();

        let mut p = AudioPipeline::new();
        p.load_source(SourceInput::VideoUpload {
            label: "take.avi".into(),
            bytes: avi,
        })
        .unwrap();

        assert_eq!(p.meta().unwrap().kind, SourceKind::Video);
        assert!((p.duration() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_playback_feeds_level() {
        let mut p = AudioPipeline::new();
        p.load_source(wav_upload(&vec![0.25; 48_000], 48_000)).unwrap();

        assert_eq!(p.sample_level(), 0.0);
        assert!(p.toggle_play().unwrap());

        p.tick(0.1);
        // Constant 0.25 signal: RMS 0.25 * 8 clamps to 1.0.
        assert!((p.sample_level() - 1.0).abs() < 1e-6);
        assert!((p.position() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_without_source_errors() {
        let mut p = AudioPipeline::new();
        assert!(matches!(p.toggle_play(), Err(AudioError::NoSource)));
    }

    #[test]
    fn test_policy_lock_blocks_play_until_unlock() {
        let mut p = AudioPipeline::with_options(ContextOptions {
            gesture_locked: true,
            ..ContextOptions::default()
        });
        p.load_source(wav_upload(&vec![0.5; 4800], 48_000)).unwrap();

        assert!(matches!(p.toggle_play(), Err(AudioError::BlockedByPolicy)));
        assert!(!p.is_playing());

        p.unlock();
        assert!(p.toggle_play().unwrap());
    }

    #[test]
    fn test_generate_speech_swaps_source_on_completion() {
        let mut p = AudioPipeline::new();
        p.generate_speech("hello there").unwrap();
        assert!(p.has_pending_speech());

        settle_speech(&mut p);

        let meta = p.meta().unwrap();
        assert_eq!(meta.kind, SourceKind::Synthesized);
        assert!(meta.duration_seconds > 0.9);
        assert!(p.encoded_speech().is_some());
        assert!(p.take_faults().is_empty());
    }

    #[test]
    fn test_empty_text_rejected_without_state_change() {
        let mut p = AudioPipeline::new();
        p.load_source(wav_upload(&vec![0.5; 4800], 48_000)).unwrap();

        assert!(matches!(
            p.generate_speech("12 34 !"),
            Err(AudioError::EmptyText)
        ));
        assert!(!p.has_pending_speech());
        assert_eq!(p.meta().unwrap().kind, SourceKind::Upload);
    }

    #[test]
    fn test_capture_stream_absent_before_graph() {
        let mut p = AudioPipeline::new();
        assert!(p.capture_stream().is_none());
        p.ensure_graph().unwrap();
        assert!(p.capture_stream().is_some());
    }

    #[test]
    fn test_repeated_loads_reset_graph() {
        let mut p = AudioPipeline::new();
        for i in 0..5 {
            p.load_source(wav_upload(&vec![0.1; 4800], 48_000)).unwrap();
            assert!(p.capture_stream().is_none(), "load {} left a graph", i);
        }
    }

    #[test]
    fn test_release_twice_identical_empty_state() {
        let mut p = AudioPipeline::new();
        p.load_source(wav_upload(&vec![0.5; 48_000], 48_000)).unwrap();
        p.toggle_play().unwrap();
        p.tick(0.25);

        for _ in 0..2 {
            p.release();
            assert!(p.meta().is_none());
            assert!(p.capture_stream().is_none());
            assert_eq!(p.sample_level(), 0.0);
            assert_eq!(p.position(), 0.0);
            assert_eq!(p.duration(), 0.0);
            assert!(!p.is_playing());
            assert!(!p.has_pending_speech());
        }
    }

    #[test]
    fn test_seek_non_finite_is_noop() {
        let mut p = AudioPipeline::new();
        p.load_source(wav_upload(&vec![0.5; 48_000], 48_000)).unwrap();
        p.seek(0.25);
        p.seek(f64::NAN);
        p.seek(f64::INFINITY);
        assert!((p.position() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_unsupported_context_surfaces_cleanly() {
        let mut p = AudioPipeline::with_options(ContextOptions {
            sample_rate: 0,
            ..ContextOptions::default()
        });
        p.load_source(wav_upload(&vec![0.5; 4800], 48_000)).unwrap();

        assert!(matches!(
            p.toggle_play(),
            Err(AudioError::Unsupported { .. })
        ));
        assert!(!p.is_playing());
    }
}
