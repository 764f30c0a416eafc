//! The analysis node chain: gain → level tap → speaker + recordable sinks.

use std::sync::{Arc, Mutex};

/// Time-domain window the level tap keeps for RMS analysis.
pub const LEVEL_WINDOW: usize = 1024;

/// Fixed gain applied to the raw RMS before clamping to [0, 1].
const LEVEL_GAIN: f64 = 8.0;

/// Ring buffer of the most recent samples flowing through the graph.
///
/// The window starts zero-filled, matching an analyser that reports
/// silence until real samples arrive.
#[derive(Debug)]
struct LevelTap {
    window: [f32; LEVEL_WINDOW],
    write: usize,
}

impl LevelTap {
    fn new() -> Self {
        Self {
            window: [0.0; LEVEL_WINDOW],
            write: 0,
        }
    }

    fn push(&mut self, samples: &[f32]) {
        for &s in samples {
            self.window[self.write] = s;
            self.write = (self.write + 1) % LEVEL_WINDOW;
        }
    }

    /// Root-mean-square over the whole window, scaled and clamped.
    fn level(&self) -> f64 {
        let mut sum_sq = 0.0f64;
        for &s in &self.window {
            sum_sq += (s as f64) * (s as f64);
        }
        let rms = (sum_sq / LEVEL_WINDOW as f64).sqrt();
        (rms * LEVEL_GAIN).clamp(0.0, 1.0)
    }

    fn clear(&mut self) {
        self.window = [0.0; LEVEL_WINDOW];
        self.write = 0;
    }
}

/// Terminal playback sink.
///
/// Actual device output belongs to the embedding shell; the sink counts
/// what it was handed so the graph topology and its ordering guarantees
/// stay observable.
#[derive(Debug, Default)]
struct SpeakerSink {
    frames_rendered: u64,
}

/// Live handle to the recordable sink's stream.
///
/// Cloning is cheap; all clones drain the same shared buffer. The export
/// pipeline drains it once per captured frame.
#[derive(Debug, Clone)]
pub struct CaptureStream {
    shared: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
}

impl CaptureStream {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Takes everything accumulated since the last drain.
    pub fn drain(&self) -> Vec<f32> {
        let mut guard = self.shared.lock().expect("capture stream poisoned");
        std::mem::take(&mut *guard)
    }

    /// Samples currently buffered.
    pub fn pending(&self) -> usize {
        self.shared.lock().expect("capture stream poisoned").len()
    }
}

/// The wired-up node chain.
#[derive(Debug)]
pub struct AnalysisGraph {
    gain: f64,
    tap: LevelTap,
    speaker: SpeakerSink,
    record: Arc<Mutex<Vec<f32>>>,
    sample_rate: u32,
}

impl AnalysisGraph {
    /// Wires gain → tap → {speaker, recordable sink}.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            gain: 1.0,
            tap: LevelTap::new(),
            speaker: SpeakerSink::default(),
            record: Arc::new(Mutex::new(Vec::new())),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f64) {
        self.gain = gain.max(0.0);
    }

    /// Pushes a block of source samples through the chain.
    pub fn process(&mut self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }

        if (self.gain - 1.0).abs() < 1e-12 {
            self.distribute(samples);
        } else {
            let scaled: Vec<f32> = samples.iter().map(|&s| s * self.gain as f32).collect();
            self.distribute(&scaled);
        }
    }

    fn distribute(&mut self, samples: &[f32]) {
        self.tap.push(samples);
        self.speaker.frames_rendered += samples.len() as u64;
        self.record
            .lock()
            .expect("record sink poisoned")
            .extend_from_slice(samples);
    }

    /// Current amplitude estimate in [0, 1].
    pub fn level(&self) -> f64 {
        self.tap.level()
    }

    /// Total frames handed to the speaker sink.
    pub fn frames_rendered(&self) -> u64 {
        self.speaker.frames_rendered
    }

    /// A live handle to the recordable sink.
    pub fn capture_stream(&self) -> CaptureStream {
        CaptureStream {
            shared: Arc::clone(&self.record),
            sample_rate: self.sample_rate,
        }
    }

    /// Flushes analysis state without dropping the wiring.
    pub fn reset(&mut self) {
        self.tap.clear();
        self.record.lock().expect("record sink poisoned").clear();
    }
}
