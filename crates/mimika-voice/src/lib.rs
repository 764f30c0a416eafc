//! mimika procedural speech synthesizer.
//!
//! Not a speech model: a deterministic waveform generator that gives typed
//! text an audible, mouth-flapping voice. Each filtered character becomes a
//! short harmonic burst whose pitch is derived from the character code;
//! bursts overlap slightly so the result reads as one continuous utterance.
//!
//! The [`encoder`] module owns the background worker that turns the sample
//! buffer into a playable WAV without blocking the render loop: the caller
//! hands buffer ownership to the worker over a channel and receives the
//! encoded container (or an error) back through a job handle.
//!
//! # Modules
//!
//! - [`phoneme`]: text filtering and the per-character timing/pitch plan
//! - [`synth`]: burst synthesis and overlap-add assembly
//! - [`encoder`]: worker-offloaded WAV encoding
//! - [`error`]: voice error type

pub mod encoder;
pub mod error;
pub mod phoneme;
pub mod synth;

pub use encoder::{encode_wav, EncodeJob, EncodeWorker, EncodedAudio};
pub use error::{VoiceError, VoiceResult};
pub use phoneme::{plan_speech, SpeechPlan};
pub use synth::{render_plan, synthesize, SynthesizedSpeech, SAMPLE_RATE};
