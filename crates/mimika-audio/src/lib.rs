//! mimika audio pipeline.
//!
//! Turns a media source (uploaded audio file, the audio track of an
//! uploaded video, or synthesized speech) into three things:
//!
//! 1. an audible playback path (gain → level tap → speaker sink),
//! 2. a continuously updated amplitude scalar the animator reads every
//!    frame ([`AudioPipeline::sample_level`]),
//! 3. a capturable output stream the export pipeline records
//!    ([`AudioPipeline::capture_stream`]).
//!
//! The pipeline exclusively owns the media buffer and the analysis graph.
//! Loading a new source fully tears down the previous graph before
//! reconnecting, so rapid repeated loads cannot leak graph nodes.
//!
//! # Modules
//!
//! - [`context`]: audio context lifecycle (suspended / running / closed)
//! - [`graph`]: the analysis node chain and its sinks
//! - [`transport`]: play/pause/seek/stop over a virtual clock
//! - [`pipeline`]: the pipeline facade tying everything together
//! - [`error`]: audio error type

pub mod context;
pub mod error;
pub mod graph;
pub mod pipeline;
pub mod transport;

pub use context::{AudioContext, ContextOptions, ContextState};
pub use error::{AudioError, AudioResult};
pub use graph::{AnalysisGraph, CaptureStream, LEVEL_WINDOW};
pub use pipeline::{AudioPipeline, SourceInput};
pub use transport::Transport;
