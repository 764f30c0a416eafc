//! Worker-offloaded WAV encoding.
//!
//! Container encoding is the one piece of synthesis heavy enough to drop
//! animation frames, so it runs on a dedicated thread. The caller transfers
//! ownership of the sample buffer into the worker's channel and gets the
//! finished container back through a job handle; nothing is shared.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

use mimika_media::{samples_to_pcm16, write_wav_to_vec, WavFormat};

use crate::error::{VoiceError, VoiceResult};

/// A finished encode: playable container bytes plus what they contain.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAudio {
    /// Complete WAV file bytes.
    pub wav_bytes: Vec<u8>,
    pub sample_rate: u32,
    pub sample_count: usize,
}

struct EncodeRequest {
    samples: Vec<f32>,
    sample_rate: u32,
    reply: Sender<VoiceResult<EncodedAudio>>,
}

/// Handle to one submitted encode.
///
/// Dropping the handle abandons the result; the worker keeps running.
#[derive(Debug)]
pub struct EncodeJob {
    receiver: Receiver<VoiceResult<EncodedAudio>>,
}

impl EncodeJob {
    /// Blocks until the worker replies.
    pub fn wait(self) -> VoiceResult<EncodedAudio> {
        self.receiver
            .recv()
            .unwrap_or(Err(VoiceError::WorkerUnavailable))
    }

    /// Non-blocking poll, for callers pumping a frame loop.
    ///
    /// Returns `None` while the encode is still in flight.
    pub fn poll(&self) -> Option<VoiceResult<EncodedAudio>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(VoiceError::WorkerUnavailable)),
        }
    }
}

/// The background encode worker.
///
/// One worker serves a whole session; jobs queue in submission order.
/// Dropping the worker closes the channel and joins the thread.
#[derive(Debug)]
pub struct EncodeWorker {
    sender: Option<Sender<EncodeRequest>>,
    handle: Option<JoinHandle<()>>,
}

impl EncodeWorker {
    /// Spawns the worker thread.
    pub fn spawn() -> Self {
        let (sender, receiver) = channel::<EncodeRequest>();

        let handle = std::thread::spawn(move || {
            while let Ok(request) = receiver.recv() {
                let result = encode_wav(request.samples, request.sample_rate);
                if let Err(err) = &result {
                    log::warn!("encode worker: {}", err);
                }
                // The submitter may have dropped its job handle; that is
                // not the worker's problem.
                let _ = request.reply.send(result);
            }
        });

        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    /// Submits a buffer for encoding, transferring its ownership.
    pub fn submit(&self, samples: Vec<f32>, sample_rate: u32) -> VoiceResult<EncodeJob> {
        let sender = self.sender.as_ref().ok_or(VoiceError::WorkerUnavailable)?;
        let (reply, receiver) = channel();

        sender
            .send(EncodeRequest {
                samples,
                sample_rate,
                reply,
            })
            .map_err(|_| VoiceError::WorkerUnavailable)?;

        Ok(EncodeJob { receiver })
    }
}

impl Drop for EncodeWorker {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Synchronous encode used by the worker (and directly by tests).
pub fn encode_wav(samples: Vec<f32>, sample_rate: u32) -> VoiceResult<EncodedAudio> {
    if sample_rate == 0 {
        return Err(VoiceError::encode("zero sample rate"));
    }
    if samples.is_empty() {
        return Err(VoiceError::encode("empty sample buffer"));
    }

    let sample_count = samples.len();
    let pcm = samples_to_pcm16(&samples);
    let wav_bytes = write_wav_to_vec(&WavFormat::mono16(sample_rate), &pcm);

    Ok(EncodedAudio {
        wav_bytes,
        sample_rate,
        sample_count,
    })
}
