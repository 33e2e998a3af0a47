//! The animated-image encoder seam.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

use image::RgbaImage;

use crate::error::ExportError;
use crate::types::Colour;

/// Settings an encoder is created with.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderConfig {
    /// Background worker threads; 0 encodes synchronously on finish.
    pub workers: usize,
    /// 1 (best, slowest) to 30.
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    /// Colour transparent frame pixels are flattened onto.
    pub background: Colour,
}

/// An encoder accepting successive frames and producing one encoded image.
pub trait FrameEncoder {
    /// Queue a frame. The encoder keeps its own copy of the pixels, so the
    /// caller may overwrite `frame` straight away.
    fn add_frame(&mut self, frame: &RgbaImage, delay: Duration);

    /// Finish encoding. The returned job settles exactly once.
    fn finish(self) -> EncodeJob;
}

enum JobState {
    Ready(Option<Result<Vec<u8>, ExportError>>),
    Pending {
        rx: Receiver<Result<Vec<u8>, ExportError>>,
        worker: Option<JoinHandle<()>>,
    },
}

/// A single-shot pending encoder result: finished with bytes, or aborted.
pub struct EncodeJob {
    state: JobState,
}

impl EncodeJob {
    /// A job that has already settled.
    pub fn ready(result: Result<Vec<u8>, ExportError>) -> Self {
        Self {
            state: JobState::Ready(Some(result)),
        }
    }

    /// A job settled by whoever holds the returned sender.
    pub fn channel() -> (mpsc::SyncSender<Result<Vec<u8>, ExportError>>, Self) {
        let (tx, rx) = mpsc::sync_channel(1);
        (
            tx,
            Self {
                state: JobState::Pending { rx, worker: None },
            },
        )
    }

    /// Run `encode` on a worker thread.
    pub fn spawn<F>(encode: F) -> Self
    where
        F: FnOnce() -> Result<Vec<u8>, ExportError> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let worker = std::thread::Builder::new()
            .name("wiggle-encoder".to_string())
            .spawn(move || {
                let _ = tx.send(encode());
            });

        match worker {
            Ok(handle) => Self {
                state: JobState::Pending {
                    rx,
                    worker: Some(handle),
                },
            },
            Err(e) => Self::ready(Err(ExportError::aborted(format!(
                "could not start encoder worker: {}",
                e
            )))),
        }
    }

    /// Non-blocking check. Returns the outcome once, then `None` forever.
    pub fn poll(&mut self) -> Option<Result<Vec<u8>, ExportError>> {
        match &mut self.state {
            JobState::Ready(slot) => slot.take(),
            JobState::Pending { rx, worker } => {
                let outcome = match rx.try_recv() {
                    Ok(result) => result,
                    Err(TryRecvError::Empty) => return None,
                    Err(TryRecvError::Disconnected) => {
                        Err(ExportError::aborted("encoder stopped without a result"))
                    }
                };
                if let Some(handle) = worker.take() {
                    let _ = handle.join();
                }
                self.state = JobState::Ready(None);
                Some(outcome)
            }
        }
    }

    /// Block until the job settles.
    pub fn wait(mut self) -> Result<Vec<u8>, ExportError> {
        match std::mem::replace(&mut self.state, JobState::Ready(None)) {
            JobState::Ready(Some(result)) => result,
            JobState::Ready(None) => Err(ExportError::aborted("result already taken")),
            JobState::Pending { rx, worker } => {
                let outcome = rx
                    .recv()
                    .unwrap_or_else(|_| Err(ExportError::aborted("encoder stopped without a result")));
                if let Some(handle) = worker {
                    let _ = handle.join();
                }
                outcome
            }
        }
    }
}
