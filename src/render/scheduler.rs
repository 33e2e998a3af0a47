//! Display-frame callback scheduling.
//!
//! The host (a window, a script replayer, a test) owns the actual display
//! clock. Each time it is ready to present it calls [`FrameScheduler::take`]
//! and, if a callback was requested, runs the animation tick with the current
//! timestamp.

/// Identifies one requested callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Single-slot "request animation frame" queue.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a callback on the next display frame.
    ///
    /// Replaces any callback still pending so at most one is ever queued.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    /// Cancel `handle` if it is the pending callback.
    pub fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    /// Remove and return the pending callback, if any.
    pub fn take(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }
}
