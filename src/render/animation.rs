//! Frame-rate-gated animation loop.
//!
//! The loop asks the scheduler for a callback on every display frame but only
//! repaints once `interval` has elapsed since the last repaint, so the wiggle
//! runs at a fixed cadence whatever the host's refresh rate.

use std::time::Duration;

use log::{debug, trace};

use crate::types::WigglePixel;

use super::{FrameHandle, FrameScheduler, Surface};

/// Default time between repaints.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    /// Running with one callback pending.
    Running(FrameHandle),
}

#[derive(Debug)]
pub struct AnimationLoop {
    interval: Duration,
    state: LoopState,
    last_tick: Option<Duration>,
}

impl AnimationLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            state: LoopState::Stopped,
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// Schedule the first callback. No-op when already running or when there
    /// is nothing to animate. Returns whether the loop is now running.
    pub fn start(&mut self, scheduler: &mut FrameScheduler, pixel_count: usize) -> bool {
        if self.is_running() || pixel_count == 0 {
            return self.is_running();
        }
        debug!("animation started with {} pixel(s)", pixel_count);
        self.state = LoopState::Running(scheduler.request());
        true
    }

    /// Cancel the pending callback. Returns whether the loop was running.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) -> bool {
        match self.state {
            LoopState::Running(handle) => {
                scheduler.cancel(handle);
                self.state = LoopState::Stopped;
                debug!("animation stopped");
                true
            }
            LoopState::Stopped => false,
        }
    }

    /// Handle the callback `handle` delivered at `now`.
    ///
    /// Returns whether the surface was repainted. Callbacks that do not match
    /// the pending handle (delivered after a stop) are ignored.
    pub fn tick(
        &mut self,
        handle: FrameHandle,
        now: Duration,
        pixels: &mut [WigglePixel],
        surface: &mut Surface,
        scheduler: &mut FrameScheduler,
    ) -> bool {
        if self.state != LoopState::Running(handle) {
            trace!("ignoring stale frame callback {:?}", handle);
            return false;
        }

        let last = *self.last_tick.get_or_insert(now);
        let repaint = now.saturating_sub(last) >= self.interval;

        if repaint {
            surface.clear();
            for pixel in pixels.iter_mut() {
                pixel.advance_frame();
                pixel.render(surface);
            }
            self.last_tick = Some(now);
        }

        self.state = LoopState::Running(scheduler.request());
        repaint
    }
}

impl Default for AnimationLoop {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Point, WigglePixel, PLUS};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn pixels() -> Vec<WigglePixel> {
        vec![WigglePixel::new(Point::new(3.0, 3.0), Colour::BLACK, &PLUS)]
    }

    #[test]
    fn test_start_requires_pixels() {
        let mut scheduler = FrameScheduler::new();
        let mut animation = AnimationLoop::default();

        assert!(!animation.start(&mut scheduler, 0));
        assert_eq!(animation.state(), LoopState::Stopped);
        assert!(scheduler.pending().is_none());

        assert!(animation.start(&mut scheduler, 1));
        assert!(animation.is_running());
        assert!(scheduler.pending().is_some());
    }

    #[test]
    fn test_start_twice_keeps_single_callback() {
        let mut scheduler = FrameScheduler::new();
        let mut animation = AnimationLoop::default();

        animation.start(&mut scheduler, 1);
        let first = scheduler.pending();
        animation.start(&mut scheduler, 2);

        assert_eq!(scheduler.pending(), first);
        assert_eq!(animation.state(), LoopState::Running(first.unwrap()));
    }

    #[test]
    fn test_tick_repaints_only_after_interval() {
        let mut scheduler = FrameScheduler::new();
        let mut animation = AnimationLoop::new(ms(60));
        let mut surface = Surface::new(8, 8);
        let mut pixels = pixels();

        animation.start(&mut scheduler, pixels.len());

        // First callback only establishes the baseline.
        let h = scheduler.take().unwrap();
        assert!(!animation.tick(h, ms(1000), &mut pixels, &mut surface, &mut scheduler));
        assert_eq!(pixels[0].current_frame(), 0);

        let h = scheduler.take().unwrap();
        assert!(!animation.tick(h, ms(1030), &mut pixels, &mut surface, &mut scheduler));
        assert!(surface.is_blank());

        let h = scheduler.take().unwrap();
        assert!(animation.tick(h, ms(1060), &mut pixels, &mut surface, &mut scheduler));
        assert_eq!(pixels[0].current_frame(), 1);
        assert!(!surface.is_blank());

        // Baseline moved to 1060.
        let h = scheduler.take().unwrap();
        assert!(!animation.tick(h, ms(1100), &mut pixels, &mut surface, &mut scheduler));
        let h = scheduler.take().unwrap();
        assert!(animation.tick(h, ms(1120), &mut pixels, &mut surface, &mut scheduler));
        assert_eq!(pixels[0].current_frame(), 2);
    }

    #[test]
    fn test_tick_always_reschedules_one_callback() {
        let mut scheduler = FrameScheduler::new();
        let mut animation = AnimationLoop::default();
        let mut surface = Surface::new(8, 8);
        let mut pixels = pixels();

        animation.start(&mut scheduler, 1);
        for t in 0..5 {
            let h = scheduler.take().unwrap();
            animation.tick(h, ms(t * 10), &mut pixels, &mut surface, &mut scheduler);
            assert!(scheduler.pending().is_some());
        }
    }

    #[test]
    fn test_stop_cancels_and_ignores_stale_callback() {
        let mut scheduler = FrameScheduler::new();
        let mut animation = AnimationLoop::default();
        let mut surface = Surface::new(8, 8);
        let mut pixels = pixels();

        animation.start(&mut scheduler, 1);
        let stale = scheduler.pending().unwrap();

        assert!(animation.stop(&mut scheduler));
        assert!(scheduler.pending().is_none());
        assert!(!animation.stop(&mut scheduler));

        assert!(!animation.tick(stale, ms(500), &mut pixels, &mut surface, &mut scheduler));
        assert!(scheduler.pending().is_none());
        assert_eq!(animation.state(), LoopState::Stopped);
    }
}
