//! Virtual clock driven frame scheduler.

use std::cell::Cell;
use std::fmt;

use super::{Clock, FrameCallback, FrameHandle, FrameQueue, Scheduler};
use crate::constants::FRAME_DURATION_60HZ_MS;
use crate::error::SpringError;

/// Scheduler and clock whose time only moves when told to.
///
/// Frames run when [`ManualTimeline::advance`] is called, so a sequence of
/// ticks is fully reproducible.
///
/// ```rust
/// use std::rc::Rc;
///
/// use boing::{ManualTimeline, Spring, SpringConfigUpdate};
///
/// let timeline = Rc::new(ManualTimeline::new());
/// let spring = Spring::with_timeline(SpringConfigUpdate::new().to_value(10.0), &timeline);
/// spring.start();
///
/// timeline.run_until_idle(16.0, 10_000).unwrap();
/// assert_eq!(spring.current_value(), 10.0);
/// ```
#[derive(Default)]
pub struct ManualTimeline {
    now: Cell<f64>,
    queue: FrameQueue,
}

impl ManualTimeline {
    /// Creates a timeline at time zero.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a timeline at `now` milliseconds.
    #[must_use]
    pub fn starting_at(now: f64) -> Self {
        Self {
            now: Cell::new(now),
            queue: FrameQueue::default(),
        }
    }

    /// Moves the clock forward without running any frame.
    pub fn advance_clock(&self, ms: f64) { self.now.set(self.now.get() + ms.max(0.0)); }

    /// Moves the clock forward by `ms` and runs one frame at the new time.
    ///
    /// Returns the number of callbacks that ran.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a callback of this frame.
    pub fn advance(&self, ms: f64) -> Result<usize, SpringError> {
        self.advance_clock(ms);
        self.run_frame()
    }

    /// Runs one frame at the current time without moving the clock.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a callback of this frame.
    pub fn run_frame(&self) -> Result<usize, SpringError> { self.queue.run_frame(self.now.get()) }

    /// Advances frame by frame, `frame_ms` apart, until nothing is pending
    /// or `max_frames` frames have run.
    ///
    /// Returns the number of frames that ran.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first callback error.
    pub fn run_until_idle(&self, frame_ms: f64, max_frames: usize) -> Result<usize, SpringError> {
        let mut frames = 0;
        while frames < max_frames && !self.queue.is_empty() {
            self.advance(frame_ms)?;
            frames += 1;
        }
        Ok(frames)
    }

    /// Runs frames at 60 Hz until idle.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first callback error.
    pub fn run_at_60hz(&self, max_frames: usize) -> Result<usize, SpringError> {
        self.run_until_idle(FRAME_DURATION_60HZ_MS, max_frames)
    }

    /// Returns the number of pending frame callbacks.
    #[must_use]
    pub fn pending_frames(&self) -> usize { self.queue.len() }
}

impl Scheduler for ManualTimeline {
    fn schedule(&self, callback: FrameCallback) -> FrameHandle { self.queue.schedule(callback) }

    fn cancel(&self, handle: FrameHandle) { self.queue.cancel(handle); }
}

impl Clock for ManualTimeline {
    fn now(&self) -> f64 { self.now.get() }
}

impl fmt::Debug for ManualTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTimeline")
            .field("now", &self.now.get())
            .field("pending_frames", &self.queue.len())
            .finish()
    }
}
