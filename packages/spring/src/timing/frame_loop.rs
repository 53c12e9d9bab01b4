//! Real-time frame loop with fixed pacing.

use std::fmt;
use std::time::{Duration, Instant};

use super::{Clock, FrameCallback, FrameHandle, FrameQueue, Scheduler};
use crate::error::SpringError;

/// Default frame rate when none is given.
const DEFAULT_FPS: u32 = 60;

/// Threshold for spin-wait vs sleep (microseconds).
const SPIN_WAIT_THRESHOLD_US: u64 = 1000;

/// Single-threaded frame loop paced against the wall clock.
///
/// Frame timestamps are milliseconds since the loop was created. The loop
/// runs on the calling thread inside [`FrameLoop::run_until_idle`].
pub struct FrameLoop {
    origin: Instant,
    frame_duration: Duration,
    queue: FrameQueue,
}

impl Default for FrameLoop {
    fn default() -> Self { Self::new(DEFAULT_FPS) }
}

impl FrameLoop {
    /// Creates a loop that runs `fps` frames per second.
    #[must_use]
    pub fn new(fps: u32) -> Self {
        Self {
            origin: Instant::now(),
            frame_duration: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
            queue: FrameQueue::default(),
        }
    }

    /// Returns the time between two frames.
    #[must_use]
    pub const fn frame_duration(&self) -> Duration { self.frame_duration }

    /// Runs frames until nothing is pending or `max_frames` frames have run.
    ///
    /// Returns the number of frames that ran.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first callback error.
    pub fn run_until_idle(&self, max_frames: usize) -> Result<usize, SpringError> {
        let mut frames = 0;
        let mut next_frame = Instant::now() + self.frame_duration;

        while frames < max_frames && !self.queue.is_empty() {
            precision_sleep(next_frame.saturating_duration_since(Instant::now()));
            next_frame += self.frame_duration;

            self.queue.run_frame(self.now())?;
            frames += 1;
        }

        tracing::debug!(frames, "timing: frame loop idle");
        Ok(frames)
    }

    /// Returns the number of pending frame callbacks.
    #[must_use]
    pub fn pending_frames(&self) -> usize { self.queue.len() }
}

impl Scheduler for FrameLoop {
    fn schedule(&self, callback: FrameCallback) -> FrameHandle { self.queue.schedule(callback) }

    fn cancel(&self, handle: FrameHandle) { self.queue.cancel(handle); }
}

impl Clock for FrameLoop {
    fn now(&self) -> f64 { self.origin.elapsed().as_secs_f64() * 1000.0 }
}

impl fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameLoop")
            .field("frame_duration", &self.frame_duration)
            .field("pending_frames", &self.queue.len())
            .finish_non_exhaustive()
    }
}

/// High-precision sleep that uses spin-waiting for the final microseconds.
#[inline]
fn precision_sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }

    let target = Instant::now() + duration;
    let spin_threshold = Duration::from_micros(SPIN_WAIT_THRESHOLD_US);

    if let Some(sleep_duration) = duration.checked_sub(spin_threshold) {
        std::thread::sleep(sleep_duration);
    }

    while Instant::now() < target {
        std::hint::spin_loop();
    }
}
