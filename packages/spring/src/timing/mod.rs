//! Frame scheduling and time sources.
//!
//! A spring never reads a global frame clock. It is handed a [`Scheduler`]
//! that delivers one callback per frame with an absolute timestamp, and a
//! [`Clock`] used when the current time is needed outside of a frame
//! (`Spring::update_config`).
//!
//! Two drivers implement both traits:
//! - `timeline` - [`ManualTimeline`], a virtual clock advanced explicitly (tests, offline rendering)
//! - `frame_loop` - [`FrameLoop`], a real-time loop paced at a fixed frame rate

mod frame_loop;
mod timeline;

use std::cell::{Cell, RefCell};
use std::time::Instant;

pub use frame_loop::FrameLoop;
pub use timeline::ManualTimeline;

use crate::error::SpringError;

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Callback run once for a scheduled frame, receiving the frame timestamp in
/// milliseconds. Errors surface through whatever drives the scheduler.
pub type FrameCallback = Box<dyn FnOnce(f64) -> Result<(), SpringError>>;

/// Opaque identifier of a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Creates a handle from a raw identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn id(self) -> u64 { self.0 }
}

/// Requests frame callbacks, analogous to a display-refresh callback.
///
/// Timestamps passed to callbacks must be monotonically increasing.
pub trait Scheduler {
    /// Requests `callback` to run on the next frame.
    fn schedule(&self, callback: FrameCallback) -> FrameHandle;

    /// Withdraws a pending callback. Unknown or already-run handles are ignored.
    fn cancel(&self, handle: FrameHandle);
}

/// Monotonic time source in milliseconds.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now(&self) -> f64;
}

// ============================================================================
// System Clock
// ============================================================================

/// Wall clock measuring milliseconds since its creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl SystemClock {
    /// Creates a clock whose zero is now.
    #[must_use]
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 { self.origin.elapsed().as_secs_f64() * 1000.0 }
}

// ============================================================================
// Frame Queue
// ============================================================================

/// Pending frame callbacks shared by the drivers.
///
/// Callbacks scheduled while a frame is running are deferred to the next
/// frame, and callbacks cancelled during a frame never run.
#[derive(Default)]
struct FrameQueue {
    next_handle: Cell<u64>,
    pending: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl FrameQueue {
    fn schedule(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle::new(self.next_handle.get());
        self.next_handle.set(handle.id() + 1);
        self.pending.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel(&self, handle: FrameHandle) {
        self.pending.borrow_mut().retain(|(pending, _)| *pending != handle);
    }

    fn len(&self) -> usize { self.pending.borrow().len() }

    fn is_empty(&self) -> bool { self.pending.borrow().is_empty() }

    /// Runs every callback that was pending when the frame began.
    ///
    /// All callbacks run even if one fails; the first error is returned.
    fn run_frame(&self, timestamp: f64) -> Result<usize, SpringError> {
        let due: Vec<FrameHandle> = self.pending.borrow().iter().map(|(handle, _)| *handle).collect();
        let mut ran = 0;
        let mut first_error = None;

        for handle in due {
            let callback = {
                let mut pending = self.pending.borrow_mut();
                pending
                    .iter()
                    .position(|(pending_handle, _)| *pending_handle == handle)
                    .map(|index| pending.remove(index).1)
            };

            // Cancelled by an earlier callback in this frame.
            let Some(callback) = callback else {
                continue;
            };

            ran += 1;
            if let Err(err) = callback(timestamp) {
                tracing::error!(frame = handle.id(), error = %err, "timing: frame callback failed");
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(ran), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::error::PhysicalParameter;

    #[test]
    fn test_handles_are_unique() {
        let queue = FrameQueue::default();
        let a = queue.schedule(Box::new(|_| Ok(())));
        let b = queue.schedule(Box::new(|_| Ok(())));
        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_cancel_removes_pending_callback() {
        let queue = FrameQueue::default();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let handle = queue.schedule(Box::new(move |_| {
            flag.set(true);
            Ok(())
        }));

        queue.cancel(handle);
        assert!(queue.is_empty());
        assert_eq!(queue.run_frame(16.0).unwrap(), 0);
        assert!(!ran.get());
    }

    #[test]
    fn test_callbacks_scheduled_during_frame_wait_for_next_frame() {
        let queue = Rc::new(FrameQueue::default());
        let inner = Rc::clone(&queue);
        queue.schedule(Box::new(move |_| {
            inner.schedule(Box::new(|_| Ok(())));
            Ok(())
        }));

        assert_eq!(queue.run_frame(0.0).unwrap(), 1);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.run_frame(16.0).unwrap(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_first_error_is_returned_after_all_callbacks_run() {
        let queue = FrameQueue::default();
        let ran = Rc::new(Cell::new(0));
        queue.schedule(Box::new(|_| {
            Err(SpringError::InvalidPhysicalParameter {
                parameter: PhysicalParameter::Mass,
                value: 0.0,
            })
        }));
        let counter = Rc::clone(&ran);
        queue.schedule(Box::new(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        }));

        assert!(queue.run_frame(0.0).is_err());
        assert_eq!(ran.get(), 1);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a >= 0.0);
    }
}
