//! Spring simulation state machine.
//!
//! A [`Spring`] drives one scalar value from `from_value` toward `to_value`
//! using the closed-form oscillator in [`crate::solver`]. It is ticked by an
//! injected [`Scheduler`], notifies listeners on start, on every computed
//! frame and on stop, and terminates on its own once it comes to rest or
//! (with `overshoot_clamping`) crosses the target.
//!
//! # Lifecycle
//!
//! ```text
//! Idle --start()--> Animating --rest / overshoot / stop()--> Idle
//! ```
//!
//! All methods are synchronous and re-entrant: listeners receive the spring
//! and may call `stop`, `start`, `update_config` or change listeners while
//! an event is being delivered.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::{SpringConfig, SpringConfigUpdate};
use crate::constants::MAX_DELTA_TIME_MS;
use crate::error::SpringError;
use crate::listeners::{Listener, ListenerKind, ListenerRegistry};
use crate::solver;
use crate::timing::{Clock, FrameHandle, Scheduler};

// ============================================================================
// Simulation State
// ============================================================================

/// Mutable simulation state owned by a single spring.
#[derive(Debug, Clone, Copy)]
struct SimulationState {
    config: SpringConfig,
    /// Milliseconds of simulated time since the last reset.
    spring_time: f64,
    /// Timestamp of the last processed tick; `None` until the first tick of a run.
    last_tick_timestamp: Option<f64>,
    current_value: f64,
    current_velocity: f64,
    is_animating: bool,
    scheduled_frame: Option<FrameHandle>,
    /// True while `on_update` listeners of a tick are running.
    in_tick: bool,
}

impl SimulationState {
    fn new(config: SpringConfig) -> Self {
        Self {
            config,
            spring_time: 0.0,
            last_tick_timestamp: None,
            current_value: config.from_value,
            current_velocity: config.initial_velocity,
            is_animating: false,
            scheduled_frame: None,
            in_tick: false,
        }
    }

    /// Rewinds spring-time to zero at the configured starting point.
    fn reset(&mut self) {
        self.spring_time = 0.0;
        self.last_tick_timestamp = None;
        self.current_value = self.config.from_value;
        self.current_velocity = self.config.initial_velocity;
    }

    /// Advances spring-time to `timestamp` and recomputes value and velocity.
    ///
    /// The first call of a run only seeds the timestamp, so the first frame
    /// reflects spring-time zero.
    fn advance_to(&mut self, timestamp: f64) {
        let last = self.last_tick_timestamp.unwrap_or(timestamp);
        let delta = (timestamp - last).clamp(0.0, MAX_DELTA_TIME_MS);

        self.spring_time += delta;
        self.last_tick_timestamp = Some(timestamp);

        let sample = solver::evaluate(&self.config, self.spring_time);
        self.current_value = sample.value;
        self.current_velocity = sample.velocity;
    }

    fn is_overshooting(&self) -> bool {
        let config = &self.config;
        if !config.overshoot_clamping || config.stiffness == 0.0 {
            return false;
        }

        if config.from_value < config.to_value {
            self.current_value > config.to_value
        } else if config.from_value > config.to_value {
            self.current_value < config.to_value
        } else {
            false
        }
    }

    fn is_at_rest(&self) -> bool {
        let config = &self.config;
        let no_velocity = self.current_velocity.abs() <= config.rest_velocity_threshold;
        let no_displacement = config.stiffness != 0.0
            && (config.to_value - self.current_value).abs() <= config.rest_displacement_threshold;

        no_velocity && no_displacement
    }
}

// ============================================================================
// Spring
// ============================================================================

struct SpringInner {
    scheduler: Rc<dyn Scheduler>,
    clock: Rc<dyn Clock>,
    state: RefCell<SimulationState>,
    listeners: RefCell<ListenerRegistry>,
}

impl Drop for SpringInner {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().scheduled_frame.take() {
            self.scheduler.cancel(handle);
        }
    }
}

/// A spring animating a single scalar value.
///
/// `Spring` is a cheap, cloneable handle; clones share the same simulation.
/// Any frame still pending when the last handle is dropped is cancelled.
#[derive(Clone)]
pub struct Spring {
    inner: Rc<SpringInner>,
}

impl Spring {
    /// Creates a spring from the defaults with `update` laid on top.
    ///
    /// Physical parameters are not validated here; an invalid config is
    /// reported by the first tick after `start`.
    #[must_use]
    pub fn new(
        update: SpringConfigUpdate,
        scheduler: Rc<dyn Scheduler>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let config = SpringConfig::from_update(&update);

        Self {
            inner: Rc::new(SpringInner {
                scheduler,
                clock,
                state: RefCell::new(SimulationState::new(config)),
                listeners: RefCell::new(ListenerRegistry::default()),
            }),
        }
    }

    /// Creates a spring driven by a single object acting as both scheduler and clock.
    #[must_use]
    pub fn with_timeline<T>(update: SpringConfigUpdate, timeline: &Rc<T>) -> Self
    where
        T: Scheduler + Clock + 'static,
    {
        let scheduler: Rc<dyn Scheduler> = Rc::clone(timeline) as Rc<dyn Scheduler>;
        let clock: Rc<dyn Clock> = Rc::clone(timeline) as Rc<dyn Clock>;
        Self::new(update, scheduler, clock)
    }

    // ------------------------------------------------------------------------
    // Control
    // ------------------------------------------------------------------------

    /// Starts animating from `from_value`.
    ///
    /// Does nothing when `from_value == to_value` and `initial_velocity` is
    /// zero, or when the spring is already animating with a frame pending or
    /// being processed.
    pub fn start(&self) -> &Self {
        let needs_frame = {
            let mut state = self.inner.state.borrow_mut();
            if !state.config.has_motion() {
                return self;
            }
            if state.is_animating && (state.scheduled_frame.is_some() || state.in_tick) {
                return self;
            }

            state.reset();
            state.is_animating = true;
            state.scheduled_frame.is_none()
        };

        if needs_frame {
            let config = self.config();
            tracing::debug!(from = config.from_value, to = config.to_value, "spring: started");
            self.notify(ListenerKind::Start);
            self.request_frame();
        }

        self
    }

    /// Stops animating, leaving the value where it currently is.
    ///
    /// The pending frame is withdrawn before `on_stop` listeners run, so no
    /// further update can be delivered for this run.
    pub fn stop(&self) -> &Self {
        let pending = {
            let mut state = self.inner.state.borrow_mut();
            if !state.is_animating {
                return self;
            }
            state.is_animating = false;
            state.scheduled_frame.take()
        };

        if let Some(handle) = pending {
            self.inner.scheduler.cancel(handle);
        }

        tracing::debug!(value = self.current_value(), "spring: stopped");
        self.notify(ListenerKind::Stop);
        self
    }

    /// Changes the configuration without breaking the trajectory.
    ///
    /// If animating, the spring is first advanced to the clock's current time.
    /// The current value and velocity then become the new `from_value` and
    /// `initial_velocity`, the fields set in `update` are laid on top, and
    /// spring-time restarts at zero. No listener fires and no frame is
    /// requested, so several updates between two frames produce a single
    /// `on_update`.
    pub fn update_config(&self, update: SpringConfigUpdate) -> &Self {
        let now = self.inner.clock.now();
        let mut state = self.inner.state.borrow_mut();

        if state.is_animating {
            let validation = state.config.validate();
            match validation {
                Ok(()) => state.advance_to(now),
                Err(err) => {
                    tracing::warn!(error = %err, "spring: skipped advance before config update");
                }
            }
        }

        let baseline = SpringConfigUpdate::new()
            .from_value(state.current_value)
            .initial_velocity(state.current_velocity);
        state.config.apply(&baseline.merge(&update));
        state.reset();

        tracing::debug!(
            from = state.config.from_value,
            to = state.config.to_value,
            velocity = state.config.initial_velocity,
            "spring: config updated"
        );
        drop(state);

        self
    }

    // ------------------------------------------------------------------------
    // Listeners
    // ------------------------------------------------------------------------

    /// Registers a listener fired when the spring starts animating.
    pub fn on_start(&self, listener: Listener) -> &Self {
        self.add_listener(ListenerKind::Start, listener)
    }

    /// Registers a listener fired for every computed value.
    pub fn on_update(&self, listener: Listener) -> &Self {
        self.add_listener(ListenerKind::Update, listener)
    }

    /// Registers a listener fired when the spring stops.
    pub fn on_stop(&self, listener: Listener) -> &Self {
        self.add_listener(ListenerKind::Stop, listener)
    }

    /// Removes the first registration of `listener`, whatever event it was registered for.
    pub fn remove_listener(&self, listener: &Listener) -> &Self {
        self.inner.listeners.borrow_mut().remove(listener);
        self
    }

    /// Removes every listener.
    pub fn remove_all_listeners(&self) -> &Self {
        self.inner.listeners.borrow_mut().clear();
        self
    }

    /// Returns the number of listeners registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.inner.listeners.borrow().count(kind)
    }

    // ------------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------------

    /// Returns the most recently computed value.
    #[must_use]
    pub fn current_value(&self) -> f64 { self.inner.state.borrow().current_value }

    /// Returns the most recently computed velocity, in units per millisecond.
    #[must_use]
    pub fn current_velocity(&self) -> f64 { self.inner.state.borrow().current_velocity }

    /// Returns whether the spring is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool { self.inner.state.borrow().is_animating }

    /// Returns whether value and velocity are within the rest thresholds.
    ///
    /// Independent of [`Spring::is_animating`]: a spring stopped mid-flight is
    /// not at rest.
    #[must_use]
    pub fn is_at_rest(&self) -> bool { self.inner.state.borrow().is_at_rest() }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn config(&self) -> SpringConfig { self.inner.state.borrow().config }

    /// Returns the simulated milliseconds since the last reset.
    #[must_use]
    pub fn spring_time(&self) -> f64 { self.inner.state.borrow().spring_time }

    /// Returns true if both handles refer to the same spring.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.inner, &other.inner) }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn add_listener(&self, kind: ListenerKind, listener: Listener) -> &Self {
        self.inner.listeners.borrow_mut().add(kind, listener);
        self
    }

    /// Fires every listener of `kind` from a snapshot of the registry.
    fn notify(&self, kind: ListenerKind) {
        let snapshot = self.inner.listeners.borrow().snapshot(kind);
        for listener in snapshot {
            listener(self);
        }
    }

    /// Requests the next frame unless stopped or one is already pending.
    fn request_frame(&self) {
        {
            let state = self.inner.state.borrow();
            if !state.is_animating || state.scheduled_frame.is_some() {
                return;
            }
        }

        let weak = Rc::downgrade(&self.inner);
        let handle = self.inner.scheduler.schedule(Box::new(move |timestamp| {
            weak.upgrade().map_or(Ok(()), |inner| Self { inner }.tick(timestamp))
        }));

        self.inner.state.borrow_mut().scheduled_frame = Some(handle);
    }

    /// Processes one frame.
    fn tick(&self, timestamp: f64) -> Result<(), SpringError> {
        {
            let mut state = self.inner.state.borrow_mut();
            state.scheduled_frame = None;

            if !state.is_animating {
                return Ok(());
            }

            if let Err(err) = state.config.validate() {
                tracing::error!(error = %err, "spring: tick aborted");
                return Err(err);
            }

            state.advance_to(timestamp);
            state.in_tick = true;
            tracing::trace!(
                timestamp,
                spring_time = state.spring_time,
                value = state.current_value,
                velocity = state.current_velocity,
                "spring: tick"
            );
        }

        self.notify(ListenerKind::Update);

        let finished = {
            let mut state = self.inner.state.borrow_mut();
            state.in_tick = false;
            if !state.is_animating {
                return Ok(());
            }

            if state.is_overshooting() || state.is_at_rest() {
                state.current_value = state.config.to_value;
                state.current_velocity = 0.0;
                true
            } else {
                false
            }
        };

        if finished {
            // Land the last frame exactly on the target.
            self.notify(ListenerKind::Update);
            self.stop();
        } else {
            self.request_frame();
        }

        Ok(())
    }
}

impl fmt::Debug for Spring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Spring")
            .field("config", &state.config)
            .field("spring_time", &state.spring_time)
            .field("current_value", &state.current_value)
            .field("current_velocity", &state.current_velocity)
            .field("is_animating", &state.is_animating)
            .field("listeners", &self.inner.listeners.borrow())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::error::PhysicalParameter;
    use crate::listeners::listener;
    use crate::timing::ManualTimeline;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn spring(update: SpringConfigUpdate) -> (Rc<ManualTimeline>, Spring) {
        let timeline = Rc::new(ManualTimeline::new());
        let spring = Spring::with_timeline(update, &timeline);
        (timeline, spring)
    }

    fn counter() -> (Rc<Cell<usize>>, Listener) {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        (count, listener(move |_| sink.set(sink.get() + 1)))
    }

    #[test]
    fn test_new_spring_is_idle_at_from_value() {
        let (_, spring) = spring(SpringConfigUpdate::new().from_value(3.0).initial_velocity(0.5));
        assert!(!spring.is_animating());
        assert_eq!(spring.current_value(), 3.0);
        assert_eq!(spring.current_velocity(), 0.5);
    }

    #[test]
    fn test_start_without_motion_is_noop() {
        let (timeline, spring) = spring(SpringConfigUpdate::new().from_value(1.0).to_value(1.0));
        let (starts, on_start) = counter();
        spring.on_start(on_start).start();

        assert!(!spring.is_animating());
        assert_eq!(starts.get(), 0);
        assert_eq!(timeline.pending_frames(), 0);
    }

    #[test]
    fn test_start_with_only_velocity_animates() {
        let (timeline, spring) =
            spring(SpringConfigUpdate::new().from_value(1.0).to_value(1.0).initial_velocity(0.2));
        spring.start();
        assert!(spring.is_animating());
        assert_eq!(timeline.pending_frames(), 1);
    }

    #[test]
    fn test_start_twice_fires_start_once() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let (starts, on_start) = counter();
        spring.on_start(on_start);

        spring.start();
        timeline.advance(FRAME_MS).unwrap();
        timeline.advance(FRAME_MS).unwrap();
        let time_before = spring.spring_time();

        spring.start();
        assert_eq!(starts.get(), 1);
        assert_eq!(spring.spring_time(), time_before);
        assert_eq!(timeline.pending_frames(), 1);
    }

    #[test]
    fn test_start_from_update_listener_is_noop() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let (starts, on_start) = counter();
        let restarted = Rc::new(Cell::new(false));
        let flag = Rc::clone(&restarted);
        spring
            .on_start(on_start)
            .on_update(listener(move |spring| {
                if !flag.get() && spring.spring_time() > 0.0 {
                    flag.set(true);
                    spring.start();
                }
            }))
            .start();

        timeline.advance(0.0).unwrap();
        timeline.advance(FRAME_MS).unwrap();
        let time_after_restart = spring.spring_time();

        assert!(restarted.get());
        assert_eq!(starts.get(), 1);
        assert!((time_after_restart - FRAME_MS).abs() < 1e-9);
        assert_eq!(timeline.pending_frames(), 1);
    }

    #[test]
    fn test_zero_stiffness_is_never_at_rest() {
        let (_, zero_stiffness) =
            spring(SpringConfigUpdate::new().from_value(1.0).to_value(1.0).stiffness(0.0));
        assert!(!zero_stiffness.is_at_rest());

        let (_, default_stiffness) = spring(SpringConfigUpdate::new().from_value(1.0).to_value(1.0));
        assert!(default_stiffness.is_at_rest());
    }

    #[test]
    fn test_zero_stiffness_never_overshoots() {
        let config = SpringConfig::from_update(
            &SpringConfigUpdate::new().from_value(0.0).to_value(10.0).overshoot_clamping(true),
        );
        let mut state = SimulationState::new(config);
        state.current_value = 12.0;
        assert!(state.is_overshooting());

        state.config.stiffness = 0.0;
        assert!(!state.is_overshooting());
    }

    #[test]
    fn test_first_tick_reports_spring_time_zero() {
        let (timeline, spring) = spring(SpringConfigUpdate::new().initial_velocity(0.25));
        spring.start();
        timeline.advance(500.0).unwrap();

        assert_eq!(spring.spring_time(), 0.0);
        assert_eq!(spring.current_value(), 0.0);
        assert!((spring.current_velocity() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_delta_time_is_clamped() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        spring.start();
        timeline.advance(0.0).unwrap();
        timeline.advance(5_000.0).unwrap();

        assert!((spring.spring_time() - MAX_DELTA_TIME_MS).abs() < 1e-9);
        assert!(spring.is_animating());
    }

    #[test]
    fn test_stop_cancels_pending_frame_and_fires_stop() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let (stops, on_stop) = counter();
        let (updates, on_update) = counter();
        spring.on_stop(on_stop).on_update(on_update).start();

        spring.stop();
        assert!(!spring.is_animating());
        assert_eq!(stops.get(), 1);
        assert_eq!(timeline.pending_frames(), 0);

        timeline.advance(FRAME_MS).unwrap();
        assert_eq!(updates.get(), 0);

        spring.stop();
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_stop_from_update_listener_halts_run() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let (updates, on_update) = counter();
        let (stops, on_stop) = counter();
        spring
            .on_update(on_update)
            .on_update(listener(|spring| {
                if spring.spring_time() > 40.0 {
                    spring.stop();
                }
            }))
            .on_stop(on_stop)
            .start();

        timeline.run_at_60hz(1_000).unwrap();

        assert!(!spring.is_animating());
        assert_eq!(stops.get(), 1);
        assert_eq!(updates.get(), 4);
        assert_eq!(timeline.pending_frames(), 0);
        assert!(!spring.is_at_rest());
    }

    #[test]
    fn test_runs_to_exact_target() {
        let (timeline, spring) = spring(SpringConfigUpdate::new().to_value(10.0));
        let values = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&values);
        spring
            .on_update(listener(move |spring| {
                sink.borrow_mut().push((spring.current_value(), spring.current_velocity()));
            }))
            .start();

        timeline.run_at_60hz(10_000).unwrap();

        assert!(!spring.is_animating());
        assert!(spring.is_at_rest());
        assert_eq!(spring.current_value(), 10.0);
        assert_eq!(spring.current_velocity(), 0.0);
        assert_eq!(values.borrow().last().copied(), Some((10.0, 0.0)));
    }

    #[test]
    fn test_invalid_parameters_fail_at_tick() {
        let (timeline, spring) = spring(SpringConfigUpdate::new().mass(0.0));
        let (updates, on_update) = counter();
        spring.on_update(on_update).start();
        assert!(spring.is_animating());

        let err = timeline.advance(FRAME_MS).unwrap_err();
        assert!(matches!(
            err,
            SpringError::InvalidPhysicalParameter { parameter: PhysicalParameter::Mass, .. }
        ));
        assert_eq!(updates.get(), 0);
        assert_eq!(spring.current_value(), 0.0);
        assert_eq!(timeline.pending_frames(), 0);
    }

    #[test]
    fn test_invalid_parameters_can_be_corrected() {
        let (timeline, spring) = spring(SpringConfigUpdate::new().stiffness(-1.0));
        spring.start();
        assert!(timeline.advance(FRAME_MS).is_err());

        spring.update_config(SpringConfigUpdate::new().stiffness(100.0)).start();
        timeline.run_at_60hz(10_000).unwrap();
        assert_eq!(spring.current_value(), 1.0);
    }

    #[test]
    fn test_update_config_does_not_schedule_or_notify() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let (starts, on_start) = counter();
        let (updates, on_update) = counter();
        spring.on_start(on_start).on_update(on_update);

        spring.update_config(SpringConfigUpdate::new().to_value(5.0));
        assert_eq!(timeline.pending_frames(), 0);
        assert_eq!(updates.get(), 0);

        spring.start();
        timeline.advance(FRAME_MS).unwrap();
        spring.update_config(SpringConfigUpdate::new().to_value(6.0));
        spring.update_config(SpringConfigUpdate::new().to_value(7.0));
        assert_eq!(timeline.pending_frames(), 1);

        timeline.advance(FRAME_MS).unwrap();
        assert_eq!(starts.get(), 1);
        assert_eq!(updates.get(), 2);
    }

    #[test]
    fn test_update_config_rebases_from_current_point() {
        let (timeline, spring) = spring(SpringConfigUpdate::new().to_value(100.0));
        spring.start();
        timeline.advance(0.0).unwrap();
        for _ in 0..5 {
            timeline.advance(FRAME_MS).unwrap();
        }

        let value = spring.current_value();
        let velocity = spring.current_velocity();
        spring.update_config(SpringConfigUpdate::new().to_value(-50.0));

        let config = spring.config();
        assert_eq!(config.from_value, value);
        assert_eq!(config.initial_velocity, velocity);
        assert_eq!(config.to_value, -50.0);
        assert_eq!(spring.spring_time(), 0.0);
    }

    #[test]
    fn test_explicit_fields_override_baseline() {
        let (_, spring) = spring(SpringConfigUpdate::new());
        spring.update_config(SpringConfigUpdate::new().from_value(42.0).initial_velocity(1.0));

        assert_eq!(spring.config().from_value, 42.0);
        assert_eq!(spring.current_value(), 42.0);
        assert_eq!(spring.current_velocity(), 1.0);
    }

    #[test]
    fn test_update_config_with_invalid_parameters_keeps_last_point() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        spring.start();
        timeline.advance(0.0).unwrap();
        timeline.advance(FRAME_MS).unwrap();
        let value = spring.current_value();

        spring.update_config(SpringConfigUpdate::new().damping(0.0));
        timeline.advance_clock(FRAME_MS);
        spring.update_config(SpringConfigUpdate::new().to_value(2.0));

        assert_eq!(spring.current_value(), value);
    }

    #[test]
    fn test_overshoot_clamping_stops_at_target() {
        let (timeline, spring) = spring(
            SpringConfigUpdate::new()
                .to_value(10.0)
                .damping(20.0)
                .initial_velocity(1.0)
                .overshoot_clamping(true),
        );
        let (stops, on_stop) = counter();
        spring.on_stop(on_stop).start();

        timeline.advance(0.0).unwrap();
        while spring.is_animating() {
            timeline.advance(FRAME_MS).unwrap();
            assert!(spring.current_value() <= 10.0);
        }

        assert_eq!(spring.current_value(), 10.0);
        assert_eq!(spring.current_velocity(), 0.0);
        assert_eq!(stops.get(), 1);
    }

    #[test]
    fn test_listeners_can_be_removed_during_dispatch() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let (second_calls, second) = counter();
        let second_handle = Rc::clone(&second);
        let first = listener(move |spring| {
            spring.remove_listener(&second_handle);
        });
        spring.on_update(first).on_update(second).start();

        timeline.advance(0.0).unwrap();
        // The snapshot taken for this frame still includes the second listener.
        assert_eq!(second_calls.get(), 1);

        timeline.advance(FRAME_MS).unwrap();
        assert_eq!(second_calls.get(), 1);
    }

    #[test]
    fn test_restart_from_stop_listener() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let (starts, on_start) = counter();
        let restarted = Rc::new(Cell::new(false));
        let flag = Rc::clone(&restarted);
        spring
            .on_start(on_start)
            .on_stop(listener(move |spring| {
                if !flag.get() {
                    flag.set(true);
                    spring.update_config(SpringConfigUpdate::new().to_value(0.0)).start();
                }
            }))
            .start();

        timeline.run_at_60hz(10_000).unwrap();

        assert_eq!(starts.get(), 2);
        assert_eq!(spring.current_value(), 0.0);
        assert!(!spring.is_animating());
    }

    #[test]
    fn test_dropping_spring_cancels_frame() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        spring.start();
        assert_eq!(timeline.pending_frames(), 1);

        drop(spring);
        assert_eq!(timeline.pending_frames(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let (timeline, spring) = spring(SpringConfigUpdate::new());
        let other = spring.clone();
        other.start();
        timeline.advance(0.0).unwrap();

        assert!(spring.is_animating());
        assert!(spring.ptr_eq(&other));
    }

    #[test]
    fn test_debug_output() {
        let (_, spring) = spring(SpringConfigUpdate::new());
        let debug = format!("{spring:?}");
        assert!(debug.contains("Spring"));
        assert!(debug.contains("is_animating: false"));
    }
}
