//! Shared constants for spring simulation.

// ============================================================================
// Timing
// ============================================================================

/// Duration of a single frame at 60 Hz, in milliseconds.
pub const FRAME_DURATION_60HZ_MS: f64 = 1000.0 / 60.0;

/// Largest spring-time step a single tick may advance, in milliseconds.
///
/// Four 60 Hz frames. Longer gaps between ticks (a stalled thread, a paused
/// debugger) are clamped to this so the trajectory keeps moving smoothly
/// instead of jumping straight to its resting value.
pub const MAX_DELTA_TIME_MS: f64 = 4.0 * FRAME_DURATION_60HZ_MS;

/// Milliseconds per second, used to express angular frequency in rad/ms.
pub const MS_PER_SECOND: f64 = 1000.0;

// ============================================================================
// Spring Defaults
// ============================================================================

/// Default starting value.
pub const DEFAULT_FROM_VALUE: f64 = 0.0;

/// Default target value.
pub const DEFAULT_TO_VALUE: f64 = 1.0;

/// Default spring stiffness (k).
pub const DEFAULT_STIFFNESS: f64 = 100.0;

/// Default damping coefficient (c).
pub const DEFAULT_DAMPING: f64 = 10.0;

/// Default mass (m).
pub const DEFAULT_MASS: f64 = 1.0;

/// Default initial velocity, in units per millisecond.
pub const DEFAULT_INITIAL_VELOCITY: f64 = 0.0;

/// Default velocity below which the spring may be considered at rest.
pub const DEFAULT_REST_VELOCITY_THRESHOLD: f64 = 0.001;

/// Default distance from the target below which the spring may be considered at rest.
pub const DEFAULT_REST_DISPLACEMENT_THRESHOLD: f64 = 0.001;
