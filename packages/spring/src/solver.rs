//! Closed-form damped harmonic oscillator.
//!
//! Evaluates the exact solution of
//! ```text
//! m·x''(t) + c·x'(t) + k·x(t) = 0
//! ```
//! where `x` is the displacement from the target value. Nothing is
//! integrated: the position and velocity at any spring-time are computed
//! directly, so the result depends only on the parameters and `t`.
//!
//! Where:
//! - ζ (zeta) = c / (2·√(k·m)), the damping ratio (controls bounciness)
//! - ω₀ = √(k/m), the natural frequency, expressed here in rad/ms
//!
//! Time is in milliseconds and velocities in units per millisecond.

use std::fmt;

use serde::Serialize;

use crate::config::SpringConfig;
use crate::constants::MS_PER_SECOND;

// ============================================================================
// Types
// ============================================================================

/// Damping regime a spring is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DampingRegime {
    /// ζ < 1: oscillates around the target with a decaying envelope.
    Underdamped,
    /// ζ = 1: fastest return to the target without oscillating.
    CriticallyDamped,
    /// ζ > 1: slow, non-oscillating return.
    Overdamped,
}

impl DampingRegime {
    /// Classifies a damping ratio.
    ///
    /// Ratios above 1 are treated as critically damped unless
    /// `allows_overdamping` is set.
    #[must_use]
    pub fn classify(damping_ratio: f64, allows_overdamping: bool) -> Self {
        if damping_ratio < 1.0 {
            Self::Underdamped
        } else if damping_ratio > 1.0 && allows_overdamping {
            Self::Overdamped
        } else {
            Self::CriticallyDamped
        }
    }
}

impl fmt::Display for DampingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underdamped => write!(f, "underdamped"),
            Self::CriticallyDamped => write!(f, "critically damped"),
            Self::Overdamped => write!(f, "overdamped"),
        }
    }
}

/// Position and velocity of a spring at a point in spring-time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSample {
    /// Current value, in the units of `from_value`/`to_value`.
    pub value: f64,
    /// Current velocity, in units per millisecond.
    pub velocity: f64,
}

// ============================================================================
// Helpers
// ============================================================================

/// Returns the damping ratio ζ = c / (2·√(k·m)).
#[must_use]
pub fn damping_ratio(stiffness: f64, damping: f64, mass: f64) -> f64 {
    damping / (2.0 * (stiffness * mass).sqrt())
}

/// Returns the undamped angular frequency ω₀ = √(k/m), in rad/ms.
#[must_use]
pub fn natural_frequency(stiffness: f64, mass: f64) -> f64 {
    (stiffness / mass).sqrt() / MS_PER_SECOND
}

// ============================================================================
// Solver
// ============================================================================

/// Evaluates the spring described by `config` at `spring_time` milliseconds.
///
/// The config is assumed to be valid (see [`SpringConfig::validate`]);
/// non-positive physical parameters produce NaN.
#[must_use]
pub fn evaluate(config: &SpringConfig, spring_time: f64) -> SpringSample {
    let t = spring_time;
    let to = config.to_value;
    // The closed form measures displacement from the target, which flips the
    // sign of the configured velocity.
    let v0 = -config.initial_velocity;
    let x0 = config.to_value - config.from_value;

    let omega0 = natural_frequency(config.stiffness, config.mass);
    let zeta = damping_ratio(config.stiffness, config.damping, config.mass);

    match DampingRegime::classify(zeta, config.allows_overdamping) {
        DampingRegime::Underdamped => underdamped(t, to, x0, v0, zeta, omega0),
        DampingRegime::CriticallyDamped => critically_damped(t, to, x0, v0, omega0),
        DampingRegime::Overdamped => overdamped(t, to, x0, v0, zeta, omega0),
    }
}

/// ζ < 1.
#[allow(clippy::suboptimal_flops)]
fn underdamped(t: f64, to: f64, x0: f64, v0: f64, zeta: f64, omega0: f64) -> SpringSample {
    let omega1 = omega0 * (1.0 - zeta * zeta).sqrt();
    let envelope = (-zeta * omega0 * t).exp();
    let sin = (omega1 * t).sin();
    let cos = (omega1 * t).cos();
    let amplitude = v0 + zeta * omega0 * x0;

    let value = to - envelope * ((amplitude / omega1) * sin + x0 * cos);
    let velocity = zeta * omega0 * envelope * ((sin * amplitude) / omega1 + x0 * cos)
        - envelope * (cos * amplitude - omega1 * x0 * sin);

    SpringSample { value, velocity }
}

/// ζ = 1.
#[allow(clippy::suboptimal_flops)]
fn critically_damped(t: f64, to: f64, x0: f64, v0: f64, omega0: f64) -> SpringSample {
    let envelope = (-omega0 * t).exp();

    let value = to - envelope * (x0 + (v0 + omega0 * x0) * t);
    let velocity = envelope * (v0 * (t * omega0 - 1.0) + t * x0 * (omega0 * omega0));

    SpringSample { value, velocity }
}

/// ζ > 1.
#[allow(clippy::suboptimal_flops)]
fn overdamped(t: f64, to: f64, x0: f64, v0: f64, zeta: f64, omega0: f64) -> SpringSample {
    let omega2 = omega0 * (zeta * zeta - 1.0).sqrt();
    let envelope = (-zeta * omega0 * t).exp();
    let sinh = (omega2 * t).sinh();
    let cosh = (omega2 * t).cosh();
    let amplitude = v0 + zeta * omega0 * x0;

    let value = to - (envelope * (amplitude * sinh + omega2 * x0 * cosh)) / omega2;
    let velocity = (envelope * zeta * omega0 * (sinh * amplitude + x0 * omega2 * cosh)) / omega2
        - (envelope * (omega2 * cosh * amplitude + omega2 * omega2 * x0 * sinh)) / omega2;

    SpringSample { value, velocity }
}

// ============================================================================
// Tests
// ============================================================================
