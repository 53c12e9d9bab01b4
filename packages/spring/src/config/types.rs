//! Spring configuration types.
//!
//! `SpringConfig` is the complete parameter snapshot a spring is evaluated
//! with. `SpringConfigUpdate` is the partial overlay accepted at construction
//! and by `Spring::update_config`: every field is optional and unset fields
//! keep their previous value.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DAMPING, DEFAULT_FROM_VALUE, DEFAULT_INITIAL_VELOCITY, DEFAULT_MASS,
    DEFAULT_REST_DISPLACEMENT_THRESHOLD, DEFAULT_REST_VELOCITY_THRESHOLD, DEFAULT_STIFFNESS,
    DEFAULT_TO_VALUE,
};
use crate::error::{PhysicalParameter, SpringError};
use crate::solver::{self, DampingRegime};

// ============================================================================
// Spring Config
// ============================================================================

/// Physical and behavioral parameters of a spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpringConfig {
    /// Starting value of the animation.
    /// Default: 0
    pub from_value: f64,

    /// Target value the spring settles on.
    /// Default: 1
    pub to_value: f64,

    /// Spring stiffness (k). Must be greater than 0 when animating.
    /// Default: 100
    pub stiffness: f64,

    /// Damping coefficient (c). Must be greater than 0 when animating.
    /// Default: 10
    pub damping: f64,

    /// Mass of the object attached to the spring (m). Must be greater than 0 when animating.
    /// Default: 1
    pub mass: f64,

    /// Velocity at the start of the animation, in units per millisecond.
    /// Default: 0
    pub initial_velocity: f64,

    /// Whether an overdamped spring (damping ratio above 1) is simulated as such.
    /// When false, it is simulated as critically damped.
    /// Default: false
    pub allows_overdamping: bool,

    /// Whether the animation stops as soon as the value crosses the target.
    /// Default: false
    pub overshoot_clamping: bool,

    /// Speed below which the spring may be considered at rest.
    /// Default: 0.001
    pub rest_velocity_threshold: f64,

    /// Distance from the target below which the spring may be considered at rest.
    /// Default: 0.001
    pub rest_displacement_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            from_value: DEFAULT_FROM_VALUE,
            to_value: DEFAULT_TO_VALUE,
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            mass: DEFAULT_MASS,
            initial_velocity: DEFAULT_INITIAL_VELOCITY,
            allows_overdamping: false,
            overshoot_clamping: false,
            rest_velocity_threshold: DEFAULT_REST_VELOCITY_THRESHOLD,
            rest_displacement_threshold: DEFAULT_REST_DISPLACEMENT_THRESHOLD,
        }
    }
}

impl SpringConfig {
    /// Creates a config from the defaults with `update` laid on top.
    #[must_use]
    pub fn from_update(update: &SpringConfigUpdate) -> Self {
        let mut config = Self::default();
        config.apply(update);
        config
    }

    /// Overwrites every field that is set in `update`.
    pub fn apply(&mut self, update: &SpringConfigUpdate) {
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = update.$field {
                        self.$field = value;
                    }
                )*
            };
        }

        overlay!(
            from_value,
            to_value,
            stiffness,
            damping,
            mass,
            initial_velocity,
            allows_overdamping,
            overshoot_clamping,
            rest_velocity_threshold,
            rest_displacement_threshold,
        );
    }

    /// Checks that mass, stiffness and damping are strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `SpringError::InvalidPhysicalParameter` naming the first
    /// parameter that is zero, negative or NaN.
    pub fn validate(&self) -> Result<(), SpringError> {
        let checks = [
            (PhysicalParameter::Mass, self.mass),
            (PhysicalParameter::Stiffness, self.stiffness),
            (PhysicalParameter::Damping, self.damping),
        ];

        for (parameter, value) in checks {
            // Negated so NaN fails too.
            if !(value > 0.0) {
                return Err(SpringError::InvalidPhysicalParameter { parameter, value });
            }
        }

        Ok(())
    }

    /// Returns the undamped damping ratio ζ = c / (2·√(k·m)).
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        solver::damping_ratio(self.stiffness, self.damping, self.mass)
    }

    /// Returns the damping regime the solver will evaluate this config in.
    #[must_use]
    pub fn regime(&self) -> DampingRegime {
        DampingRegime::classify(self.damping_ratio(), self.allows_overdamping)
    }

    /// Returns true when a started spring would actually move.
    #[must_use]
    pub fn has_motion(&self) -> bool {
        self.from_value != self.to_value || self.initial_velocity != 0.0
    }

    // ------------------------------------------------------------------------
    // Presets
    // ------------------------------------------------------------------------

    /// Soft, slightly bouncy spring.
    #[must_use]
    pub fn gentle() -> Self { Self::with_physics(120.0, 14.0) }

    /// Bouncy spring that overshoots noticeably.
    #[must_use]
    pub fn wobbly() -> Self { Self::with_physics(180.0, 12.0) }

    /// Quick spring with little overshoot.
    #[must_use]
    pub fn stiff() -> Self { Self::with_physics(210.0, 20.0) }

    /// Slow spring with no visible overshoot.
    #[must_use]
    pub fn slow() -> Self { Self::with_physics(280.0, 60.0) }

    /// Very slow, heavily damped spring.
    #[must_use]
    pub fn molasses() -> Self {
        Self {
            allows_overdamping: true,
            ..Self::with_physics(280.0, 120.0)
        }
    }

    /// Looks up a preset by name.
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "gentle" => Some(Self::gentle()),
            "wobbly" => Some(Self::wobbly()),
            "stiff" => Some(Self::stiff()),
            "slow" => Some(Self::slow()),
            "molasses" => Some(Self::molasses()),
            _ => None,
        }
    }

    /// Names accepted by [`SpringConfig::preset`].
    pub const PRESET_NAMES: &'static [&'static str] =
        &["default", "gentle", "wobbly", "stiff", "slow", "molasses"];

    fn with_physics(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }
}

// ============================================================================
// Spring Config Update
// ============================================================================

/// Partial spring configuration.
///
/// Fields left as `None` keep whatever value the target config already has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpringConfigUpdate {
    /// Starting value of the animation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_value: Option<f64>,

    /// Target value the spring settles on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_value: Option<f64>,

    /// Spring stiffness (k).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stiffness: Option<f64>,

    /// Damping coefficient (c).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damping: Option<f64>,

    /// Mass (m).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<f64>,

    /// Velocity at the start of the animation, in units per millisecond.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_velocity: Option<f64>,

    /// Whether overdamped springs are simulated as such.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_overdamping: Option<bool>,

    /// Whether the animation stops as soon as the value crosses the target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overshoot_clamping: Option<bool>,

    /// Speed below which the spring may be considered at rest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_velocity_threshold: Option<f64>,

    /// Distance from the target below which the spring may be considered at rest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_displacement_threshold: Option<f64>,
}

impl SpringConfigUpdate {
    /// Returns an update that changes nothing.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Sets the starting value.
    #[must_use]
    pub const fn from_value(mut self, value: f64) -> Self {
        self.from_value = Some(value);
        self
    }

    /// Sets the target value.
    #[must_use]
    pub const fn to_value(mut self, value: f64) -> Self {
        self.to_value = Some(value);
        self
    }

    /// Sets the stiffness.
    #[must_use]
    pub const fn stiffness(mut self, value: f64) -> Self {
        self.stiffness = Some(value);
        self
    }

    /// Sets the damping coefficient.
    #[must_use]
    pub const fn damping(mut self, value: f64) -> Self {
        self.damping = Some(value);
        self
    }

    /// Sets the mass.
    #[must_use]
    pub const fn mass(mut self, value: f64) -> Self {
        self.mass = Some(value);
        self
    }

    /// Sets the initial velocity.
    #[must_use]
    pub const fn initial_velocity(mut self, value: f64) -> Self {
        self.initial_velocity = Some(value);
        self
    }

    /// Sets whether overdamping is allowed.
    #[must_use]
    pub const fn allows_overdamping(mut self, value: bool) -> Self {
        self.allows_overdamping = Some(value);
        self
    }

    /// Sets whether overshooting the target stops the animation.
    #[must_use]
    pub const fn overshoot_clamping(mut self, value: bool) -> Self {
        self.overshoot_clamping = Some(value);
        self
    }

    /// Sets the rest velocity threshold.
    #[must_use]
    pub const fn rest_velocity_threshold(mut self, value: f64) -> Self {
        self.rest_velocity_threshold = Some(value);
        self
    }

    /// Sets the rest displacement threshold.
    #[must_use]
    pub const fn rest_displacement_threshold(mut self, value: f64) -> Self {
        self.rest_displacement_threshold = Some(value);
        self
    }

    /// Lays the fields set in `other` over this update.
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }

        take!(
            from_value,
            to_value,
            stiffness,
            damping,
            mass,
            initial_velocity,
            allows_overdamping,
            overshoot_clamping,
            rest_velocity_threshold,
            rest_displacement_threshold,
        );
        self
    }

    /// Returns true when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }
}

impl From<SpringConfig> for SpringConfigUpdate {
    fn from(config: SpringConfig) -> Self {
        Self {
            from_value: Some(config.from_value),
            to_value: Some(config.to_value),
            stiffness: Some(config.stiffness),
            damping: Some(config.damping),
            mass: Some(config.mass),
            initial_velocity: Some(config.initial_velocity),
            allows_overdamping: Some(config.allows_overdamping),
            overshoot_clamping: Some(config.overshoot_clamping),
            rest_velocity_threshold: Some(config.rest_velocity_threshold),
            rest_displacement_threshold: Some(config.rest_displacement_threshold),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
