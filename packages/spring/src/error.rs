//! Error types for boing.
//!
//! Configuration files fail with [`crate::config::ConfigError`]; a running
//! spring only fails when a tick finds invalid physical parameters.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Physical parameter that must be strictly positive for the solver to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PhysicalParameter {
    /// Spring mass (m).
    Mass,
    /// Spring stiffness (k).
    Stiffness,
    /// Damping coefficient (c).
    Damping,
}

impl fmt::Display for PhysicalParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mass => write!(f, "mass"),
            Self::Stiffness => write!(f, "stiffness"),
            Self::Damping => write!(f, "damping"),
        }
    }
}

/// Errors that can occur while simulating a spring.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum SpringError {
    /// A physical parameter was zero, negative or NaN when a tick ran.
    #[error("Invalid physical parameter: {parameter} must be greater than 0 (got {value})")]
    InvalidPhysicalParameter {
        /// Which parameter failed validation.
        parameter: PhysicalParameter,
        /// The offending value.
        value: f64,
    },
}
