//! CLI error types.

use boing::{ConfigError, SpringConfig, SpringError};
use thiserror::Error;

/// Errors that can occur during CLI execution.
#[derive(Debug, Error)]
pub enum CliError {
    /// The resolved spring parameters are invalid or a frame failed.
    #[error(transparent)]
    Spring(#[from] SpringError),
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No preset with the given name exists.
    #[error(
        "Unknown preset '{0}'. Expected one of: {names}",
        names = SpringConfig::PRESET_NAMES.join(", ")
    )]
    UnknownPreset(String),
    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
