//! Spring configuration and config-file loading.
//!
//! Configuration files are partial: any field left out keeps its default.
//! JSONC is accepted, so both single-line (`//`) and multi-line (`/* */`)
//! comments are allowed.
//!
//! ```jsonc
//! {
//!   // Bouncy, but settles quickly
//!   "stiffness": 180,
//!   "damping": 12,
//!   "overshootClamping": false
//! }
//! ```

mod types;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
pub use types::{SpringConfig, SpringConfigUpdate};

/// Directory name used under the platform configuration directories.
const CONFIG_DIR_NAME: &str = "boing";

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["spring.jsonc", "spring.json"];

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while loading a spring configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected spring.jsonc or spring.json in ~/.config/boing/ \
         or the platform configuration directory"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON or unknown keys.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/boing/` (if the variable is set)
/// 2. `~/.config/boing/`
/// 3. The platform configuration directory (e.g. `~/Library/Application Support/boing/`)
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_check = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_to_check.push(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
    }

    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".config").join(CONFIG_DIR_NAME));
    }

    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_check.push(config_dir.join(CONFIG_DIR_NAME));
    }

    let mut paths = Vec::new();
    for dir in dirs_to_check {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

/// Parses a JSONC document into a partial spring configuration.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the document is not valid JSON once
/// comments are stripped, or if it contains unknown keys.
pub fn parse_config(source: &str) -> Result<SpringConfigUpdate, ConfigError> {
    parse_reader(source.as_bytes())
}

fn parse_reader(reader: impl Read) -> Result<SpringConfigUpdate, ConfigError> {
    let reader = json_comments::StripComments::new(reader);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads a partial spring configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::IoError` if the file cannot be read and
/// `ConfigError::ParseError` if its contents are invalid.
pub fn load_config_from_path(path: &Path) -> Result<SpringConfigUpdate, ConfigError> {
    let file = fs::File::open(path)?;
    let update = parse_reader(file)?;
    tracing::debug!(path = %path.display(), "config: loaded spring configuration");
    Ok(update)
}

/// Loads the first configuration file found in [`config_paths`].
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists, or the
/// error produced while reading the first one that does.
pub fn load_config() -> Result<(SpringConfigUpdate, PathBuf), ConfigError> {
    for path in config_paths() {
        if path.exists() {
            let update = load_config_from_path(&path)?;
            return Ok((update, path));
        }
    }

    Err(ConfigError::NotFound)
}
