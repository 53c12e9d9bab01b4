//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments.

use std::io;
use std::path::PathBuf;

use boing::{ConfigError, SpringConfig, SpringConfigUpdate, load_config, load_config_from_path};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::CliError;
use crate::output;
use crate::simulate::{self, Pacing, SimulationOptions};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// boing - Simulates damped spring animations.
#[derive(Parser, Debug)]
#[command(name = "boing")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug output to stderr. `RUST_LOG` takes precedence when set.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Run a spring from its start value until it settles.
    ///
    /// Parameters are resolved in order: preset, configuration file, then
    /// flags. Every update the spring emits is printed as a table row, or as
    /// JSON with --json.
    #[command(
        verbatim_doc_comment,
        after_long_help = r#"Examples:
  boing simulate --to 100                          # Default spring from 0 to 100
  boing simulate --preset wobbly --to 240          # Preset physics, custom target
  boing simulate --config ./spring.jsonc --json    # Parameters from a file, JSON output
  boing simulate --user-config --realtime          # ~/.config/boing/spring.jsonc, wall clock"#
    )]
    Simulate(SimulateArgs),

    /// Print a spring preset.
    ///
    /// Without a name, lists every preset as a table. With a name, prints
    /// that preset as a configuration document.
    Preset {
        /// Preset name (default, gentle, wobbly, stiff, slow, molasses).
        name: Option<String>,
    },

    /// Output the spring configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// spring configuration file. Can be redirected to a file for use with
    /// editors that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    /// Can be used with eval or redirected to a file.
    ///
    /// Usage:
    ///   eval "$(boing completions --shell zsh)"
    ///   boing completions --shell bash > ~/.local/share/bash-completion/completions/boing
    ///   boing completions --shell fish > ~/.config/fish/completions/boing.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

// ============================================================================
// Simulate
// ============================================================================

/// Arguments of `boing simulate`.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Start from a named preset.
    #[arg(long, short)]
    pub preset: Option<String>,

    /// Read parameters from a JSON or JSONC file.
    #[arg(long, short, value_name = "PATH", conflicts_with = "user_config")]
    pub config: Option<PathBuf>,

    /// Read parameters from the user configuration file (~/.config/boing/spring.jsonc).
    #[arg(long)]
    pub user_config: bool,

    /// Starting value.
    #[arg(long, allow_negative_numbers = true)]
    pub from: Option<f64>,

    /// Target value.
    #[arg(long, allow_negative_numbers = true)]
    pub to: Option<f64>,

    /// Spring stiffness (k).
    #[arg(long, short = 'k')]
    pub stiffness: Option<f64>,

    /// Damping coefficient (c).
    #[arg(long, short = 'd')]
    pub damping: Option<f64>,

    /// Mass (m).
    #[arg(long, short = 'm')]
    pub mass: Option<f64>,

    /// Initial velocity, in units per millisecond.
    #[arg(long, allow_negative_numbers = true)]
    pub velocity: Option<f64>,

    /// Simulate overdamped springs as such instead of critically damped.
    #[arg(long)]
    pub allows_overdamping: bool,

    /// Stop as soon as the value crosses the target.
    #[arg(long)]
    pub overshoot_clamping: bool,

    /// Speed below which the spring may rest.
    #[arg(long, value_name = "SPEED")]
    pub rest_velocity: Option<f64>,

    /// Distance from the target below which the spring may rest.
    #[arg(long, value_name = "DISTANCE")]
    pub rest_displacement: Option<f64>,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Give up after this many frames.
    #[arg(long, default_value_t = 10_000)]
    pub max_frames: usize,

    /// Pace frames against the wall clock instead of a virtual clock.
    #[arg(long)]
    pub realtime: bool,

    /// Output as JSON.
    #[arg(long, short)]
    pub json: bool,
}

impl SimulateArgs {
    /// Resolves the spring parameters from preset, file and flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset is unknown or the file cannot be loaded.
    pub fn resolve(&self) -> Result<SpringConfigUpdate, CliError> {
        let mut update = SpringConfigUpdate::new();

        if let Some(name) = &self.preset {
            let preset =
                SpringConfig::preset(name).ok_or_else(|| CliError::UnknownPreset(name.clone()))?;
            update = update.merge(&SpringConfigUpdate::from(preset));
        }

        if let Some(path) = &self.config {
            update = update.merge(&load_config_from_path(path)?);
        } else if self.user_config {
            match load_config() {
                Ok((file, path)) => {
                    tracing::debug!(path = %path.display(), "cli: using user configuration");
                    update = update.merge(&file);
                }
                Err(ConfigError::NotFound) => {
                    tracing::warn!("cli: no user configuration found, using defaults");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(update.merge(&self.overrides()))
    }

    /// Returns the parameters set directly on the command line.
    fn overrides(&self) -> SpringConfigUpdate {
        SpringConfigUpdate {
            from_value: self.from,
            to_value: self.to,
            stiffness: self.stiffness,
            damping: self.damping,
            mass: self.mass,
            initial_velocity: self.velocity,
            allows_overdamping: self.allows_overdamping.then_some(true),
            overshoot_clamping: self.overshoot_clamping.then_some(true),
            rest_velocity_threshold: self.rest_velocity,
            rest_displacement_threshold: self.rest_displacement,
        }
    }

    const fn options(&self) -> SimulationOptions {
        SimulationOptions {
            fps: self.fps,
            max_frames: self.max_frames,
            pacing: if self.realtime { Pacing::Realtime } else { Pacing::Virtual },
        }
    }
}

// ============================================================================
// Execution
// ============================================================================

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if parameters cannot be resolved, the spring cannot
    /// be simulated, or output cannot be written.
    pub fn execute(&self) -> Result<(), CliError> {
        match &self.command {
            Commands::Simulate(args) => {
                let trace = simulate::run(args.resolve()?, args.options())?;
                if args.json {
                    output::print_highlighted_json(&serde_json::to_value(&trace)?);
                } else {
                    println!("{}", output::render_trace(&trace));
                }
            }
            Commands::Preset { name: Some(name) } => {
                let preset =
                    SpringConfig::preset(name).ok_or_else(|| CliError::UnknownPreset(name.clone()))?;
                output::print_highlighted_json(&serde_json::to_value(preset)?);
            }
            Commands::Preset { name: None } => {
                let presets: Vec<(&str, SpringConfig)> = SpringConfig::PRESET_NAMES
                    .iter()
                    .filter_map(|name| SpringConfig::preset(name).map(|config| (*name, config)))
                    .collect();
                println!("{}", output::render_presets(&presets));
            }
            Commands::Schema => {
                println!("{}", boing::generate_schema_json());
            }
            Commands::Completions { shell } => {
                print_completions(*shell, &mut Self::command());
            }
        }

        Ok(())
    }
}

/// Prints shell completions to stdout.
fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
