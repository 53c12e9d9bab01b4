#![allow(clippy::multiple_crate_versions)]

//! boing CLI - Simulates spring animations from the command line.
//!
//! The CLI drives a [`boing::Spring`] on a virtual or real-time frame clock
//! and prints every frame it produces.

mod commands;
mod error;
mod output;
mod simulate;

use clap::Parser;
use commands::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        eprintln!("boing: {err}");
        std::process::exit(1);
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins over the `--verbose` flag when set.
fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(default_level(verbose)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Log level used when `RUST_LOG` is not set.
const fn default_level(verbose: bool) -> &'static str { if verbose { "debug" } else { "warn" } }
