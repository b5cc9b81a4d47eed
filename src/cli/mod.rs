//! cli
//!
//! Command-line interface layer for lg.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Initialize logging
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap, reads history
//! through [`crate::git`], and hands it to [`crate::core::graph`] for
//! layout. Drawing goes through [`crate::ui`].

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::ui::output::Verbosity;

/// Settings shared by every command handler.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Directory to run in (`None` for the process working directory)
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled
    pub debug: bool,
    /// Minimal output
    pub quiet: bool,
}

impl Context {
    /// The directory commands operate in.
    pub fn cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Failed to read current directory"),
        }
    }

    /// Output verbosity from the global flags.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.debug);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        debug: cli.debug,
        quiet: cli.quiet,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install the stderr subscriber.
///
/// Warnings always show; `--debug` adds engine decisions. `RUST_LOG`
/// overrides both.
fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("lanegraph={}", level)));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
