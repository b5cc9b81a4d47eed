//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lg - Lay out git history as a lane graph
#[derive(Parser, Debug)]
#[command(name = "lg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if lg was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw the commit graph of the current repository
    #[command(
        name = "graph",
        long_about = "Draw the commit graph of the current repository.\n\n\
            Reads a window of history newest-first, assigns every commit a lane, \
            and draws one row per commit with its short sha, labels, and summary. \
            Branch and merge edges bend between lanes; edges take the color of \
            the branch label on their child commit.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Graph of the current branch
    lg graph

    # Every local branch, last 100 commits
    lg graph --all -n 100

    # Include remote-tracking branches and tags as labels
    lg graph --all --remotes --tags

    # Machine-readable layout for another renderer
    lg graph --json > layout.json"
    )]
    Graph {
        /// Maximum number of commits (defaults to graph.limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Walk every local branch instead of HEAD only
        #[arg(short, long)]
        all: bool,

        /// Include remote-tracking branches
        #[arg(short, long)]
        remotes: bool,

        /// Include tags as labels
        #[arg(short, long)]
        tags: bool,

        /// Print the layout as JSON instead of drawing it
        #[arg(long)]
        json: bool,

        /// When to color edges
        #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
        color: ColorWhen,
    },

    /// Lay out a history window read as JSON
    #[command(
        name = "layout",
        long_about = "Lay out a history window read as JSON.\n\n\
            The input is an object with `commits` (newest first, each with `sha` \
            and `parents`) and optional `refs` (each with `name` and `sha`). The \
            output is the layout as JSON: nodes with lane, sequence index, and \
            labels, and edges with kind and color. No repository is needed.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Lay out a window from a file
    lg layout --input window.json

    # Or from stdin
    echo '{\"commits\":[{\"sha\":\"a\",\"parents\":[]}]}' | lg layout"
    )]
    Layout {
        /// Read the window from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the color each branch name maps to
    #[command(
        name = "color",
        long_about = "Show the color each branch name maps to.\n\n\
            Colors come from the configured palette (or the default one) and \
            depend only on the name, so a branch keeps its color across runs.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Which color is main?
    lg color main

    # Several at once
    lg color main develop feature/login"
    )]
    Color {
        /// Branch names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Get, set, or list configuration values
    #[command(
        name = "config",
        long_about = "View or modify lg configuration.\n\n\
            Global settings live in ~/.lanegraph/config.toml; repository \
            overrides live in .git/lanegraph/config.toml. Repository values \
            win over global ones.",
        after_help = "\
WORKFLOW EXAMPLES:
    # List effective values
    lg config list

    # Get a specific value
    lg config get graph.limit

    # Set a value for this repository
    lg config set graph.tags true

    # Set a value for every repository
    lg config set --global colors.palette '#4f9dde,#e06c75,#98c379'"
    )]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell. Add the output \
            to your shell's configuration to enable tab-completion for lg commands.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Bash (add to ~/.bashrc)
    lg completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    lg completion zsh >> ~/.zshrc

    # Fish
    lg completion fish > ~/.config/fish/completions/lg.fish

    # PowerShell
    lg completion powershell >> $PROFILE"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
        /// Write to the global config instead of the repository's
        #[arg(long)]
        global: bool,
    },
    /// List all configuration values
    List,
}

/// When to emit colors
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    /// Color when stdout is a terminal
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
