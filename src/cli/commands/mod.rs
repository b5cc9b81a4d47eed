//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Resolves the repository and configuration it needs
//! 2. Reads history through [`crate::git`] or from JSON input
//! 3. Calls the layout engine and formats the result
//!
//! Handlers never write to the repository; `config set` only writes
//! lanegraph's own config files.

mod color_cmd;
mod completion;
mod config_cmd;
mod graph_cmd;
mod layout_cmd;

pub use color_cmd::color;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use graph_cmd::graph;
pub use layout_cmd::layout;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::config::Config;
use crate::git::Git;
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Graph {
            limit,
            all,
            remotes,
            tags,
            json,
            color,
        } => graph_cmd::graph(ctx, limit, all, remotes, tags, json, color),
        Command::Layout { input } => layout_cmd::layout(ctx, input.as_deref()),
        Command::Color { names } => color_cmd::color(ctx, &names),
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value, global } => config_cmd::set(ctx, &key, &value, global),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Open the repository containing the working directory, if there is one.
fn discover(ctx: &Context) -> Result<Option<Git>> {
    Ok(Git::open(&ctx.cwd()?).ok())
}

/// Load configuration, surfacing load warnings.
fn load_config(ctx: &Context, git: Option<&Git>) -> Result<Config> {
    let result = Config::load(git.map(Git::git_dir)).context("Failed to load config")?;
    for warning in &result.warnings {
        output::warn(
            format!("{} ({})", warning.message, warning.path.display()),
            ctx.verbosity(),
        );
    }
    Ok(result.config)
}
