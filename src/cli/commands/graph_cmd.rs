//! graph command - Draw the commit graph of the current repository

use std::io::{IsTerminal, Write};

use anyhow::{Context as _, Result};

use super::load_config;
use crate::cli::args::ColorWhen;
use crate::cli::Context;
use crate::core::graph::layout;
use crate::git::{Git, HistoryOptions};
use crate::ui::output;
use crate::ui::render::{render, RenderOptions};

/// Draw the commit graph.
///
/// Flags win over configuration; `remotes` and `tags` can only be turned
/// on from the command line.
pub fn graph(
    ctx: &Context,
    limit: Option<usize>,
    all: bool,
    remotes: bool,
    tags: bool,
    json: bool,
    color: ColorWhen,
) -> Result<()> {
    let git = Git::open(&ctx.cwd()?).context("Failed to open repository")?;
    let config = load_config(ctx, Some(&git))?;

    let options = HistoryOptions {
        limit: Some(limit.unwrap_or_else(|| config.limit())),
        all,
        remotes: remotes || config.remotes(),
        tags: tags || config.tags(),
    };

    let window = git.window(&options).context("Failed to read history")?;
    let colorizer = config
        .colorizer()
        .context("Invalid color configuration")?;
    let graph = layout(&window.commits, &window.refs, &colorizer);

    let mut stdout = std::io::stdout().lock();

    if json {
        let text = serde_json::to_string_pretty(&graph).context("Failed to serialize layout")?;
        writeln!(stdout, "{}", text)?;
        return Ok(());
    }

    if graph.is_empty() {
        output::print("No commits yet.", ctx.verbosity());
        return Ok(());
    }

    let color = match color {
        ColorWhen::Always => true,
        ColorWhen::Never => false,
        ColorWhen::Auto => std::io::stdout().is_terminal(),
    };

    for line in render(&graph, &window.commits, RenderOptions { color }) {
        writeln!(stdout, "{}", line)?;
    }

    Ok(())
}
