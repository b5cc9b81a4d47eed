//! layout command - Lay out a history window read as JSON

use std::io::Read;
use std::path::Path;

use anyhow::{Context as _, Result};

use super::{discover, load_config};
use crate::cli::Context;
use crate::core::graph::layout as lay_out;
use crate::core::types::HistoryWindow;

/// Read a [`HistoryWindow`] from `input` (or stdin) and print its layout.
///
/// Works outside a repository; inside one, repository color overrides apply.
pub fn layout(ctx: &Context, input: Option<&Path>) -> Result<()> {
    let text = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let window: HistoryWindow =
        serde_json::from_str(&text).context("Failed to parse history window")?;

    let git = discover(ctx)?;
    let config = load_config(ctx, git.as_ref())?;
    let colorizer = config
        .colorizer()
        .context("Invalid color configuration")?;

    let graph = lay_out(&window.commits, &window.refs, &colorizer);
    println!(
        "{}",
        serde_json::to_string_pretty(&graph).context("Failed to serialize layout")?
    );

    Ok(())
}
