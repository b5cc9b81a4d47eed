//! color command - Show the color each branch name maps to

use anyhow::{Context as _, Result};

use super::{discover, load_config};
use crate::cli::Context;

/// Print `name<TAB>color` for each name.
pub fn color(ctx: &Context, names: &[String]) -> Result<()> {
    let git = discover(ctx)?;
    let config = load_config(ctx, git.as_ref())?;
    let colorizer = config
        .colorizer()
        .context("Invalid color configuration")?;

    for name in names {
        println!("{}\t{}", name, colorizer.color_of(name));
    }

    Ok(())
}
