//! config command - Get, set, or list configuration values

use anyhow::{Context as _, Result};

use super::{discover, load_config};
use crate::cli::Context;
use crate::core::config::{Config, KEYS};
use crate::git::Git;
use crate::ui::output;

/// Get the effective value of a configuration key.
pub fn get(ctx: &Context, key: &str) -> Result<()> {
    let git = discover(ctx)?;
    let config = load_config(ctx, git.as_ref())?;

    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value in the repository or global scope.
pub fn set(ctx: &Context, key: &str, value: &str, global: bool) -> Result<()> {
    if global {
        let git = discover(ctx)?;
        let config = load_config(ctx, git.as_ref())?;

        let mut global_config = config.global.clone();
        global_config.set(key, value)?;

        let path = match config.global_config_loaded_from() {
            Some(path) => {
                Config::write_global_to(path, &global_config)
                    .context("Failed to write config")?;
                path.to_path_buf()
            }
            None => Config::write_global(&global_config).context("Failed to write config")?,
        };
        tracing::debug!(path = %path.display(), key, "wrote global config");
    } else {
        let git = Git::open(&ctx.cwd()?).context("Failed to open repository")?;
        let config = load_config(ctx, Some(&git))?;

        let mut repo_config = config.repo.unwrap_or_default();
        repo_config.set(key, value)?;

        let path =
            Config::write_repo(git.git_dir(), &repo_config).context("Failed to write config")?;
        tracing::debug!(path = %path.display(), key, "wrote repo config");
    }

    output::print(format!("Set {} = {}", key, value), ctx.verbosity());
    Ok(())
}

/// List every configuration key with its effective value.
pub fn list(ctx: &Context) -> Result<()> {
    let git = discover(ctx)?;
    let config = load_config(ctx, git.as_ref())?;

    if let Some(path) = config.global_config_loaded_from() {
        output::print(format!("# global: {}", path.display()), ctx.verbosity());
    }
    if let Some(path) = config.repo_config_loaded_from() {
        output::print(format!("# repo: {}", path.display()), ctx.verbosity());
    }

    for key in KEYS {
        println!("{} = {}", key, config.get(key)?);
    }

    Ok(())
}
