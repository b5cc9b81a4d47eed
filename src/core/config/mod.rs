//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! lanegraph has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$LANEGRAPH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/lanegraph/config.toml`
//! 3. `~/.lanegraph/config.toml` (canonical write location)
//!
//! # Repo Config Location
//!
//! `<git dir>/lanegraph/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use lanegraph::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! let config = result.config;
//!
//! println!("Window: {} commits", config.limit());
//! println!("Remotes: {}", config.remotes());
//! let colors = config.colorizer().unwrap();
//! println!("main is drawn in {}", colors.color_of("main"));
//! ```

pub mod schema;

pub use schema::{ColorConfig, GlobalConfig, GraphDefaults, RepoConfig, KEYS};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::graph::BranchColorizer;

/// Default number of commits laid out by `lg graph`.
pub const DEFAULT_LIMIT: usize = 500;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Warnings generated during config loading.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The warning message.
    pub message: String,
    /// The path that triggered the warning.
    pub path: PathBuf,
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Any warnings generated during loading.
    pub warnings: Vec<ConfigWarning>,
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence: repo config overrides global config, which
/// overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Repository configuration (if in a repo)
    pub repo: Option<RepoConfig>,
    /// Path to the global config file (if loaded)
    global_path: Option<PathBuf>,
    /// Path to the repo config file (if loaded)
    repo_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// If `git_dir` is provided, also loads repo-specific config from it.
    ///
    /// # Errors
    ///
    /// Returns an error if config files exist but cannot be parsed or hold
    /// invalid values. Missing config files are not an error.
    pub fn load(git_dir: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let mut warnings = Vec::new();
        let global_path = Self::find_global(&mut warnings);
        let mut result = Self::load_from(global_path.as_deref(), git_dir)?;
        result.warnings = warnings;
        Ok(result)
    }

    /// Load configuration from an explicit global file and git directory.
    ///
    /// A `global_path` that does not exist is treated as absent.
    pub fn load_from(
        global_path: Option<&Path>,
        git_dir: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let (global, global_found) = match global_path {
            Some(path) if path.exists() => (read_toml::<GlobalConfig>(path)?, Some(path)),
            _ => (GlobalConfig::default(), None),
        };

        let (repo, repo_found) = match git_dir {
            Some(dir) => {
                let path = Self::repo_config_path(dir);
                if path.exists() {
                    (Some(read_toml::<RepoConfig>(&path)?), Some(path))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        global.validate()?;
        if let Some(ref r) = repo {
            r.validate()?;
        }

        debug!(
            global = ?global_found,
            repo = ?repo_found,
            "loaded configuration"
        );

        Ok(ConfigLoadResult {
            config: Config {
                global,
                repo,
                global_path: global_found.map(Path::to_path_buf),
                repo_path: repo_found,
            },
            warnings: Vec::new(),
        })
    }

    /// Locate the global config file, if any.
    fn find_global(warnings: &mut Vec<ConfigWarning>) -> Option<PathBuf> {
        // 1. Check $LANEGRAPH_CONFIG
        if let Ok(path) = std::env::var("LANEGRAPH_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
            warnings.push(ConfigWarning {
                message: "LANEGRAPH_CONFIG points to a missing file; ignoring it".to_string(),
                path,
            });
        }

        // 2. Check $XDG_CONFIG_HOME/lanegraph/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("lanegraph/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.lanegraph/config.toml
        dirs::home_dir()
            .map(|home| home.join(".lanegraph/config.toml"))
            .filter(|path| path.exists())
    }

    /// Get the canonical path for global config.
    ///
    /// Returns `~/.lanegraph/config.toml`.
    pub fn global_config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".lanegraph/config.toml"))
    }

    /// Get the path for repo config inside a git directory.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("lanegraph/config.toml")
    }

    /// Write global config atomically to the canonical location.
    pub fn write_global(config: &GlobalConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path()?;
        write_config_atomic(&path, config)?;
        Ok(path)
    }

    /// Write global config atomically to an explicit path.
    pub fn write_global_to(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        write_config_atomic(path, config)
    }

    /// Write repo config atomically into `git_dir`.
    pub fn write_repo(git_dir: &Path, config: &RepoConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::repo_config_path(git_dir);
        write_config_atomic(&path, config)?;
        Ok(path)
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn repo_graph(&self) -> Option<&GraphDefaults> {
        self.repo.as_ref().and_then(|r| r.graph.as_ref())
    }

    fn repo_colors(&self) -> Option<&ColorConfig> {
        self.repo.as_ref().and_then(|r| r.colors.as_ref())
    }

    /// Maximum commits per window.
    ///
    /// Defaults to [`DEFAULT_LIMIT`] if not configured.
    pub fn limit(&self) -> usize {
        self.repo_graph()
            .and_then(|g| g.limit)
            .or_else(|| self.global.graph.as_ref().and_then(|g| g.limit))
            .unwrap_or(DEFAULT_LIMIT)
    }

    /// Whether remote-tracking branches are included.
    ///
    /// Defaults to `false` if not configured.
    pub fn remotes(&self) -> bool {
        self.repo_graph()
            .and_then(|g| g.remotes)
            .or_else(|| self.global.graph.as_ref().and_then(|g| g.remotes))
            .unwrap_or(false)
    }

    /// Whether tags are included as labels.
    ///
    /// Defaults to `false` if not configured.
    pub fn tags(&self) -> bool {
        self.repo_graph()
            .and_then(|g| g.tags)
            .or_else(|| self.global.graph.as_ref().and_then(|g| g.tags))
            .unwrap_or(false)
    }

    /// Configured palette, if any scope sets one.
    pub fn palette(&self) -> Option<&[String]> {
        self.repo_colors()
            .and_then(|c| c.palette.as_deref())
            .or_else(|| {
                self.global
                    .colors
                    .as_ref()
                    .and_then(|c| c.palette.as_deref())
            })
    }

    /// Configured neutral color, if any scope sets one.
    pub fn neutral(&self) -> Option<&str> {
        self.repo_colors()
            .and_then(|c| c.neutral.as_deref())
            .or_else(|| {
                self.global
                    .colors
                    .as_ref()
                    .and_then(|c| c.neutral.as_deref())
            })
    }

    /// Build the colorizer, filling unset values from the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a configured color is invalid.
    pub fn colorizer(&self) -> Result<BranchColorizer, ConfigError> {
        let defaults = BranchColorizer::default();

        let palette = match self.palette() {
            Some(values) => schema::parse_palette(values)?,
            None => defaults.palette().to_vec(),
        };
        let neutral = match self.neutral() {
            Some(value) => schema::parse_color("colors.neutral", value)?,
            None => defaults.neutral().clone(),
        };

        BranchColorizer::new(palette, neutral)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))
    }

    /// Effective value of `key` as a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unknown keys.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "graph.limit" => self.limit().to_string(),
            "graph.remotes" => self.remotes().to_string(),
            "graph.tags" => self.tags().to_string(),
            "colors.palette" => {
                let colors = self.colorizer()?;
                colors
                    .palette()
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            }
            "colors.neutral" => self.colorizer()?.neutral().to_string(),
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown key '{}', expected one of: {}",
                    key,
                    KEYS.join(", ")
                )))
            }
        };
        Ok(value)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded repo config file.
    pub fn repo_config_loaded_from(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }
}

/// Read and parse a TOML config file.
fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a config file atomically (temp file, then rename).
fn write_config_atomic<T: serde::Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

    let temp_path = path.with_extension("toml.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_empty_defaults() {
        let result = Config::load_from(None, None).unwrap();
        let config = result.config;

        assert_eq!(config.limit(), DEFAULT_LIMIT);
        assert!(!config.remotes());
        assert!(!config.tags());
        assert!(config.palette().is_none());
        assert_eq!(config.colorizer().unwrap(), BranchColorizer::default());
        assert!(config.global_config_loaded_from().is_none());
    }

    #[test]
    fn missing_global_path_is_ignored() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.toml");

        let result = Config::load_from(Some(&path), None).unwrap();
        assert!(result.config.global_config_loaded_from().is_none());
    }

    #[test]
    fn load_global_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
            [graph]
            limit = 100
            remotes = true
            "#,
        )
        .unwrap();

        let result = Config::load_from(Some(&config_path), None).unwrap();
        let config = result.config;

        assert_eq!(config.limit(), 100);
        assert!(config.remotes());
        assert_eq!(config.global_config_loaded_from(), Some(config_path.as_path()));
    }

    #[test]
    fn load_repo_config() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(git_dir.join("lanegraph")).unwrap();
        fs::write(
            git_dir.join("lanegraph/config.toml"),
            "[graph]\ntags = true\n",
        )
        .unwrap();

        let result = Config::load_from(None, Some(&git_dir)).unwrap();

        assert!(result.config.tags());
        assert!(result.warnings.is_empty());
        assert!(result.config.repo_config_loaded_from().is_some());
    }

    #[test]
    fn write_repo_config_atomic() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(&git_dir).unwrap();

        let mut config = RepoConfig::default();
        config.set("graph.limit", "25").unwrap();
        config.set("colors.neutral", "#101010").unwrap();

        let path = Config::write_repo(&git_dir, &config).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let loaded = Config::load_from(None, Some(&git_dir)).unwrap().config;
        assert_eq!(loaded.limit(), 25);
        assert_eq!(loaded.neutral(), Some("#101010"));
    }

    #[test]
    fn invalid_values_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        let git_dir = temp.path().join(".git");
        fs::create_dir_all(git_dir.join("lanegraph")).unwrap();
        fs::write(
            git_dir.join("lanegraph/config.toml"),
            "[colors]\nneutral = \"gray\"\n",
        )
        .unwrap();

        let result = Config::load_from(None, Some(&git_dir));
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn unparseable_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "[graph\nlimit = ").unwrap();

        let result = Config::load_from(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn precedence_repo_overrides_global() {
        let mut global = GlobalConfig::default();
        global.set("graph.limit", "10").unwrap();
        global.set("graph.remotes", "true").unwrap();
        global.set("colors.neutral", "#aaaaaa").unwrap();

        let mut repo = RepoConfig::default();
        repo.set("graph.limit", "20").unwrap();

        let config = Config {
            global,
            repo: Some(repo),
            global_path: None,
            repo_path: None,
        };

        assert_eq!(config.limit(), 20);
        assert!(config.remotes());
        assert_eq!(config.neutral(), Some("#aaaaaa"));
    }

    #[test]
    fn colorizer_uses_configured_palette() {
        let mut repo = RepoConfig::default();
        repo.set("colors.palette", "#000001,#000002").unwrap();

        let config = Config {
            repo: Some(repo),
            ..Default::default()
        };

        let colors = config.colorizer().unwrap();
        assert_eq!(colors.palette().len(), 2);
        // Neutral falls back to the default.
        assert_eq!(colors.neutral().as_str(), "#8b949e");
    }

    #[test]
    fn get_reports_effective_values() {
        let config = Config::default();
        assert_eq!(config.get("graph.limit").unwrap(), "500");
        assert_eq!(config.get("graph.tags").unwrap(), "false");
        assert_eq!(config.get("colors.neutral").unwrap(), "#8b949e");
        assert!(config.get("colors.palette").unwrap().starts_with("#4f9dde,"));
        assert!(config.get("trunk").is_err());
    }
}
