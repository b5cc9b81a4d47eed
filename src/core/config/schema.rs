//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$LANEGRAPH_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/lanegraph/config.toml`
//! 3. `~/.lanegraph/config.toml` (canonical write location)
//!
//! # Repo Config
//!
//! Located at `.git/lanegraph/config.toml`.
//!
//! Both scopes share one schema; repo values override global ones.
//!
//! # Validation
//!
//! Config values are validated after parsing (e.g. colors must be
//! `#rrggbb`, the history limit must be positive).

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::Color;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// [graph]
/// limit = 1000
/// remotes = true
///
/// [colors]
/// palette = ["#4f9dde", "#e06c75", "#98c379"]
/// neutral = "#8b949e"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// History window defaults
    pub graph: Option<GraphDefaults>,

    /// Color settings
    pub colors: Option<ColorConfig>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sections(self.graph.as_ref(), self.colors.as_ref())
    }

    /// Set `key` from its string form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unknown keys or bad values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        set_key(&mut self.graph, &mut self.colors, key, value)
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// [graph]
/// tags = true
///
/// [colors]
/// neutral = "#666666"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// History window defaults
    pub graph: Option<GraphDefaults>,

    /// Color settings
    pub colors: Option<ColorConfig>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_sections(self.graph.as_ref(), self.colors.as_ref())
    }

    /// Set `key` from its string form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for unknown keys or bad values.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        set_key(&mut self.graph, &mut self.colors, key, value)
    }
}

/// Keys accepted by `lg config get/set`.
pub const KEYS: [&str; 5] = [
    "graph.limit",
    "graph.remotes",
    "graph.tags",
    "colors.palette",
    "colors.neutral",
];

/// Defaults for which history `lg graph` lays out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GraphDefaults {
    /// Maximum number of commits in the window
    pub limit: Option<usize>,

    /// Include remote-tracking branches
    pub remotes: Option<bool>,

    /// Include tags as labels
    pub tags: Option<bool>,
}

impl GraphDefaults {
    /// Validate history settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == Some(0) {
            return Err(ConfigError::InvalidValue(
                "graph.limit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Palette settings for branch coloring.
///
/// Colors are kept as strings so a bad value is reported with its key
/// instead of as a bare parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Palette entries, `#rrggbb`
    pub palette: Option<Vec<String>>,

    /// Color for unlabeled chains, `#rrggbb`
    pub neutral: Option<String>,
}

impl ColorConfig {
    /// Validate colors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(palette) = &self.palette {
            parse_palette(palette)?;
        }
        if let Some(neutral) = &self.neutral {
            parse_color("colors.neutral", neutral)?;
        }
        Ok(())
    }
}

fn set_key(
    graph: &mut Option<GraphDefaults>,
    colors: &mut Option<ColorConfig>,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    match key {
        "graph.limit" => {
            let limit = value.parse::<usize>().map_err(|_| {
                ConfigError::InvalidValue(format!("graph.limit: '{}' is not a number", value))
            })?;
            graph.get_or_insert_with(Default::default).limit = Some(limit);
        }
        "graph.remotes" => {
            graph.get_or_insert_with(Default::default).remotes = Some(parse_bool(key, value)?);
        }
        "graph.tags" => {
            graph.get_or_insert_with(Default::default).tags = Some(parse_bool(key, value)?);
        }
        "colors.palette" => {
            let palette = value
                .split(',')
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect();
            colors.get_or_insert_with(Default::default).palette = Some(palette);
        }
        "colors.neutral" => {
            colors.get_or_insert_with(Default::default).neutral = Some(value.to_string());
        }
        _ => {
            return Err(ConfigError::InvalidValue(format!(
                "unknown key '{}', expected one of: {}",
                key,
                KEYS.join(", ")
            )))
        }
    }

    validate_sections(graph.as_ref(), colors.as_ref())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "{}: '{}' is not a boolean",
            key, value
        ))),
    }
}

fn validate_sections(
    graph: Option<&GraphDefaults>,
    colors: Option<&ColorConfig>,
) -> Result<(), ConfigError> {
    if let Some(graph) = graph {
        graph.validate()?;
    }
    if let Some(colors) = colors {
        colors.validate()?;
    }
    Ok(())
}

/// Parse a single color value, naming `key` on failure.
pub(crate) fn parse_color(key: &str, value: &str) -> Result<Color, ConfigError> {
    Color::new(value).map_err(|e| ConfigError::InvalidValue(format!("{}: {}", key, e)))
}

/// Parse a palette; it must have at least one entry.
pub(crate) fn parse_palette(values: &[String]) -> Result<Vec<Color>, ConfigError> {
    if values.is_empty() {
        return Err(ConfigError::InvalidValue(
            "colors.palette cannot be empty".to_string(),
        ));
    }
    values
        .iter()
        .map(|value| parse_color("colors.palette", value))
        .collect()
}
