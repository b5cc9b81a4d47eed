//! core::types
//!
//! Input and value types shared by the layout engine and its collaborators.
//!
//! # Types
//!
//! - [`Commit`] - One commit of the history window (sha + ordered parents)
//! - [`Ref`] - A named pointer (branch or tag) at a commit
//! - [`HistoryWindow`] - The JSON document accepted by `lg layout`
//! - [`Color`] - Validated `#rrggbb` color
//!
//! # Ownership
//!
//! Commits and refs are owned by whoever produced them (the git history
//! provider, or a JSON document). The layout engine only borrows them; the
//! nodes and edges it returns hold `&str` slices into these values.
//!
//! # Examples
//!
//! ```
//! use lanegraph::core::types::{Color, Commit};
//!
//! let commit = Commit::new("c2", ["c1"]);
//! assert_eq!(commit.primary_parent(), Some("c1"));
//!
//! assert!(Color::new("#4f9dde").is_ok());
//! assert!(Color::new("blue").is_err());
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("color palette cannot be empty")]
    EmptyPalette,
}

/// A commit in the history window.
///
/// Only `sha` and `parents` matter for layout. The remaining fields are
/// descriptive metadata carried along for renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commit {
    /// Unique, stable identifier
    pub sha: String,

    /// Parent shas, primary (first-parent) first; empty for a root commit
    #[serde(default)]
    pub parents: Vec<String>,

    /// First line of the commit message
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,

    /// Author name
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,

    /// Author timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Commit {
    /// Create a commit with no descriptive metadata.
    pub fn new<I, S>(sha: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sha: sha.into(),
            parents: parents.into_iter().map(Into::into).collect(),
            summary: String::new(),
            author: String::new(),
            timestamp: None,
        }
    }

    /// Attach a summary line.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// The first-listed parent, if any.
    pub fn primary_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    /// Whether this commit has more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// A named pointer (branch or tag) to a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ref {
    /// Display name (e.g. `main`, `origin/main`, `v1.0`)
    pub name: String,

    /// The commit this ref currently points to
    pub sha: String,

    /// Whether this is a remote-tracking ref
    #[serde(default)]
    pub is_remote: bool,
}

impl Ref {
    /// Create a local ref.
    pub fn local(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
            is_remote: false,
        }
    }

    /// Create a remote-tracking ref.
    pub fn remote(name: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sha: sha.into(),
            is_remote: true,
        }
    }
}

/// A window of history: commits newest-first plus the refs pointing into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryWindow {
    /// Commits ordered newest to oldest
    #[serde(default)]
    pub commits: Vec<Commit>,

    /// Refs, in the order labels should be attached
    #[serde(default)]
    pub refs: Vec<Ref>,
}

/// A validated `#rrggbb` color.
///
/// Stored lowercase so equal colors compare and serialize identically.
///
/// # Example
///
/// ```
/// use lanegraph::core::types::Color;
///
/// let color = Color::new("#E06C75").unwrap();
/// assert_eq!(color.as_str(), "#e06c75");
/// assert_eq!(color.rgb(), (0xe0, 0x6c, 0x75));
///
/// assert!(Color::new("#e06c7").is_err());
/// assert!(Color::new("e06c75").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Create a new validated color.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidColor` unless the value is `#` followed
    /// by exactly six hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        let hex = value
            .strip_prefix('#')
            .ok_or_else(|| TypeError::InvalidColor(format!("'{value}' must start with '#'")))?;

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidColor(format!(
                "'{value}' must be '#' followed by 6 hex digits"
            )));
        }

        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Create a color from its components.
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Get the color as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or_default()
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl TryFrom<String> for Color {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Color {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
