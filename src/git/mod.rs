//! git
//!
//! Single interface for reading history out of a Git repository.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module should import
//! `git2`. The layout engine in [`crate::core::graph`] never sees git types;
//! it only sees the [`Commit`](crate::core::types::Commit) and
//! [`Ref`](crate::core::types::Ref) values produced here.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Walking history newest-first (children before parents)
//! - Listing branches, remote-tracking branches, and tags as labels
//!
//! # Invariants
//!
//! - Read-only: nothing here writes to the repository
//! - A commit is always listed before any of its parents
//!
//! # Example
//!
//! ```ignore
//! use lanegraph::git::{Git, HistoryOptions};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let options = HistoryOptions { limit: Some(50), ..Default::default() };
//! let commits = git.history(&options)?;
//! let refs = git.refs(&options)?;
//! ```

mod interface;

pub use interface::{Git, GitError, HistoryOptions};
