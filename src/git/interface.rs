//! git::interface
//!
//! History provider implementation using git2.
//!
//! This module is the **single doorway** to git in lanegraph. It reads a
//! window of commits and the refs pointing into it and hands them over in
//! the layout engine's input shape ([`Commit`], [`Ref`]). It never writes.
//!
//! # Error Handling
//!
//! Git errors are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::RefNotFound`]: Requested ref does not exist
//! - [`GitError::ObjectNotFound`]: Requested object does not exist
//! - [`GitError::Internal`]: Anything else libgit2 reports
//!
//! # Example
//!
//! ```ignore
//! use lanegraph::git::{Git, HistoryOptions};
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! let window = git.window(&HistoryOptions::default())?;
//! println!("{} commits, {} refs", window.commits.len(), window.refs.len());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::core::types::{Commit, HistoryWindow, Ref};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Requested ref does not exist.
    #[error("ref not found: {refname}")]
    RefNotFound {
        /// The ref that was not found
        refname: String,
    },

    /// Object not found in repository.
    #[error("object not found: {oid}")]
    ObjectNotFound {
        /// The OID that was not found
        oid: String,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    /// Create a GitError from a git2::Error with richer context.
    fn from_git2(err: git2::Error, context: &str) -> Self {
        match err.code() {
            git2::ErrorCode::NotFound => {
                if context.starts_with("refs/") || context.contains("ref") {
                    GitError::RefNotFound {
                        refname: context.to_string(),
                    }
                } else {
                    GitError::ObjectNotFound {
                        oid: context.to_string(),
                    }
                }
            }
            _ => GitError::Internal {
                message: format!("{}: {}", context, err.message()),
            },
        }
    }
}

/// Which history to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Maximum commits in the window (`None` for the whole history)
    pub limit: Option<usize>,
    /// Walk from every local branch instead of HEAD only
    pub all: bool,
    /// Include remote-tracking branches (as labels, and as walk starts with `all`)
    pub remotes: bool,
    /// Include tags (as labels, and as walk starts with `all`)
    pub tags: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            limit: Some(crate::core::config::DEFAULT_LIMIT),
            all: false,
            remotes: false,
            tags: false,
        }
    }
}

/// Label ordering: local branches, then remote-tracking branches, then tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum RefGroup {
    Local,
    Remote,
    Tag,
}

/// The Git interface.
///
/// This is the **single point of interaction** with git. No other module
/// imports `git2`.
pub struct Git {
    /// The underlying git2 repository
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    // =========================================================================
    // Repository Opening and Info
    // =========================================================================

    /// Open a repository at the given path.
    ///
    /// Uses `git2::Repository::discover` to find the repository root,
    /// so `path` can be any directory within the repository. Bare
    /// repositories are fine; only history is read.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        Ok(Self { repo })
    }

    /// Path to the .git directory.
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Path to the working directory, if the repository has one.
    pub fn work_dir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// The commit HEAD points to, or `None` on an unborn branch.
    pub fn head_sha(&self) -> Result<Option<String>, GitError> {
        match self.repo.head() {
            Ok(head) => Ok(head.target().map(|oid| oid.to_string())),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(GitError::from_git2(e, "HEAD ref")),
        }
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Read commits newest-first.
    ///
    /// Commits are walked in topological order (children before parents),
    /// ties broken by commit time. An unborn HEAD yields an empty history.
    pub fn history(&self, options: &HistoryOptions) -> Result<Vec<Commit>, GitError> {
        let mut walk = self
            .repo
            .revwalk()
            .map_err(|e| GitError::from_git2(e, "revwalk"))?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)
            .map_err(|e| GitError::from_git2(e, "revwalk"))?;

        if options.all {
            let mut globs = vec!["refs/heads"];
            if options.remotes {
                globs.push("refs/remotes");
            }
            if options.tags {
                globs.push("refs/tags");
            }
            for glob in globs {
                walk.push_glob(glob)
                    .map_err(|e| GitError::from_git2(e, glob))?;
            }
        } else {
            let Some(head) = self.head_sha()? else {
                debug!("HEAD is unborn; history is empty");
                return Ok(Vec::new());
            };
            let oid = git2::Oid::from_str(&head).map_err(|e| GitError::from_git2(e, &head))?;
            walk.push(oid).map_err(|e| GitError::from_git2(e, &head))?;
        }

        let limit = options.limit.unwrap_or(usize::MAX);
        let mut commits = Vec::new();

        for oid in walk.take(limit) {
            let oid = oid.map_err(|e| GitError::from_git2(e, "revwalk"))?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(|e| GitError::from_git2(e, &oid.to_string()))?;

            let author = commit.author();
            let timestamp = chrono::DateTime::from_timestamp(author.when().seconds(), 0);

            commits.push(Commit {
                sha: oid.to_string(),
                parents: commit.parent_ids().map(|id| id.to_string()).collect(),
                summary: commit.summary().unwrap_or("").to_string(),
                author: author.name().unwrap_or("").to_string(),
                timestamp,
            });
        }

        debug!(commits = commits.len(), limit, all = options.all, "read history");
        Ok(commits)
    }

    /// List refs to attach as labels.
    ///
    /// Local branches always; remote-tracking branches and tags when the
    /// options ask for them. Symbolic refs such as `origin/HEAD` are
    /// skipped. Ordered local, remote, tag, then by name.
    pub fn refs(&self, options: &HistoryOptions) -> Result<Vec<Ref>, GitError> {
        let references = self
            .repo
            .references()
            .map_err(|e| GitError::from_git2(e, "refs"))?;

        let mut found: Vec<(RefGroup, Ref)> = Vec::new();
        for reference in references {
            let reference = reference.map_err(|e| GitError::Internal {
                message: e.message().to_string(),
            })?;

            if reference.kind() == Some(git2::ReferenceType::Symbolic) {
                continue;
            }

            let group = if reference.is_branch() {
                RefGroup::Local
            } else if reference.is_remote() && options.remotes {
                RefGroup::Remote
            } else if reference.is_tag() && options.tags {
                RefGroup::Tag
            } else {
                continue;
            };

            // Skip non-UTF8 names and tags pointing at non-commits
            let Some(name) = reference.shorthand() else {
                continue;
            };
            let Ok(commit) = reference.peel_to_commit() else {
                continue;
            };

            found.push((
                group,
                Ref {
                    name: name.to_string(),
                    sha: commit.id().to_string(),
                    is_remote: group == RefGroup::Remote,
                },
            ));
        }

        found.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.name.cmp(&b.1.name)));
        Ok(found.into_iter().map(|(_, r)| r).collect())
    }

    /// Read commits and refs together.
    pub fn window(&self, options: &HistoryOptions) -> Result<HistoryWindow, GitError> {
        Ok(HistoryWindow {
            commits: self.history(options)?,
            refs: self.refs(options)?,
        })
    }
}

fn is_unborn(err: &git2::Error) -> bool {
    matches!(
        err.code(),
        git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
    )
}
