//! Architecture enforcement tests.
//!
//! The layering in `lib.rs` is only worth something if it holds. These
//! tests scan the source tree and fail when a module reaches past its layer.
//!
//! # Rules
//!
//! 1. **Single git doorway** - only `src/git` may name `git2`
//! 2. **Pure layout engine** - `src/core/graph` does no I/O and never prints
//! 3. **Core is a leaf** - `src/core` never depends on `cli`, `ui`, or `git`

use std::fs;
use std::path::{Path, PathBuf};

/// Collect every `.rs` file under `dir`, sorted.
fn rust_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap_or_else(|_| panic!("Failed to read {}", dir.display()))
        {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// Find files under `dir` (minus `skip`) whose text contains any of `needles`.
fn violations(dir: &str, skip: Option<&str>, needles: &[&str]) -> Vec<String> {
    let mut found = Vec::new();

    for path in rust_files(Path::new(dir)) {
        if skip.is_some_and(|s| path.starts_with(s)) {
            continue;
        }

        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", path.display()));

        for needle in needles {
            if content.contains(needle) {
                found.push(format!("{}: contains `{}`", path.display(), needle));
            }
        }
    }

    found
}

#[test]
fn only_git_module_uses_git2() {
    let found = violations("src", Some("src/git"), &["git2::", "use git2"]);

    assert!(
        found.is_empty(),
        "git2 used outside src/git:\n  {}",
        found.join("\n  ")
    );
}

#[test]
fn layout_engine_does_no_io() {
    let found = violations(
        "src/core/graph",
        None,
        &["std::fs", "std::io", "std::env", "println!", "eprintln!", "git2"],
    );

    assert!(
        found.is_empty(),
        "I/O in the layout engine:\n  {}",
        found.join("\n  ")
    );
}

#[test]
fn core_does_not_depend_on_outer_layers() {
    let found = violations(
        "src/core",
        None,
        &["crate::cli", "crate::ui", "crate::git"],
    );

    assert!(
        found.is_empty(),
        "core reaches into an outer layer:\n  {}",
        found.join("\n  ")
    );
}

#[test]
fn git_module_is_present() {
    // Guards the rules above against a moved tree silently passing.
    assert!(Path::new("src/git/interface.rs").exists());
    assert!(Path::new("src/core/graph/builder.rs").exists());
}
