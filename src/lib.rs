//! lanegraph - Commit-graph lane layout for git history
//!
//! lanegraph turns a window of commits (newest first) into a drawable
//! graph: every commit gets a lane and a row, parent-child links become
//! straight or bending edges, and branch names map to stable colors.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, wires the layers)
//! - [`core`] - Domain types, the layout engine, and configuration
//! - [`git`] - Single interface for reading history from Git
//! - [`ui`] - Text rendering and terminal output
//!
//! # Correctness Invariants
//!
//! 1. Layout is a pure function of its input: same window, same output
//! 2. Every distinct commit gets exactly one node and one lane
//! 3. Only [`git`] touches a repository, and only to read

pub mod cli;
pub mod core;
pub mod git;
pub mod ui;
