//! core
//!
//! Core domain types, the layout engine, and configuration.
//!
//! # Modules
//!
//! - [`types`] - Commit, Ref, HistoryWindow, Color
//! - [`graph`] - Commit-graph layout engine (lanes, nodes, edges, colors)
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - The layout engine is pure: no I/O, no state across calls
//! - Inputs are borrowed, never mutated
//! - All layout output is deterministic

pub mod config;
pub mod graph;
pub mod types;
