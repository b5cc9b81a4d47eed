//! ui
//!
//! Terminal output.
//!
//! # Modules
//!
//! - [`output`] - Verbosity-aware messages
//! - [`render`] - Text rendering of a graph layout
//!
//! # Design
//!
//! The layout engine never prints. Everything a user sees goes through
//! this module.

pub mod output;
pub mod render;
