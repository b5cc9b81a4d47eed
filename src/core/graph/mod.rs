//! core::graph
//!
//! Commit-graph layout engine.
//!
//! # Architecture
//!
//! The engine is a pure, single-pass transform from a history window to a
//! description a renderer can draw:
//!
//! - [`lanes`] - [`LaneAllocator`]: lowest-free lane pool with reservations
//! - [`builder`] - [`CommitGraphBuilder`]: lane + row per commit, ref labels
//! - [`router`] - [`route`]: parent-child edges, continuation vs branch/merge
//! - [`color`] - [`BranchColorizer`]: stable name to palette color
//!
//! Commits and nodes are kept in flat, sha-keyed maps; nothing is linked by
//! pointers, and no state survives a call.
//!
//! # Example
//!
//! ```
//! use lanegraph::core::graph::{layout, BranchColorizer, EdgeKind};
//! use lanegraph::core::types::{Commit, Ref};
//!
//! let commits = vec![
//!     Commit::new("m", ["b", "a2"]),
//!     Commit::new("a2", ["a1"]),
//!     Commit::new("b", ["a1"]),
//!     Commit::new("a1", Vec::<String>::new()),
//! ];
//! let refs = vec![Ref::local("main", "m")];
//!
//! let graph = layout(&commits, &refs, &BranchColorizer::default());
//!
//! assert_eq!(graph.nodes.len(), 4);
//! assert_eq!(graph.lane_count(), 2);
//! assert!(graph.edges.iter().any(|e| e.kind == EdgeKind::BranchOrMerge));
//! ```

pub mod builder;
pub mod color;
pub mod lanes;
pub mod router;

pub use builder::{build, CommitGraphBuilder, CommitNode};
pub use color::BranchColorizer;
pub use lanes::LaneAllocator;
pub use router::{route, Edge, EdgeKind};

use serde::Serialize;
use tracing::debug;

use crate::core::types::{Commit, Ref};

/// Nodes and edges for one history window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLayout<'a> {
    /// One node per distinct commit, in input order
    pub nodes: Vec<CommitNode<'a>>,
    /// Parent-child edges between nodes
    pub edges: Vec<Edge<'a>>,
}

impl GraphLayout<'_> {
    /// Number of lanes a renderer needs (highest lane + 1).
    pub fn lane_count(&self) -> usize {
        self.nodes.iter().map(|n| n.lane + 1).max().unwrap_or(0)
    }

    /// Whether the layout has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Lay out a history window: build nodes, then route edges.
pub fn layout<'a>(
    commits: &'a [Commit],
    refs: &'a [Ref],
    colorizer: &BranchColorizer,
) -> GraphLayout<'a> {
    let nodes = build(commits, refs);
    let edges = route(&nodes, colorizer);

    debug!(
        commits = commits.len(),
        nodes = nodes.len(),
        edges = edges.len(),
        "laid out history window"
    );

    GraphLayout { nodes, edges }
}
