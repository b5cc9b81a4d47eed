//! core::graph::router
//!
//! Derives parent-child edges from laid-out nodes.
//!
//! An edge whose endpoints share a lane is a continuation and renders as a
//! straight segment. Any other edge is a branch/merge edge and renders as a
//! symmetric S-curve: control points at the vertical midpoint, horizontal
//! tangents at both ends. The router only carries that hint in
//! [`EdgeKind`]; drawing belongs to the renderer.

use std::collections::HashMap;

use serde::Serialize;

use super::builder::CommitNode;
use super::color::BranchColorizer;
use crate::core::types::Color;

/// How an edge should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    /// Both endpoints on the same lane
    Continuation,
    /// Endpoints on different lanes
    BranchOrMerge,
}

impl EdgeKind {
    /// Classify an edge between two lanes.
    pub fn between(from_lane: usize, to_lane: usize) -> Self {
        if from_lane == to_lane {
            EdgeKind::Continuation
        } else {
            EdgeKind::BranchOrMerge
        }
    }
}

/// A parent-child edge between two laid-out commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge<'a> {
    /// The child commit
    pub from_sha: &'a str,
    /// The parent commit
    pub to_sha: &'a str,
    /// Straight or curved
    pub kind: EdgeKind,
    /// Color of the child's first label, or the neutral color
    pub color: Color,
}

/// Build the edge list for `nodes`.
///
/// Edges are emitted in node order, then parent order. Parents without a
/// node (outside the window) produce no edge; repeated parents and
/// self-references are ignored.
///
/// # Example
///
/// ```
/// use lanegraph::core::graph::{build, route, BranchColorizer, EdgeKind};
/// use lanegraph::core::types::Commit;
///
/// let commits = vec![
///     Commit::new("b", ["a"]),
///     Commit::new("a", Vec::<String>::new()),
/// ];
/// let nodes = build(&commits, &[]);
/// let edges = route(&nodes, &BranchColorizer::default());
///
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].kind, EdgeKind::Continuation);
/// ```
pub fn route<'a>(nodes: &[CommitNode<'a>], colorizer: &BranchColorizer) -> Vec<Edge<'a>> {
    let by_sha: HashMap<&str, &CommitNode<'a>> = nodes.iter().map(|n| (n.sha, n)).collect();
    let mut edges = Vec::new();

    for node in nodes {
        let color = node
            .labels
            .first()
            .map_or_else(|| colorizer.neutral(), |label| colorizer.color_of(label));

        for (index, parent) in node.parents.iter().enumerate() {
            if node.parents[..index].contains(parent) {
                continue;
            }
            let Some(target) = by_sha.get(parent.as_str()) else {
                continue;
            };
            if target.sha == node.sha {
                continue;
            }

            edges.push(Edge {
                from_sha: node.sha,
                to_sha: target.sha,
                kind: EdgeKind::between(node.lane, target.lane),
                color: color.clone(),
            });
        }
    }

    edges
}
