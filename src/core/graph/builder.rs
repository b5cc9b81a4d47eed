//! core::graph::builder
//!
//! Assigns every commit of a history window a lane and a row.
//!
//! # Algorithm
//!
//! Commits are walked once, newest to oldest:
//!
//! 1. A commit claims the lane its primary child reserved for it, or
//!    allocates the lowest free lane.
//! 2. Edges from already-laid-out children into the commit are resolved.
//!    Each unresolved edge holds the child's lane; a lane whose last hold
//!    resolves is released.
//! 3. Every in-window parent not yet reached becomes an unresolved edge on
//!    the commit's lane. The primary parent additionally gets the lane
//!    reserved for it, unless a newer child already reserved one.
//! 4. A commit whose lane holds no unresolved edges releases it.
//!
//! A straight first-parent chain therefore stays on one lane, a branch
//! point forks into distinct lanes, and a merge pulls lanes together.
//!
//! # Invariants
//!
//! - Each distinct sha gets exactly one node; lanes are written once
//! - Inputs are never mutated and the walk never fails
//! - All lanes are released once every in-window parent has been reached

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use super::lanes::LaneAllocator;
use crate::core::types::{Commit, Ref};

/// A laid-out commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitNode<'a> {
    /// The commit sha
    pub sha: &'a str,

    /// The commit's parents, primary first
    #[serde(skip)]
    pub parents: &'a [String],

    /// Horizontal track, assigned once
    pub lane: usize,

    /// Row of the node, in input order
    pub sequence_index: usize,

    /// Names of refs pointing at this commit
    pub labels: Vec<&'a str>,
}

/// An edge from a laid-out child waiting for its parent to be reached.
#[derive(Debug, Clone, Copy)]
struct PendingEdge {
    /// Lane of the child
    lane: usize,
    /// Whether the parent is the child's primary parent
    primary: bool,
}

/// Transient lane state for one layout computation.
#[derive(Debug, Default)]
struct LaneTable<'a> {
    allocator: LaneAllocator<'a>,
    /// sha -> lane, write-once
    lanes: HashMap<&'a str, usize>,
    /// Unresolved parent edges held by each lane
    holds: Vec<usize>,
    /// Unresolved edges keyed by the parent they point at
    pending: HashMap<&'a str, Vec<PendingEdge>>,
}

impl<'a> LaneTable<'a> {
    fn contains(&self, sha: &str) -> bool {
        self.lanes.contains_key(sha)
    }

    /// Pick the lane for `sha` and record it.
    fn assign(&mut self, sha: &'a str) -> usize {
        let lane = match self.allocator.claim(sha) {
            // A merge edge arriving on the reserved lane would render as a
            // straight line through the chain, so the merge parent moves.
            Some(reserved) if self.merges_on(sha, reserved) => {
                let lane = self.allocator.allocate();
                debug!(sha, reserved, lane, "declined reservation shared with a merge edge");
                lane
            }
            Some(reserved) => reserved,
            None => self.allocator.allocate(),
        };

        self.lanes.insert(sha, lane);
        lane
    }

    /// Whether a non-primary edge into `sha` comes from `lane`.
    fn merges_on(&self, sha: &str, lane: usize) -> bool {
        self.pending
            .get(sha)
            .is_some_and(|edges| edges.iter().any(|e| !e.primary && e.lane == lane))
    }

    /// Resolve every edge pointing at `sha`, now laid out on `lane`.
    fn resolve(&mut self, sha: &str, lane: usize) {
        for edge in self.pending.remove(sha).unwrap_or_default() {
            let remaining = self.unhold(edge.lane);
            if remaining == 0 && edge.lane != lane {
                self.allocator.release(edge.lane);
            }
        }
    }

    /// Open an edge from `commit` (on `lane`) to each parent not yet reached.
    fn open(&mut self, commit: &'a Commit, lane: usize, window: &HashSet<&str>) {
        for (index, parent) in commit.parents.iter().enumerate() {
            let parent = parent.as_str();
            let repeated = commit.parents[..index].iter().any(|p| p == parent);
            if repeated || !window.contains(parent) || self.contains(parent) {
                continue;
            }

            let primary = index == 0;
            self.pending
                .entry(parent)
                .or_default()
                .push(PendingEdge { lane, primary });
            self.hold(lane);

            if primary {
                match self.allocator.reservation(parent) {
                    None => self.allocator.reserve(lane, parent),
                    Some(owner) => debug!(
                        sha = commit.sha.as_str(),
                        parent,
                        owner,
                        "primary parent already reserved by a newer child"
                    ),
                }
            }
        }
    }

    /// Release `lane` if nothing is waiting on it.
    fn finish(&mut self, lane: usize) {
        if self.holds.get(lane).copied().unwrap_or(0) == 0 {
            self.allocator.release(lane);
        }
    }

    fn hold(&mut self, lane: usize) {
        if lane >= self.holds.len() {
            self.holds.resize(lane + 1, 0);
        }
        self.holds[lane] += 1;
    }

    fn unhold(&mut self, lane: usize) -> usize {
        match self.holds.get_mut(lane) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        }
    }
}

/// Lays out commit windows.
///
/// Each call to [`build`](Self::build) starts from an empty lane table; the
/// builder only keeps the final table around for inspection.
///
/// # Example
///
/// ```
/// use lanegraph::core::graph::CommitGraphBuilder;
/// use lanegraph::core::types::{Commit, Ref};
///
/// let commits = vec![
///     Commit::new("c2", ["c1"]),
///     Commit::new("c1", Vec::<String>::new()),
/// ];
/// let refs = vec![Ref::local("main", "c2")];
///
/// let mut builder = CommitGraphBuilder::new();
/// let nodes = builder.build(&commits, &refs);
///
/// assert_eq!(nodes[0].lane, nodes[1].lane);
/// assert_eq!(nodes[0].labels, vec!["main"]);
/// assert_eq!(builder.active_lanes(), 0);
/// ```
#[derive(Debug, Default)]
pub struct CommitGraphBuilder<'a> {
    table: LaneTable<'a>,
}

impl<'a> CommitGraphBuilder<'a> {
    /// Create a builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay out `commits` (newest first) and attach `refs` as labels.
    ///
    /// Returns one node per distinct sha, in input order. Later
    /// duplicates of a sha are skipped.
    pub fn build(&mut self, commits: &'a [Commit], refs: &'a [Ref]) -> Vec<CommitNode<'a>> {
        self.table = LaneTable::default();

        let window: HashSet<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        let mut nodes = Vec::with_capacity(window.len());

        for commit in commits {
            let sha = commit.sha.as_str();
            if self.table.contains(sha) {
                debug!(sha, "skipping duplicate commit");
                continue;
            }

            let lane = self.table.assign(sha);
            self.table.resolve(sha, lane);
            self.table.open(commit, lane, &window);
            self.table.finish(lane);

            nodes.push(CommitNode {
                sha,
                parents: &commit.parents,
                lane,
                sequence_index: nodes.len(),
                labels: Vec::new(),
            });
        }

        attach_labels(&mut nodes, refs);
        nodes
    }

    /// Lanes still active after the last build.
    ///
    /// Zero whenever every in-window parent was reached after its children.
    pub fn active_lanes(&self) -> usize {
        self.table.allocator.active_count()
    }

    /// Lane assigned to `sha` by the last build.
    pub fn lane_of(&self, sha: &str) -> Option<usize> {
        self.table.lanes.get(sha).copied()
    }
}

/// Lay out `commits` (newest first) with a fresh builder.
pub fn build<'a>(commits: &'a [Commit], refs: &'a [Ref]) -> Vec<CommitNode<'a>> {
    CommitGraphBuilder::new().build(commits, refs)
}

/// Append each ref's name to the node it points at, in ref order.
fn attach_labels<'a>(nodes: &mut [CommitNode<'a>], refs: &'a [Ref]) {
    let rows: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(row, node)| (node.sha, row))
        .collect();

    for r in refs {
        if let Some(&row) = rows.get(r.sha.as_str()) {
            nodes[row].labels.push(r.name.as_str());
        }
    }
}
