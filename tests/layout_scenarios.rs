//! Layout scenarios exercised through the public engine API.
//!
//! Each test describes a small history shape and checks the lanes, edges,
//! and colors a renderer would receive for it.

use lanegraph::core::graph::{layout, route, BranchColorizer, CommitGraphBuilder, EdgeKind};
use lanegraph::core::types::{Color, Commit, Ref};

fn commit(sha: &str, parents: &[&str]) -> Commit {
    Commit::new(sha, parents.iter().copied())
}

fn lane_of(nodes: &[lanegraph::core::graph::CommitNode<'_>], sha: &str) -> usize {
    nodes
        .iter()
        .find(|n| n.sha == sha)
        .map(|n| n.lane)
        .unwrap_or_else(|| panic!("no node for {}", sha))
}

// =============================================================================
// Shapes
// =============================================================================

#[test]
fn linear_history_shares_one_lane() {
    let commits = vec![commit("c3", &["c2"]), commit("c2", &["c1"]), commit("c1", &[])];

    let mut builder = CommitGraphBuilder::new();
    let nodes = builder.build(&commits, &[]);

    assert!(nodes.iter().all(|n| n.lane == 0));
    assert_eq!(builder.active_lanes(), 0);

    let edges = route(&nodes, &BranchColorizer::default());
    assert_eq!(edges.len(), 2);
    assert!(edges.iter().all(|e| e.kind == EdgeKind::Continuation));
}

#[test]
fn branch_point_gives_children_distinct_lanes() {
    let commits = vec![commit("b", &["a"]), commit("c", &["a"]), commit("a", &[])];

    let mut builder = CommitGraphBuilder::new();
    let nodes = builder.build(&commits, &[]);

    let (a, b, c) = (lane_of(&nodes, "a"), lane_of(&nodes, "b"), lane_of(&nodes, "c"));
    assert_ne!(b, c);
    assert!(a == b || a == c);
    // The child that does not continue a's lane got a fresh one.
    assert_eq!(c, 1);
    assert_eq!(builder.active_lanes(), 0);
}

#[test]
fn branch_and_merge() {
    let commits = vec![
        commit("m", &["b", "a2"]),
        commit("a2", &["a1"]),
        commit("b", &["a1"]),
        commit("a1", &[]),
    ];

    let graph = layout(&commits, &[], &BranchColorizer::default());
    let nodes = &graph.nodes;

    let (m, a2, b) = (lane_of(nodes, "m"), lane_of(nodes, "a2"), lane_of(nodes, "b"));
    assert_ne!(a2, b);
    assert!(m == a2 || m == b);

    let other = if m == b { "a2" } else { "b" };
    let edge = graph
        .edges
        .iter()
        .find(|e| e.from_sha == "m" && e.to_sha == other)
        .unwrap();
    assert_eq!(edge.kind, EdgeKind::BranchOrMerge);
}

#[test]
fn truncated_window_drops_edges_to_missing_parents() {
    let commits = vec![commit("x", &["missing"])];

    let mut builder = CommitGraphBuilder::new();
    let nodes = builder.build(&commits, &[]);
    let edges = route(&nodes, &BranchColorizer::default());

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].sha, "x");
    assert_eq!(nodes[0].lane, 0);
    assert!(edges.is_empty());
    assert_eq!(builder.active_lanes(), 0);
}

#[test]
fn empty_window() {
    let graph = layout(&[], &[], &BranchColorizer::default());
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
}

#[test]
fn merge_emits_both_edges_with_at_least_one_bend() {
    let commits = vec![commit("m", &["p1", "p2"]), commit("p1", &[]), commit("p2", &[])];

    let graph = layout(&commits, &[], &BranchColorizer::default());

    let from_m: Vec<_> = graph.edges.iter().filter(|e| e.from_sha == "m").collect();
    assert_eq!(from_m.len(), 2);
    assert_eq!(from_m[0].to_sha, "p1");
    assert_eq!(from_m[1].to_sha, "p2");
    assert!(from_m.iter().any(|e| e.kind == EdgeKind::BranchOrMerge));
}

#[test]
fn octopus_merge_moves_every_secondary_parent_off_the_merge_lane() {
    let commits = vec![
        commit("m", &["p1", "p2", "p3"]),
        commit("p1", &[]),
        commit("p2", &[]),
        commit("p3", &[]),
    ];

    let mut builder = CommitGraphBuilder::new();
    let nodes = builder.build(&commits, &[]);
    let m = lane_of(&nodes, "m");

    assert_eq!(lane_of(&nodes, "p1"), m);
    assert_ne!(lane_of(&nodes, "p2"), m);
    assert_ne!(lane_of(&nodes, "p3"), m);
    assert_eq!(builder.active_lanes(), 0);
}

#[test]
fn disjoint_roots_reuse_lane_zero() {
    let commits = vec![commit("a", &[]), commit("b", &[])];

    let mut builder = CommitGraphBuilder::new();
    let nodes = builder.build(&commits, &[]);

    assert_eq!(lane_of(&nodes, "a"), 0);
    assert_eq!(lane_of(&nodes, "b"), 0);
}

#[test]
fn long_lived_branch_keeps_its_lane_while_main_advances() {
    // main: m3 -> m2 -> m1 -> base; topic: t2 -> t1 -> base
    let commits = vec![
        commit("m3", &["m2"]),
        commit("t2", &["t1"]),
        commit("m2", &["m1"]),
        commit("t1", &["base"]),
        commit("m1", &["base"]),
        commit("base", &[]),
    ];

    let nodes = lanegraph::core::graph::build(&commits, &[]);

    let main_lane = lane_of(&nodes, "m3");
    let topic_lane = lane_of(&nodes, "t2");
    assert_ne!(main_lane, topic_lane);
    for sha in ["m2", "m1"] {
        assert_eq!(lane_of(&nodes, sha), main_lane);
    }
    assert_eq!(lane_of(&nodes, "t1"), topic_lane);
}

// =============================================================================
// Labels and Colors
// =============================================================================

#[test]
fn edges_take_color_of_childs_first_label() {
    let commits = vec![
        commit("m", &["b", "a2"]),
        commit("a2", &["a1"]),
        commit("b", &["a1"]),
        commit("a1", &[]),
    ];
    let refs = vec![
        Ref::local("main", "m"),
        Ref::local("release", "m"),
        Ref::local("topic", "a2"),
    ];
    let colors = BranchColorizer::default();

    let graph = layout(&commits, &refs, &colors);

    for edge in &graph.edges {
        let expected = match edge.from_sha {
            "m" => colors.color_of("main"),
            "a2" => colors.color_of("topic"),
            _ => colors.neutral(),
        };
        assert_eq!(&edge.color, expected, "edge {} -> {}", edge.from_sha, edge.to_sha);
    }
}

#[test]
fn labels_for_commits_outside_window_are_ignored() {
    let commits = vec![commit("c2", &["c1"]), commit("c1", &[])];
    let refs = vec![Ref::local("gone", "zzz"), Ref::remote("origin/main", "c1")];

    let graph = layout(&commits, &refs, &BranchColorizer::default());

    assert!(graph.nodes[0].labels.is_empty());
    assert_eq!(graph.nodes[1].labels, vec!["origin/main"]);
}

#[test]
fn main_maps_to_second_default_palette_entry() {
    let colors = BranchColorizer::default();
    assert_eq!(colors.color_of("main"), &Color::new("#e06c75").unwrap());
    assert_eq!(colors.color_of("main"), colors.color_of("main"));
}

#[test]
fn custom_palette_is_used_for_edges() {
    let only = Color::new("#123456").unwrap();
    let neutral = Color::new("#000000").unwrap();
    let colors = BranchColorizer::new(vec![only.clone()], neutral.clone()).unwrap();

    let commits = vec![commit("c2", &["c1"]), commit("c1", &["c0"]), commit("c0", &[])];
    let refs = vec![Ref::local("anything", "c2")];
    let graph = layout(&commits, &refs, &colors);

    assert_eq!(graph.edges[0].color, only);
    assert_eq!(graph.edges[1].color, neutral);
}

// =============================================================================
// Serialized Form
// =============================================================================

#[test]
fn layout_json_uses_camel_case_fields() {
    let commits = vec![
        commit("m", &["b", "a2"]),
        commit("a2", &["a1"]),
        commit("b", &["a1"]),
        commit("a1", &[]),
    ];
    let refs = vec![Ref::local("main", "m")];
    let graph = layout(&commits, &refs, &BranchColorizer::default());

    let json = serde_json::to_value(&graph).unwrap();

    let node = &json["nodes"][0];
    assert_eq!(node["sha"], "m");
    assert_eq!(node["lane"], 0);
    assert_eq!(node["sequenceIndex"], 0);
    assert_eq!(node["labels"][0], "main");
    assert!(node.get("parents").is_none());

    let edge = &json["edges"][1];
    assert_eq!(edge["fromSha"], "m");
    assert_eq!(edge["toSha"], "a2");
    assert_eq!(edge["kind"], "branchOrMerge");
    assert_eq!(edge["color"], "#e06c75");
}
