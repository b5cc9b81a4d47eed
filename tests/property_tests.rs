//! Property-based tests for the layout engine.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated history windows.

use std::collections::HashSet;

use proptest::prelude::*;

use lanegraph::core::graph::{layout, route, BranchColorizer, CommitGraphBuilder, EdgeKind};
use lanegraph::core::types::{Commit, Ref};

/// Strategy for a well-formed window: `c0` is newest, parents are always
/// older commits or (when flagged) commits outside the window.
fn window() -> impl Strategy<Value = Vec<Commit>> {
    let parent = (0usize..1000, prop::bool::weighted(0.1));
    prop::collection::vec(prop::collection::vec(parent, 0..4), 1..40).prop_map(|raw| {
        let n = raw.len();
        raw.into_iter()
            .enumerate()
            .map(|(i, picks)| {
                let older = n - i - 1;
                let parents: Vec<String> = picks
                    .into_iter()
                    .map(|(pick, outside)| {
                        if outside || older == 0 {
                            format!("outside{}", pick)
                        } else {
                            format!("c{}", i + 1 + pick % older)
                        }
                    })
                    .collect();
                Commit::new(format!("c{}", i), parents)
            })
            .collect()
    })
}

/// Strategy for arbitrary input: shas from a tiny alphabet, so duplicates,
/// self-parents, and parents listed before children all occur.
fn messy_window() -> impl Strategy<Value = Vec<Commit>> {
    let sha = prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]);
    prop::collection::vec((sha.clone(), prop::collection::vec(sha, 0..3)), 0..20).prop_map(
        |raw| {
            raw.into_iter()
                .map(|(sha, parents)| Commit::new(sha, parents))
                .collect()
        },
    )
}

/// Strategy for refs pointing at commits of a well-formed window.
fn refs_for(len: usize) -> impl Strategy<Value = Vec<Ref>> {
    let name = "[a-z][a-z0-9/_-]{0,12}";
    prop::collection::vec((name, 0..len.max(1)), 0..6).prop_map(|raw| {
        raw.into_iter()
            .map(|(name, i)| Ref::local(name, format!("c{}", i)))
            .collect()
    })
}

fn window_with_refs() -> impl Strategy<Value = (Vec<Commit>, Vec<Ref>)> {
    window().prop_flat_map(|commits| {
        let len = commits.len();
        (Just(commits), refs_for(len))
    })
}

proptest! {
    #[test]
    fn every_commit_gets_one_node_in_order(commits in window()) {
        let nodes = lanegraph::core::graph::build(&commits, &[]);

        prop_assert_eq!(nodes.len(), commits.len());
        for (i, (node, commit)) in nodes.iter().zip(commits.iter()).enumerate() {
            prop_assert_eq!(node.sha, commit.sha.as_str());
            prop_assert_eq!(node.sequence_index, i);
            prop_assert!(node.lane < commits.len());
        }
    }

    #[test]
    fn well_formed_windows_leak_no_lanes(commits in window()) {
        let mut builder = CommitGraphBuilder::new();
        builder.build(&commits, &[]);
        prop_assert_eq!(builder.active_lanes(), 0);
    }

    #[test]
    fn layout_is_deterministic((commits, refs) in window_with_refs()) {
        let colors = BranchColorizer::default();
        let first = serde_json::to_string(&layout(&commits, &refs, &colors)).unwrap();
        let second = serde_json::to_string(&layout(&commits, &refs, &colors)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn continuations_only_follow_primary_parents(commits in window()) {
        let nodes = lanegraph::core::graph::build(&commits, &[]);
        let edges = route(&nodes, &BranchColorizer::default());

        for edge in &edges {
            let child = commits.iter().find(|c| c.sha == edge.from_sha).unwrap();
            if edge.kind == EdgeKind::Continuation {
                prop_assert_eq!(child.primary_parent(), Some(edge.to_sha));
            }
        }
    }

    #[test]
    fn edges_cover_each_distinct_in_window_parent(commits in window()) {
        let nodes = lanegraph::core::graph::build(&commits, &[]);
        let edges = route(&nodes, &BranchColorizer::default());

        let shas: HashSet<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        let expected: usize = commits
            .iter()
            .map(|c| {
                c.parents
                    .iter()
                    .map(String::as_str)
                    .filter(|p| shas.contains(p))
                    .collect::<HashSet<_>>()
                    .len()
            })
            .sum();

        prop_assert_eq!(edges.len(), expected);
        for edge in &edges {
            let from = nodes.iter().find(|n| n.sha == edge.from_sha).unwrap();
            let to = nodes.iter().find(|n| n.sha == edge.to_sha).unwrap();
            prop_assert_eq!(edge.kind == EdgeKind::Continuation, from.lane == to.lane);
        }
    }

    #[test]
    fn messy_input_never_panics_and_dedups(commits in messy_window()) {
        let graph = layout(&commits, &[], &BranchColorizer::default());

        let unique: HashSet<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        prop_assert_eq!(graph.nodes.len(), unique.len());
        for (i, node) in graph.nodes.iter().enumerate() {
            prop_assert_eq!(node.sequence_index, i);
        }
        prop_assert!(graph.edges.iter().all(|e| e.from_sha != e.to_sha));
    }

    #[test]
    fn color_is_stable_and_from_palette(name in "\\PC{0,32}") {
        let colors = BranchColorizer::default();
        let color = colors.color_of(&name);
        prop_assert_eq!(color, colors.color_of(&name));
        prop_assert!(colors.palette().contains(color));
    }
}
