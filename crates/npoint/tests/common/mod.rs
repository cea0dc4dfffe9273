//! Reference traversal driver for integration tests.
//!
//! Descends kd-tree fixtures depth-first, asking the matcher whether each
//! node tuple is feasible and running the base case once every member is a
//! leaf. Positions drawing from the same set always sit on identical or
//! disjoint nodes, and a later position never sits on a node that precedes
//! an earlier one, so each point combination is reached exactly once.

#![allow(dead_code)]

use npoint::{MatchOutcome, MatcherTemplate, NodeTuple, PointSet, SingleMatcher, TreeNode};
use npoint_test::{KdNode, KdTree};

/// Counts every match of `template`, position `k` drawing from
/// `trees[set_ids[k]]`.
pub fn run_traversal(template: &MatcherTemplate, trees: &[KdTree], set_ids: &[usize]) -> MatchOutcome {
    let sets = point_sets(trees);
    let mut matcher = SingleMatcher::new(template, &sets);
    let root: NodeTuple<_> = set_ids.iter().map(|&s| (s, trees[s].root())).collect();
    traverse(&mut matcher, trees, &root);
    matcher.into_outcome()
}

/// The reordered point sets the trees' node ranges index into.
pub fn point_sets(trees: &[KdTree]) -> Vec<PointSet> {
    trees.iter().map(|t| t.points().clone()).collect()
}

pub fn traverse<'a>(matcher: &mut SingleMatcher<'_>, trees: &'a [KdTree], tuple: &NodeTuple<'a, KdNode>) {
    if !in_order(tuple) || !matcher.node_tuple_feasible(tuple) {
        return;
    }

    let split = (0..tuple.len())
        .filter(|&k| !tuple.node(k).is_leaf())
        .max_by_key(|&k| tuple.node(k).count());
    let Some(k) = split else {
        matcher.compute_base_case(tuple);
        return;
    };

    let (left, right) = trees[tuple.set(k)]
        .children(tuple.node(k))
        .expect("non-leaf has children");
    let sharing: Vec<usize> = (0..tuple.len()).filter(|&j| tuple.shares_node(j, k)).collect();

    for mask in 0..(1usize << sharing.len()) {
        let mut child = tuple.clone();
        for (bit, &j) in sharing.iter().enumerate() {
            let node = if (mask >> bit) & 1 == 0 { left } else { right };
            child = child.with_node(j, node);
        }
        traverse(matcher, trees, &child);
    }
}

/// Every all-leaf node tuple in traversal order, without pruning.
pub fn leaf_tuples<'a>(trees: &'a [KdTree], set_ids: &[usize]) -> Vec<NodeTuple<'a, KdNode>> {
    let mut tuples = vec![NodeTuple::new()];
    for &set in set_ids {
        let leaves = trees[set].leaves();
        tuples = tuples
            .into_iter()
            .flat_map(|tuple| {
                leaves.iter().map(move |&leaf| {
                    let mut next = tuple.clone();
                    next.push(set, leaf);
                    next
                })
            })
            .filter(in_order)
            .collect();
    }
    tuples
}

// Same-set positions j < k must not have k's node before j's.
fn in_order(tuple: &NodeTuple<'_, KdNode>) -> bool {
    (0..tuple.len()).all(|k| {
        (0..k).all(|j| tuple.set(j) != tuple.set(k) || tuple.node(k).end() > tuple.node(j).begin())
    })
}
