//! Distance tests that refine a [`PermutationTracker`].
//!
//! Both tests map the tuple positions `(i, j)` through every still-plausible
//! permutation `p` onto template cell `(p(i), p(j))` and invalidate `p` when
//! the pair cannot satisfy that cell's range. They report whether any
//! permutation survives.

use npoint_core::{BoundingRegion, MatcherTemplate, TreeNode};
use tracing::trace;

use crate::node_tuple::NodeTuple;
use crate::tracker::PermutationTracker;

/// Tests two bounding regions at positions `(i, j)`.
///
/// A permutation is invalidated when even the farthest pair of points is
/// closer than the cell's lower bound, or the nearest pair is farther than
/// its upper bound.
pub fn test_region_pair<B: BoundingRegion>(
    template: &MatcherTemplate,
    a: &B,
    b: &B,
    i: usize,
    j: usize,
    tracker: &mut PermutationTracker,
) -> bool {
    let (min_sq, max_sq) = a.distance_range_sq(b);
    let bounds = template.bounds();
    for perm in 0..tracker.len() {
        if !tracker.is_plausible(perm) {
            continue;
        }
        let (pi, pj) = template.permuted_cell(perm, i, j);
        if max_sq < bounds.lower_sq(pi, pj) || min_sq > bounds.upper_sq(pi, pj) {
            tracker.invalidate(perm);
        }
    }
    tracker.any_plausible()
}

/// Tests an exact squared distance between the points at positions `(i, j)`.
///
/// Every plausible permutation is checked; there is no early exit once one
/// is known to pass.
pub fn test_point_pair(
    template: &MatcherTemplate,
    dist_sq: f64,
    i: usize,
    j: usize,
    tracker: &mut PermutationTracker,
) -> bool {
    let bounds = template.bounds();
    for perm in 0..tracker.len() {
        if !tracker.is_plausible(perm) {
            continue;
        }
        let (pi, pj) = template.permuted_cell(perm, i, j);
        if !bounds.contains(pi, pj, dist_sq) {
            tracker.invalidate(perm);
        }
    }
    tracker.any_plausible()
}

/// Runs [`test_region_pair`] over every pair `i < j` of `tuple`, in order,
/// stopping at the first pair that leaves no permutation plausible.
pub fn prune_node_tuple<N: TreeNode>(
    template: &MatcherTemplate,
    tuple: &NodeTuple<'_, N>,
    tracker: &mut PermutationTracker,
) -> bool {
    let n = tuple.len();
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (tuple.node(i).bound(), tuple.node(j).bound());
            if !test_region_pair(template, a, b, i, j, tracker) {
                trace!(event = "node_tuple_pruned", i, j, tuple = ?tuple);
                return false;
            }
        }
    }
    true
}
