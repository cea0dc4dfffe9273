//! Exhaustive tuple counting.
//!
//! The oracle tries every index combination and every permutation, so it is
//! only usable on small sets. Positions drawing from the same set take
//! strictly increasing indices, which is the counting convention of the
//! matcher's symmetry tie-break.

use npoint_core::{distance_sq, MatcherTemplate, PointSet};

/// Matches found by [`brute_force_count`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OracleCount {
    /// Number of matching tuples.
    pub count: u64,
    /// Sum over matching tuples of the product of point weights.
    pub weighted: f64,
}

/// Counts every tuple matching `template`, position `k` drawing from
/// `sets[set_ids[k]]`.
///
/// # Example
///
/// ```
/// use npoint_core::{DistanceBounds, MatcherTemplate};
/// use npoint_test::{brute_force_count, line_points};
///
/// let template = MatcherTemplate::exact(DistanceBounds::uniform(2, 1.0, 4.0).unwrap()).unwrap();
/// let sets = [line_points(&[0.0, 1.0, 2.0, 5.0])];
///
/// assert_eq!(brute_force_count(&template, &sets, &[0, 0]).count, 3);
/// ```
pub fn brute_force_count(
    template: &MatcherTemplate,
    sets: &[PointSet],
    set_ids: &[usize],
) -> OracleCount {
    assert_eq!(set_ids.len(), template.tuple_size(), "one set per position");
    let mut assignment = vec![0; set_ids.len()];
    let mut total = OracleCount::default();
    visit(template, sets, set_ids, 0, &mut assignment, &mut total);
    total
}

fn visit(
    template: &MatcherTemplate,
    sets: &[PointSet],
    set_ids: &[usize],
    k: usize,
    assignment: &mut [usize],
    total: &mut OracleCount,
) {
    if k == set_ids.len() {
        if matches(template, sets, set_ids, assignment) {
            total.count += 1;
            total.weighted += (0..k)
                .map(|j| sets[set_ids[j]].weight(assignment[j]))
                .product::<f64>();
        }
        return;
    }

    let start = (0..k)
        .rev()
        .find(|&j| set_ids[j] == set_ids[k])
        .map_or(0, |j| assignment[j] + 1);
    for index in start..sets[set_ids[k]].len() {
        assignment[k] = index;
        visit(template, sets, set_ids, k + 1, assignment, total);
    }
}

fn matches(
    template: &MatcherTemplate,
    sets: &[PointSet],
    set_ids: &[usize],
    assignment: &[usize],
) -> bool {
    let n = assignment.len();
    let point = |k: usize| sets[set_ids[k]].point(assignment[k]);
    template.permutations().iter().any(|perm| {
        (0..n).all(|i| {
            ((i + 1)..n).all(|j| {
                template
                    .bounds()
                    .contains(perm[i], perm[j], distance_sq(point(i), point(j)))
            })
        })
    })
}
