//! The single-template matcher.
//!
//! A [`SingleMatcher`] answers two questions for a traversal driver: can a
//! node tuple contain any match at all ([`SingleMatcher::node_tuple_feasible`]),
//! and which point tuples inside an all-leaf node tuple match
//! ([`SingleMatcher::compute_base_case`]).

use npoint_core::{distance_sq, MatcherTemplate, PointSet, TreeNode};
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::node_tuple::NodeTuple;
use crate::pruning::{prune_node_tuple, test_point_pair};
use crate::results::{MatchOutcome, MatchResults};
use crate::stats::MatchStats;
use crate::tracker::PermutationTracker;

#[cfg(test)]
mod tests;

/// Matches one template against node tuples drawn from a slice of point
/// sets.
///
/// The template and point sets are borrowed read-only; results and
/// statistics are owned, so independent matchers can run on separate
/// threads and be merged afterwards.
///
/// # Example
///
/// ```
/// use npoint_core::{DistanceBounds, MatcherTemplate};
/// use npoint_matcher::{NodeTuple, SingleMatcher};
/// use npoint_test::{line_points, KdTree};
///
/// let template = MatcherTemplate::exact(DistanceBounds::uniform(2, 1.0, 4.0).unwrap()).unwrap();
/// let tree = KdTree::build(&line_points(&[0.0, 1.0, 2.0, 5.0]), 8);
/// let sets = [tree.points().clone()];
///
/// let tuple: NodeTuple<_> = [(0, tree.root()), (0, tree.root())].into_iter().collect();
/// let mut matcher = SingleMatcher::new(&template, &sets);
/// if matcher.node_tuple_feasible(&tuple) {
///     matcher.compute_base_case(&tuple);
/// }
///
/// assert_eq!(matcher.results(), &[3, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct SingleMatcher<'a> {
    template: &'a MatcherTemplate,
    sets: &'a [PointSet],
    results: MatchResults,
    stats: MatchStats,
}

impl<'a> SingleMatcher<'a> {
    pub fn new(template: &'a MatcherTemplate, sets: &'a [PointSet]) -> Self {
        Self {
            template,
            sets,
            results: MatchResults::new(template.tuple_size(), template.num_random()),
            stats: MatchStats::default(),
        }
    }

    pub fn template(&self) -> &'a MatcherTemplate {
        self.template
    }

    /// Returns false if no point tuple drawn from `tuple`'s nodes can match
    /// under any permutation.
    ///
    /// A true answer does not promise a match.
    ///
    /// # Panics
    ///
    /// Panics if `tuple` does not have exactly `tuple_size` members.
    pub fn node_tuple_feasible<N: TreeNode>(&mut self, tuple: &NodeTuple<'_, N>) -> bool {
        self.check_arity(tuple);
        let mut tracker = PermutationTracker::all_plausible(self.template.num_permutations());
        let feasible = prune_node_tuple(self.template, tuple, &mut tracker);
        self.stats.record_node_tuple(!feasible);
        feasible
    }

    /// Enumerates every point tuple in `tuple`'s nodes and records the
    /// matches.
    ///
    /// Positions sharing a node only take strictly increasing point indices,
    /// so each unordered selection from a shared node is tested once.
    /// Matches land in the stratum given by the number of members whose
    /// point set is random.
    ///
    /// # Panics
    ///
    /// Panics if `tuple` does not have exactly `tuple_size` members, refers
    /// to an unknown set id, mixes point sets of different dimensions, or
    /// owns indices outside its set.
    pub fn compute_base_case<N: TreeNode>(&mut self, tuple: &NodeTuple<'_, N>) {
        self.check_arity(tuple);
        self.check_dimensions(tuple);
        self.stats.record_base_case();
        let before = self.stats;

        let stratum = tuple
            .iter()
            .filter(|&(set, _)| self.sets[set].is_random())
            .count();
        if stratum != self.template.num_random() {
            debug!(
                event = "stratum_mismatch",
                stratum,
                num_random = self.template.num_random(),
            );
        }
        let root = PermutationTracker::all_plausible(self.template.num_permutations());
        let mut assignment: SmallVec<[usize; 6]> = smallvec![0; tuple.len()];
        self.enumerate(tuple, 0, &root, &mut assignment, 1.0, stratum);

        debug!(
            event = "base_case",
            stratum,
            matches = self.stats.tuples_matched - before.tuples_matched,
            candidates = self.stats.candidates_visited - before.candidates_visited,
            pair_distances = self.stats.pair_distance_evaluations - before.pair_distance_evaluations,
        );
    }

    // Assigns position `k` and recurses; `inherited` reflects the pairs
    // among positions `0..k`.
    fn enumerate<N: TreeNode>(
        &mut self,
        tuple: &NodeTuple<'_, N>,
        k: usize,
        inherited: &PermutationTracker,
        assignment: &mut [usize],
        weight: f64,
        stratum: usize,
    ) {
        let sets = self.sets;
        let set = &sets[tuple.set(k)];
        let last = k + 1 == tuple.len();
        let mut tracker = inherited.clone();

        'candidates: for candidate in tuple.node(k).point_range() {
            self.stats.record_candidate();
            tracker.clone_from(inherited);
            let point = set.point(candidate);

            for j in 0..k {
                if tuple.shares_node(j, k) && candidate <= assignment[j] {
                    self.stats.record_symmetry_rejection();
                    continue 'candidates;
                }
                let dist_sq = distance_sq(sets[tuple.set(j)].point(assignment[j]), point);
                self.stats.record_pair_distance();
                if !test_point_pair(self.template, dist_sq, j, k, &mut tracker) {
                    continue 'candidates;
                }
            }

            assignment[k] = candidate;
            let weight = weight * set.weight(candidate);
            if last {
                self.results.record(stratum, weight);
                self.stats.record_match();
            } else {
                self.enumerate(tuple, k + 1, &tracker, assignment, weight, stratum);
            }
        }
    }

    fn check_arity<N: TreeNode>(&self, tuple: &NodeTuple<'_, N>) {
        assert_eq!(
            tuple.len(),
            self.template.tuple_size(),
            "node tuple has {} members, template expects {}",
            tuple.len(),
            self.template.tuple_size()
        );
    }

    fn check_dimensions<N: TreeNode>(&self, tuple: &NodeTuple<'_, N>) {
        let dim = self.sets[tuple.set(0)].dim();
        for (set, _) in tuple.iter() {
            assert_eq!(
                self.sets[set].dim(),
                dim,
                "point set {set} has dimension {}, expected {dim}",
                self.sets[set].dim()
            );
        }
    }

    /// Match counts indexed by stratum.
    pub fn results(&self) -> &[u64] {
        self.results.counts()
    }

    /// Weight sums indexed by stratum.
    pub fn weighted_results(&self) -> &[f64] {
        self.results.weighted_counts()
    }

    pub fn match_results(&self) -> &MatchResults {
        &self.results
    }

    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    /// Snapshot of results and statistics.
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome {
            results: self.results.clone(),
            stats: self.stats,
        }
    }

    pub fn into_outcome(self) -> MatchOutcome {
        MatchOutcome {
            results: self.results,
            stats: self.stats,
        }
    }

    /// Zeroes results and statistics for a new query.
    pub fn reset(&mut self) {
        self.results.clear();
        self.stats = MatchStats::default();
    }
}
