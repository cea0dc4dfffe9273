//! Matcher statistics.
//!
//! Plain counters owned by one matcher; parallel workers keep their own and
//! merge them at the join point.

use serde::{Deserialize, Serialize};

/// Work counters for a matcher run.
///
/// # Example
///
/// ```
/// use npoint_matcher::MatchStats;
///
/// let mut stats = MatchStats::default();
/// stats.record_node_tuple(false);
/// stats.record_node_tuple(true);
/// stats.record_base_case();
///
/// assert_eq!(stats.node_tuples_tested, 2);
/// assert_eq!(stats.node_tuples_pruned, 1);
/// assert_eq!(stats.prune_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    /// Node tuples passed to the feasibility check.
    pub node_tuples_tested: u64,
    /// Node tuples the feasibility check rejected.
    pub node_tuples_pruned: u64,
    /// Base cases run.
    pub base_cases: u64,
    /// Candidate points considered across all base-case depths.
    pub candidates_visited: u64,
    /// Candidates rejected by the shared-node ordering rule.
    pub symmetry_rejections: u64,
    /// Exact point-pair distances computed.
    pub pair_distance_evaluations: u64,
    /// Complete tuples that matched.
    pub tuples_matched: u64,
}

impl MatchStats {
    /// Records a feasibility check and whether it pruned the tuple.
    pub fn record_node_tuple(&mut self, pruned: bool) {
        self.node_tuples_tested += 1;
        if pruned {
            self.node_tuples_pruned += 1;
        }
    }

    pub fn record_base_case(&mut self) {
        self.base_cases += 1;
    }

    pub fn record_candidate(&mut self) {
        self.candidates_visited += 1;
    }

    pub fn record_symmetry_rejection(&mut self) {
        self.symmetry_rejections += 1;
    }

    pub fn record_pair_distance(&mut self) {
        self.pair_distance_evaluations += 1;
    }

    pub fn record_match(&mut self) {
        self.tuples_matched += 1;
    }

    /// Adds another matcher's counters into this one.
    pub fn merge(&mut self, other: &MatchStats) {
        self.node_tuples_tested += other.node_tuples_tested;
        self.node_tuples_pruned += other.node_tuples_pruned;
        self.base_cases += other.base_cases;
        self.candidates_visited += other.candidates_visited;
        self.symmetry_rejections += other.symmetry_rejections;
        self.pair_distance_evaluations += other.pair_distance_evaluations;
        self.tuples_matched += other.tuples_matched;
    }

    /// Returns the prune rate (pruned / tested).
    pub fn prune_rate(&self) -> f64 {
        if self.node_tuples_tested == 0 {
            0.0
        } else {
            self.node_tuples_pruned as f64 / self.node_tuples_tested as f64
        }
    }

    /// Returns the match rate (matched / pair distances computed).
    pub fn match_rate(&self) -> f64 {
        if self.pair_distance_evaluations == 0 {
            0.0
        } else {
            self.tuples_matched as f64 / self.pair_distance_evaluations as f64
        }
    }
}
