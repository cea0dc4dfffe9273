//! Match results stratified by random-point count.

use std::fmt;

use serde::Serialize;

use crate::stats::MatchStats;

/// Match counts and weight sums, one entry per stratum.
///
/// Stratum `r` holds tuples with exactly `r` positions drawn from random
/// point sets, so there are `tuple_size + 1` strata. Labels follow the usual
/// estimator notation: `DDR` is the stratum with two data points and one
/// random point.
///
/// # Example
///
/// ```
/// use npoint_matcher::MatchResults;
///
/// let mut results = MatchResults::new(3, 1);
/// results.record(1, 0.5);
/// results.record(1, 2.0);
///
/// assert_eq!(results.count(1), 2);
/// assert_eq!(results.weighted(1), 2.5);
/// assert_eq!(results.stratum_label(1), "DDR");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResults {
    num_random: usize,
    counts: Vec<u64>,
    weighted: Vec<f64>,
}

impl MatchResults {
    /// Zeroed results for tuples of `tuple_size` points.
    pub fn new(tuple_size: usize, num_random: usize) -> Self {
        Self {
            num_random,
            counts: vec![0; tuple_size + 1],
            weighted: vec![0.0; tuple_size + 1],
        }
    }

    /// Records one matched tuple with weight product `weight`.
    #[inline]
    pub fn record(&mut self, stratum: usize, weight: f64) {
        self.counts[stratum] += 1;
        self.weighted[stratum] += weight;
    }

    pub fn count(&self, stratum: usize) -> u64 {
        self.counts[stratum]
    }

    pub fn weighted(&self, stratum: usize) -> f64 {
        self.weighted[stratum]
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn weighted_counts(&self) -> &[f64] {
        &self.weighted
    }

    pub fn total_count(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn total_weighted(&self) -> f64 {
        self.weighted.iter().sum()
    }

    pub fn tuple_size(&self) -> usize {
        self.counts.len() - 1
    }

    /// Number of random positions designated by the template.
    pub fn num_random(&self) -> usize {
        self.num_random
    }

    /// Number of strata (`tuple_size + 1`).
    pub fn num_strata(&self) -> usize {
        self.counts.len()
    }

    /// Data/random label of stratum `stratum`, e.g. `"DRR"`.
    pub fn stratum_label(&self, stratum: usize) -> String {
        let n = self.tuple_size();
        assert!(stratum <= n, "stratum {stratum} out of range for tuple size {n}");
        let mut label = "D".repeat(n - stratum);
        label.push_str(&"R".repeat(stratum));
        label
    }

    /// Adds another accumulator of the same tuple size into this one.
    pub fn merge(&mut self, other: &MatchResults) {
        assert_eq!(
            self.counts.len(),
            other.counts.len(),
            "cannot merge results of different tuple sizes"
        );
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        for (a, b) in self.weighted.iter_mut().zip(&other.weighted) {
            *a += b;
        }
    }

    /// Zeroes every stratum.
    pub fn clear(&mut self) {
        self.counts.fill(0);
        self.weighted.fill(0.0);
    }
}

impl fmt::Display for MatchResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stratum in 0..self.num_strata() {
            writeln!(
                f,
                "{}: {} (weighted {})",
                self.stratum_label(stratum),
                self.counts[stratum],
                self.weighted[stratum]
            )?;
        }
        Ok(())
    }
}

/// Results and statistics of one matcher, or of several merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub results: MatchResults,
    pub stats: MatchStats,
}

impl MatchOutcome {
    /// Empty outcome for tuples of `tuple_size` points.
    pub fn new(tuple_size: usize, num_random: usize) -> Self {
        Self {
            results: MatchResults::new(tuple_size, num_random),
            stats: MatchStats::default(),
        }
    }

    pub fn merge(&mut self, other: &MatchOutcome) {
        self.results.merge(&other.results);
        self.stats.merge(&other.stats);
    }
}
