//! Parallel evaluation of independent node tuples.
//!
//! Each rayon worker folds its share of the batch into a private
//! [`SingleMatcher`]; the per-worker outcomes are merged in the reduce step.
//! The template and point sets are only ever read.

use npoint_core::error::{NpointError, Result};
use npoint_core::{MatcherTemplate, PointSet, TreeNode};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::matcher::SingleMatcher;
use crate::node_tuple::NodeTuple;
use crate::results::MatchOutcome;

/// Thread count configuration for batch evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThreadCount {
    /// Automatically determine based on available CPU cores.
    #[default]
    Auto,
    /// Use all available CPU cores.
    Unlimited,
    /// Use a specific number of threads.
    Specific(usize),
}

impl ThreadCount {
    /// Resolves the thread count for a batch of `work_items` node tuples.
    ///
    /// `Auto` and `Specific` never use more threads than there are tuples.
    pub fn resolve(&self, work_items: usize) -> usize {
        let cpus = || {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(1)
        };
        match self {
            ThreadCount::Auto => cpus().min(work_items),
            ThreadCount::Unlimited => cpus(),
            ThreadCount::Specific(n) => (*n).min(work_items),
        }
    }
}

impl std::fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThreadCount::Auto => write!(f, "Auto"),
            ThreadCount::Unlimited => write!(f, "Unlimited"),
            ThreadCount::Specific(n) => write!(f, "{}", n),
        }
    }
}

/// Runs the feasibility check on every node tuple and the base case on
/// those that pass, returning the merged outcome.
///
/// With one resolved thread, or at most one tuple, the batch runs on the
/// calling thread.
///
/// # Errors
///
/// Returns [`NpointError::ThreadPool`] if the worker pool cannot be built.
///
/// # Example
///
/// ```
/// use npoint_core::{DistanceBounds, MatcherTemplate};
/// use npoint_matcher::{evaluate_node_tuples, NodeTuple, ThreadCount};
/// use npoint_test::{line_points, KdTree};
///
/// let template = MatcherTemplate::exact(DistanceBounds::uniform(2, 1.0, 4.0).unwrap()).unwrap();
/// let tree = KdTree::build(&line_points(&[0.0, 1.0, 2.0, 5.0]), 1);
/// let sets = [tree.points().clone()];
///
/// let leaves = tree.leaves();
/// let mut tuples = Vec::new();
/// for (j, a) in leaves.iter().enumerate() {
///     for b in &leaves[j..] {
///         tuples.push([(0, *a), (0, *b)].into_iter().collect::<NodeTuple<_>>());
///     }
/// }
///
/// let outcome = evaluate_node_tuples(&template, &sets, &tuples, ThreadCount::Specific(2)).unwrap();
/// assert_eq!(outcome.results.count(0), 3);
/// ```
pub fn evaluate_node_tuples<N>(
    template: &MatcherTemplate,
    sets: &[PointSet],
    tuples: &[NodeTuple<'_, N>],
    thread_count: ThreadCount,
) -> Result<MatchOutcome>
where
    N: TreeNode + Sync,
{
    let threads = thread_count.resolve(tuples.len());
    info!(
        event = "batch_start",
        node_tuples = tuples.len(),
        tuple_size = template.tuple_size(),
        permutations = template.num_permutations(),
        threads,
    );

    let outcome = if threads <= 1 || tuples.len() <= 1 {
        let mut matcher = SingleMatcher::new(template, sets);
        for tuple in tuples {
            evaluate(&mut matcher, tuple);
        }
        matcher.into_outcome()
    } else {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| NpointError::ThreadPool(e.to_string()))?;
        pool.install(|| {
            tuples
                .par_iter()
                .fold(
                    || SingleMatcher::new(template, sets),
                    |mut matcher, tuple| {
                        evaluate(&mut matcher, tuple);
                        matcher
                    },
                )
                .map(SingleMatcher::into_outcome)
                .reduce(
                    || MatchOutcome::new(template.tuple_size(), template.num_random()),
                    |mut acc, part| {
                        acc.merge(&part);
                        acc
                    },
                )
        })
    };

    info!(
        event = "batch_end",
        matches = outcome.results.total_count(),
        weighted = outcome.results.total_weighted(),
        pruned = outcome.stats.node_tuples_pruned,
        base_cases = outcome.stats.base_cases,
    );
    Ok(outcome)
}

fn evaluate<N: TreeNode>(matcher: &mut SingleMatcher<'_>, tuple: &NodeTuple<'_, N>) {
    if matcher.node_tuple_feasible(tuple) {
        matcher.compute_base_case(tuple);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npoint_core::{DistanceBounds, Permutations};
    use npoint_test::{init_test_logging, random_points, KdNode, KdTree};

    #[test]
    fn test_thread_count_default() {
        assert_eq!(ThreadCount::default(), ThreadCount::Auto);
    }

    #[test]
    fn test_thread_count_display() {
        assert_eq!(format!("{}", ThreadCount::Auto), "Auto");
        assert_eq!(format!("{}", ThreadCount::Unlimited), "Unlimited");
        assert_eq!(format!("{}", ThreadCount::Specific(4)), "4");
    }

    #[test]
    fn test_thread_count_resolve() {
        assert_eq!(ThreadCount::Specific(4).resolve(10), 4);
        assert_eq!(ThreadCount::Specific(10).resolve(4), 4);
        assert_eq!(ThreadCount::Auto.resolve(0), 0);
        assert!(ThreadCount::Auto.resolve(100) > 0);
        assert!(ThreadCount::Unlimited.resolve(1) > 0);
    }

    fn leaf_pairs(tree: &KdTree) -> Vec<NodeTuple<'_, KdNode>> {
        let leaves = tree.leaves();
        let mut tuples = Vec::new();
        for (j, a) in leaves.iter().enumerate() {
            for b in &leaves[j..] {
                tuples.push([(0, *a), (0, *b)].into_iter().collect());
            }
        }
        tuples
    }

    #[test]
    fn test_parallel_matches_sequential() {
        init_test_logging();
        let template = MatcherTemplate::new(
            DistanceBounds::uniform(2, 0.01, 0.09).unwrap(),
            0,
            Permutations::symmetric_group(2),
        )
        .unwrap();
        let tree = KdTree::build(&random_points(200, 2, 23), 10);
        let sets = [tree.points().clone()];
        let tuples = leaf_pairs(&tree);

        let sequential =
            evaluate_node_tuples(&template, &sets, &tuples, ThreadCount::Specific(1)).unwrap();
        let parallel =
            evaluate_node_tuples(&template, &sets, &tuples, ThreadCount::Specific(4)).unwrap();

        assert_eq!(sequential.results.counts(), parallel.results.counts());
        assert_eq!(sequential.stats, parallel.stats);
        assert!((sequential.results.total_weighted() - parallel.results.total_weighted()).abs() < 1e-9);
        assert!(sequential.stats.node_tuples_pruned > 0);
    }

    #[test]
    fn test_empty_batch() {
        let template =
            MatcherTemplate::exact(DistanceBounds::uniform(2, 0.0, 1.0).unwrap()).unwrap();
        let tuples: Vec<NodeTuple<'_, KdNode>> = Vec::new();

        let outcome = evaluate_node_tuples(&template, &[], &tuples, ThreadCount::Auto).unwrap();
        assert_eq!(outcome, MatchOutcome::new(2, 0));
    }
}
