//! Matcher entry point that hides the config wiring.

use npoint_config::MatcherConfig;
use npoint_core::error::Result;
use npoint_core::{PointSet, TreeNode};
use npoint_matcher::{evaluate_node_tuples, MatchOutcome, NodeTuple, TemplateBuilder};
use tracing::{debug, info};

/// Builds the template described by `config` and evaluates `tuples`
/// against `sets` with the configured thread count.
///
/// Node tuples refer to point sets by their index in `sets`.
///
/// # Errors
///
/// Returns an error if the configuration does not describe a valid
/// template, or the worker pool cannot be built.
pub fn run_matcher<N>(
    config: &MatcherConfig,
    sets: &[PointSet],
    tuples: &[NodeTuple<'_, N>],
) -> Result<MatchOutcome>
where
    N: TreeNode + Sync,
{
    let template = TemplateBuilder::build(config)?;
    let thread_count = TemplateBuilder::thread_count(&config.execution);

    info!(
        event = "run_start",
        tuple_size = template.tuple_size(),
        num_random = template.num_random(),
        point_sets = sets.len(),
        thread_count = %thread_count,
    );

    let outcome = evaluate_node_tuples(&template, sets, tuples, thread_count)?;

    debug!(event = "run_results", results = %outcome.results);
    info!(
        event = "run_end",
        matches = outcome.results.total_count(),
        prune_rate = outcome.stats.prune_rate(),
    );
    Ok(outcome)
}
