//! Multi-tree n-point matching engine for npoint.
//!
//! This crate provides:
//! - [`PermutationTracker`]: which template permutations a branch still allows
//! - Region and point-pair tests that refine a tracker ([`pruning`])
//! - [`SingleMatcher`]: node-tuple feasibility and the exact base case
//! - [`MatchResults`] and [`MatchStats`], mergeable across workers
//! - [`evaluate_node_tuples`]: rayon-parallel evaluation of a batch of node tuples
//! - [`TemplateBuilder`]: wiring from `npoint-config` types
//!
//! Tree construction and the traversal order are left to the caller: a
//! driver descends its trees, asks [`SingleMatcher::node_tuple_feasible`]
//! before recursing, and calls [`SingleMatcher::compute_base_case`] when it
//! stops.

pub mod builder;
pub mod matcher;
pub mod node_tuple;
pub mod parallel;
pub mod pruning;
pub mod results;
pub mod stats;
pub mod tracker;

pub use builder::TemplateBuilder;
pub use matcher::SingleMatcher;
pub use node_tuple::NodeTuple;
pub use parallel::{evaluate_node_tuples, ThreadCount};
pub use pruning::{prune_node_tuple, test_point_pair, test_region_pair};
pub use results::{MatchOutcome, MatchResults};
pub use stats::MatchStats;
pub use tracker::PermutationTracker;
