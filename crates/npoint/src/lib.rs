//! npoint - Multi-tree n-point correlation matching in Rust
//!
//! Count the tuples of points whose pairwise distances fit a template,
//! with pruning over spatial-tree node tuples and exact enumeration at the
//! leaves.
//!
//! # Example
//!
//! ```rust
//! use npoint::prelude::*;
//! use npoint_test::{line_points, KdTree};
//!
//! let config = MatcherConfig::new()
//!     .with_tuple_size(2)
//!     .with_uniform_bounds(1.0, 2.0)
//!     .with_thread_count(ThreadCountConfig::Specific(1));
//!
//! let tree = KdTree::build(&line_points(&[0.0, 1.0, 2.0, 5.0]), 8);
//! let sets = [tree.points().clone()];
//! let tuples = vec![NodeTuple::from_iter([(0, tree.root()), (0, tree.root())])];
//!
//! let outcome = run_matcher(&config, &sets, &tuples).unwrap();
//! assert_eq!(outcome.results.count(0), 3);
//! ```

// Core types
pub use npoint_core::{
    distance_sq, BoundingRegion, DistanceBounds, HRectBound, MatcherTemplate, NpointError,
    Permutations, PointSet, PointSetKind, TreeNode,
};

// Configuration
pub use npoint_config::{
    BoundsConfig, ByLabelConfig, ConfigError, ExecutionConfig, ExplicitPermutationConfig,
    MatcherConfig, PermutationConfig, ThreadCountConfig,
};

// Matching engine
pub use npoint_matcher::{
    evaluate_node_tuples, MatchOutcome, MatchResults, MatchStats, NodeTuple, PermutationTracker,
    SingleMatcher, TemplateBuilder, ThreadCount,
};

mod runner;
pub use runner::run_matcher;

pub mod prelude {
    pub use super::{
        run_matcher, DistanceBounds, MatchOutcome, MatcherConfig, MatcherTemplate, NodeTuple,
        Permutations, PointSet, PointSetKind, SingleMatcher, ThreadCountConfig, TreeNode,
    };
}
