//! Shared test fixtures for npoint crates.
//!
//! This crate provides point clouds, a kd-tree, and a brute-force oracle.
//! It does NOT depend on `npoint-matcher` to avoid circular dependencies;
//! traversal drivers that need the matcher live in the tests that use them.
//!
//! - [`points`] - Deterministic point clouds and weight helpers
//! - [`kdtree`] - Median-split kd-tree whose nodes implement `TreeNode`
//! - [`oracle`] - Exhaustive tuple counting for cross-checks
//! - [`logging`] - Tracing subscriber setup for tests
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! npoint-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use npoint_test::{line_points, KdTree, brute_force_count};
//! ```

pub mod kdtree;
pub mod logging;
pub mod oracle;
pub mod points;

pub use kdtree::{KdNode, KdTree};
pub use logging::init_test_logging;
pub use oracle::{brute_force_count, OracleCount};
pub use points::{grid_points, line_points, random_points, weighted};
