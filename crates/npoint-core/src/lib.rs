//! npoint Core - Core types and traits for n-point matching
//!
//! This crate provides the fundamental abstractions for npoint:
//! - Geometry primitives (squared distances, bounding regions)
//! - Point sets with per-point weights
//! - The tree-node interface consumed by the matcher
//! - Permutation sets and the immutable matcher template

pub mod error;
pub mod geometry;
pub mod permutation;
pub mod points;
pub mod template;
pub mod tree;

pub use error::NpointError;
pub use geometry::{distance_sq, BoundingRegion, HRectBound};
pub use permutation::Permutations;
pub use points::{PointSet, PointSetKind};
pub use template::{DistanceBounds, MatcherTemplate};
pub use tree::TreeNode;
