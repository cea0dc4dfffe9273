//! Tree-node interface consumed by the matcher.
//!
//! Building the tree is left to the caller; the matcher only needs each
//! node's bounding region and the contiguous range of point indices it owns.

use std::ops::Range;

use crate::geometry::BoundingRegion;

/// A node of a spatial tree built over one point set.
///
/// Node identity matters: the matcher treats two tuple positions as sharing
/// a node only when they refer to the very same node value, and then
/// enforces increasing point indices between them.
pub trait TreeNode {
    /// The bounding region type of this tree.
    type Bound: BoundingRegion;

    /// Bounding region enclosing every point of this node.
    fn bound(&self) -> &Self::Bound;

    /// First point index owned by this node.
    fn begin(&self) -> usize;

    /// One past the last point index owned by this node.
    fn end(&self) -> usize;

    /// Returns true if this node has no children.
    fn is_leaf(&self) -> bool;

    /// Point indices owned by this node.
    fn point_range(&self) -> Range<usize> {
        self.begin()..self.end()
    }

    /// Number of points owned by this node.
    fn count(&self) -> usize {
        self.end() - self.begin()
    }
}
