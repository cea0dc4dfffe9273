//! Ordered tuples of tree nodes, one per template position.

use std::fmt;

use npoint_core::TreeNode;
use smallvec::SmallVec;

/// One tree node per template position, each tagged with the id of the
/// point set it indexes into.
///
/// The set id is an index into the point-set slice handed to the matcher.
/// Two members share a node when they carry the same set id and refer to
/// the same node value; the base case then only enumerates strictly
/// increasing point indices between them.
///
/// # Example
///
/// ```
/// use npoint_matcher::NodeTuple;
/// use npoint_test::{line_points, KdTree};
///
/// let tree = KdTree::build(&line_points(&[0.0, 1.0, 2.0]), 8);
/// let mut tuple = NodeTuple::new();
/// tuple.push(0, tree.root());
/// tuple.push(0, tree.root());
///
/// assert_eq!(tuple.len(), 2);
/// assert!(tuple.shares_node(0, 1));
/// ```
pub struct NodeTuple<'a, N> {
    members: SmallVec<[(usize, &'a N); 6]>,
}

impl<'a, N: TreeNode> NodeTuple<'a, N> {
    pub fn new() -> Self {
        Self {
            members: SmallVec::new(),
        }
    }

    /// Appends the node for the next template position.
    pub fn push(&mut self, set: usize, node: &'a N) {
        self.members.push((set, node));
    }

    /// Copy of this tuple with position `k` moved to `node` in the same set.
    pub fn with_node(&self, k: usize, node: &'a N) -> Self {
        let mut tuple = self.clone();
        tuple.members[k].1 = node;
        tuple
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn node(&self, k: usize) -> &'a N {
        self.members[k].1
    }

    /// Point-set id of position `k`.
    #[inline]
    pub fn set(&self, k: usize) -> usize {
        self.members[k].0
    }

    /// Returns true if positions `j` and `k` draw from the very same node.
    #[inline]
    pub fn shares_node(&self, j: usize, k: usize) -> bool {
        let (set_j, node_j) = self.members[j];
        let (set_k, node_k) = self.members[k];
        set_j == set_k && std::ptr::eq(node_j, node_k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a N)> + '_ {
        self.members.iter().copied()
    }
}

impl<N: TreeNode> Default for NodeTuple<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Clone for NodeTuple<'_, N> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
        }
    }
}

impl<'a, N: TreeNode> FromIterator<(usize, &'a N)> for NodeTuple<'a, N> {
    fn from_iter<I: IntoIterator<Item = (usize, &'a N)>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<N: TreeNode> fmt::Debug for NodeTuple<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.members
                    .iter()
                    .map(|(set, node)| (set, node.begin()..node.end())),
            )
            .finish()
    }
}
