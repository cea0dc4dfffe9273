//! A small kd-tree for exercising the matcher.
//!
//! Nodes live in an arena and refer to contiguous ranges of the tree's own
//! reordered copy of the input set, so point indices handed to the matcher
//! must be read from [`KdTree::points`], not from the original set.

use npoint_core::{HRectBound, PointSet, TreeNode};

/// A kd-tree node.
#[derive(Debug, Clone)]
pub struct KdNode {
    bound: HRectBound,
    begin: usize,
    end: usize,
    children: Option<(usize, usize)>,
}

impl TreeNode for KdNode {
    type Bound = HRectBound;

    fn bound(&self) -> &HRectBound {
        &self.bound
    }

    fn begin(&self) -> usize {
        self.begin
    }

    fn end(&self) -> usize {
        self.end
    }

    fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Median-split kd-tree over one point set.
///
/// Splits on the widest dimension of each node's bound until a node holds
/// at most `leaf_size` points.
///
/// # Example
///
/// ```
/// use npoint_core::TreeNode;
/// use npoint_test::{line_points, KdTree};
///
/// let tree = KdTree::build(&line_points(&[4.0, 0.0, 3.0, 1.0]), 2);
/// let (left, right) = tree.children(tree.root()).unwrap();
///
/// assert_eq!(left.count(), 2);
/// assert!(right.is_leaf());
/// assert!(tree.points().point(0)[0] <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: PointSet,
}

impl KdTree {
    /// Builds a tree over `set`; `leaf_size` is clamped to at least 1.
    pub fn build(set: &PointSet, leaf_size: usize) -> Self {
        let mut order: Vec<usize> = (0..set.len()).collect();
        let mut nodes = Vec::new();
        split(set, &mut order, 0, set.len(), leaf_size.max(1), &mut nodes);
        Self {
            nodes,
            points: set.permuted(&order),
        }
    }

    pub fn root(&self) -> &KdNode {
        &self.nodes[0]
    }

    /// Left and right children of `node`, or `None` for a leaf.
    pub fn children(&self, node: &KdNode) -> Option<(&KdNode, &KdNode)> {
        node.children
            .map(|(left, right)| (&self.nodes[left], &self.nodes[right]))
    }

    /// The reordered point set that node ranges index into.
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// All leaves in point order.
    pub fn leaves(&self) -> Vec<&KdNode> {
        let mut leaves: Vec<&KdNode> = self.nodes.iter().filter(|n| n.is_leaf()).collect();
        leaves.sort_by_key(|n| n.begin);
        leaves
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// Appends the node for `order[begin..end]` and its subtree; returns its id.
fn split(
    set: &PointSet,
    order: &mut [usize],
    begin: usize,
    end: usize,
    leaf_size: usize,
    nodes: &mut Vec<KdNode>,
) -> usize {
    let mut bound = HRectBound::empty(set.dim());
    for &index in &order[begin..end] {
        bound.enclose(set.point(index));
    }

    let id = nodes.len();
    nodes.push(KdNode {
        bound,
        begin,
        end,
        children: None,
    });

    if end - begin <= leaf_size {
        return id;
    }

    let dim = nodes[id].bound.widest_dimension();
    let mid = (end - begin) / 2;
    order[begin..end].select_nth_unstable_by(mid, |&a, &b| {
        set.point(a)[dim].total_cmp(&set.point(b)[dim])
    });

    let left = split(set, order, begin, begin + mid, leaf_size, nodes);
    let right = split(set, order, begin + mid, end, leaf_size, nodes);
    nodes[id].children = Some((left, right));
    id
}
