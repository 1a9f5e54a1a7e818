//! Arena-backed binary trees for the traversal schedules.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]
//! indices, so the acyclic invariant is structural: a node is appended
//! exactly once and its parent link is set exactly once at insertion.
//! Nothing external can splice a node into two places.
//!
//! Two builders cover the observed input shapes:
//!
//! - [`Tree::bst`] — binary search tree by repeated insertion, duplicate
//!   keys descending right
//! - [`Tree::complete`] — complete binary tree with level-order values
//!   `1..2^levels`, node `v` having children `2v` and `2v+1`

use crate::stepper::errors::EngineError;

/// Most values accepted when building a search tree from user input.
pub const BST_VALUE_LIMIT: usize = 30;

/// Deepest complete tree the builder will produce.
pub const MAX_COMPLETE_LEVELS: usize = 5;

/// Index of a node within its owning [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One node: a value and up to two children.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub value: T,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

/// An owned binary tree.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<TreeNode<T>>,
    root: Option<NodeId>,
}

impl<T> Tree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// The root node, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Borrow a node. Ids are only handed out by this tree, so a stale or
    /// foreign id is a caller bug and panics via slice indexing.
    pub fn node(&self, id: NodeId) -> &TreeNode<T> {
        &self.nodes[id.0]
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Height in levels; an empty tree has depth 0.
    pub fn depth(&self) -> usize {
        self.depth_below(self.root)
    }

    fn depth_below(&self, node: Option<NodeId>) -> usize {
        match node {
            None => 0,
            Some(id) => {
                let n = &self.nodes[id.0];
                1 + self.depth_below(n.left).max(self.depth_below(n.right))
            }
        }
    }

    /// Node ids in left-to-right (in-order) sequence; the tree panes use
    /// this as the horizontal layout order.
    pub fn in_order_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_in_order(self.root, &mut out);
        out
    }

    fn collect_in_order(&self, node: Option<NodeId>, out: &mut Vec<NodeId>) {
        if let Some(id) = node {
            let n = &self.nodes[id.0];
            self.collect_in_order(n.left, out);
            out.push(id);
            self.collect_in_order(n.right, out);
        }
    }
}

impl<T: Ord> Tree<T> {
    /// Build a binary search tree by inserting `values` in order.
    ///
    /// Fails with [`EngineError::InvalidInput`] when more than
    /// [`BST_VALUE_LIMIT`] values are supplied.
    pub fn bst(values: Vec<T>) -> Result<Self, EngineError> {
        if values.len() > BST_VALUE_LIMIT {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "too many values for a tree: {} (limit is {})",
                    values.len(),
                    BST_VALUE_LIMIT
                ),
            });
        }
        let mut tree = Tree::new();
        for value in values {
            tree.insert(value);
        }
        Ok(tree)
    }

    /// Insert one value with BST ordering. Duplicates descend right, so
    /// repeated keys are kept rather than dropped.
    pub fn insert(&mut self, value: T) {
        enum Slot {
            Root,
            Left(NodeId),
            Right(NodeId),
        }

        let slot = match self.root {
            None => Slot::Root,
            Some(mut cur) => loop {
                let node = &self.nodes[cur.0];
                if value < node.value {
                    match node.left {
                        Some(l) => cur = l,
                        None => break Slot::Left(cur),
                    }
                } else {
                    match node.right {
                        Some(r) => cur = r,
                        None => break Slot::Right(cur),
                    }
                }
            },
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(TreeNode {
            value,
            left: None,
            right: None,
        });
        match slot {
            Slot::Root => self.root = Some(id),
            Slot::Left(parent) => self.nodes[parent.0].left = Some(id),
            Slot::Right(parent) => self.nodes[parent.0].right = Some(id),
        }
    }
}

impl Tree<i64> {
    /// Build a complete binary tree of the given number of levels, filled
    /// level by level with the values `1..2^levels`.
    ///
    /// Fails with [`EngineError::InvalidInput`] outside
    /// `1..=MAX_COMPLETE_LEVELS`.
    pub fn complete(levels: usize) -> Result<Self, EngineError> {
        if levels == 0 || levels > MAX_COMPLETE_LEVELS {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "complete tree levels must be between 1 and {}, got {}",
                    MAX_COMPLETE_LEVELS, levels
                ),
            });
        }
        let count = (1usize << levels) - 1;
        let mut nodes = Vec::with_capacity(count);
        for i in 0..count {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            nodes.push(TreeNode {
                value: (i + 1) as i64,
                left: (left < count).then_some(NodeId(left)),
                right: (right < count).then_some(NodeId(right)),
            });
        }
        Ok(Tree {
            nodes,
            root: Some(NodeId(0)),
        })
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Tree::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Clone>(tree: &Tree<T>, ids: &[NodeId]) -> Vec<T> {
        ids.iter().map(|&id| tree.node(id).value.clone()).collect()
    }

    #[test]
    fn bst_insertion_orders_children() {
        let tree = Tree::bst(vec![15, 10, 20, 8, 12]).expect("within limit");
        let root = tree.root().expect("root");
        assert_eq!(tree.node(root).value, 15);
        assert_eq!(values(&tree, &tree.in_order_ids()), vec![8, 10, 12, 15, 20]);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn duplicate_keys_descend_right() {
        let tree = Tree::bst(vec![5, 5, 3]).expect("within limit");
        let root = tree.root().expect("root");
        let right = tree.node(root).right.expect("duplicate goes right");
        assert_eq!(tree.node(right).value, 5);
        let left = tree.node(root).left.expect("smaller goes left");
        assert_eq!(tree.node(left).value, 3);
        assert_eq!(values(&tree, &tree.in_order_ids()), vec![3, 5, 5]);
    }

    #[test]
    fn bst_rejects_oversized_input() {
        let too_many: Vec<i64> = (0..=BST_VALUE_LIMIT as i64).collect();
        let err = Tree::bst(too_many).expect_err("31 values exceed the limit");
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn complete_tree_links_level_order() {
        let tree = Tree::complete(3).expect("3 levels");
        assert_eq!(tree.len(), 7);
        assert_eq!(tree.depth(), 3);
        assert_eq!(values(&tree, &tree.in_order_ids()), vec![4, 2, 5, 1, 6, 3, 7]);
        let root = tree.root().expect("root");
        assert_eq!(tree.node(root).value, 1);
    }

    #[test]
    fn complete_tree_rejects_bad_levels() {
        assert!(Tree::complete(0).is_err());
        assert!(Tree::complete(MAX_COMPLETE_LEVELS + 1).is_err());
    }

    #[test]
    fn empty_tree_has_no_root() {
        let tree: Tree<i64> = Tree::bst(Vec::new()).expect("empty is fine");
        assert!(tree.is_empty());
        assert!(tree.root().is_none());
        assert_eq!(tree.depth(), 0);
    }
}
