//! Traversal schedules: one visit step per node reached.
//!
//! All three orders share one recursive walk; a missing child simply ends
//! the recursion with no step. Each visit snapshot is the list of values
//! visited so far, current node included, so consumers can render the
//! growing output without replaying earlier steps.

use crate::step::{StepKind, StepLog};
use crate::stepper::engine::TraversalOrder;
use crate::tree::{NodeId, Tree};

/// Walk the whole tree in the given order, recording a visit per node.
/// An empty tree records nothing.
pub(crate) fn execute<T: Clone>(tree: &Tree<T>, order: TraversalOrder, log: &mut StepLog<T>) {
    let mut visited: Vec<T> = Vec::with_capacity(tree.len());
    if let Some(root) = tree.root() {
        walk(tree, root, order, &mut visited, log);
    }
}

fn walk<T: Clone>(
    tree: &Tree<T>,
    node: NodeId,
    order: TraversalOrder,
    visited: &mut Vec<T>,
    log: &mut StepLog<T>,
) {
    let (left, right) = {
        let n = tree.node(node);
        (n.left, n.right)
    };
    let descend = |child: Option<NodeId>, visited: &mut Vec<T>, log: &mut StepLog<T>| {
        if let Some(id) = child {
            walk(tree, id, order, visited, log);
        }
    };
    match order {
        TraversalOrder::Pre => {
            visit(tree, node, visited, log);
            descend(left, visited, log);
            descend(right, visited, log);
        }
        TraversalOrder::In => {
            descend(left, visited, log);
            visit(tree, node, visited, log);
            descend(right, visited, log);
        }
        TraversalOrder::Post => {
            descend(left, visited, log);
            descend(right, visited, log);
            visit(tree, node, visited, log);
        }
    }
}

fn visit<T: Clone>(tree: &Tree<T>, node: NodeId, visited: &mut Vec<T>, log: &mut StepLog<T>) {
    visited.push(tree.node(node).value.clone());
    log.record(StepKind::Visit { node }, visited.clone());
}
