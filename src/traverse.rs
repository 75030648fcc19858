//! Depth-first traversals of a [`Tree`].
//!
//! [`Traverse`] is the lazy form, driven by an explicit stack so that it can hand out one entry at
//! a time. [`Tree::walk`] is the recursive form. Both visit entries in the same sequence.

use std::iter::FusedIterator;

use crate::tree::{NodeId, Tree};

/// The order in which a depth-first traversal visits the nodes of a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// The node, then its left subtree, then its right subtree.
    PreOrder,
    /// The left subtree, then the node, then the right subtree. Yields keys in ascending order.
    InOrder,
    /// The left subtree, then the right subtree, then the node.
    PostOrder,
}

#[derive(Clone, Copy, Debug)]
enum Step {
    /// Schedule the node and its subtrees according to the traversal order.
    Expand(NodeId),
    /// Yield the node's entry.
    Visit(NodeId),
}

/// A lazy depth-first traversal over the entries of a [`Tree`], created by
/// [`Tree::traverse`]. Cloning it gives an independent traversal starting from the same point.
pub struct Traverse<'a, K, V> {
    tree: &'a Tree<K, V>,
    order: Order,
    stack: Vec<Step>,
    remaining: usize,
}

impl<K, V> Clone for Traverse<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            order: self.order,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Traverse<'a, K, V> {
    pub(crate) fn new(tree: &'a Tree<K, V>, order: Order) -> Self {
        Self {
            tree,
            order,
            stack: tree.root_id().map(Step::Expand).into_iter().collect(),
            remaining: tree.len(),
        }
    }

    /// The order this traversal visits nodes in.
    pub fn order(&self) -> Order {
        self.order
    }
}

impl<'a, K, V> Iterator for Traverse<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            let id = match step {
                Step::Visit(id) => {
                    self.remaining -= 1;
                    return Some(self.tree.entry(id));
                }
                Step::Expand(id) => id,
            };

            // Pushed in reverse: the last step pushed is the first one taken.
            let node = self.tree.node(id);
            let left = node.left.map(Step::Expand);
            let right = node.right.map(Step::Expand);
            let visit = Some(Step::Visit(id));
            let steps = match self.order {
                Order::PreOrder => [right, left, visit],
                Order::InOrder => [right, visit, left],
                Order::PostOrder => [visit, right, left],
            };
            self.stack.extend(steps.into_iter().flatten());
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Traverse<'_, K, V> {}

impl<K, V> FusedIterator for Traverse<'_, K, V> {}

/// Visits the subtree rooted at `id` in the given order.
pub(crate) fn walk<K, V, F>(tree: &Tree<K, V>, id: Option<NodeId>, order: Order, visit: &mut F)
where
    F: FnMut(&K, &V),
{
    let Some(id) = id else {
        return;
    };
    let node = tree.node(id);

    if order == Order::PreOrder {
        visit(&node.key, &node.value);
    }
    walk(tree, node.left, order, visit);
    if order == Order::InOrder {
        visit(&node.key, &node.value);
    }
    walk(tree, node.right, order, visit);
    if order == Order::PostOrder {
        visit(&node.key, &node.value);
    }
}
