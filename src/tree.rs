//! An unbalanced BST whose nodes live in an arena. Children are owned through the arena and every
//! node keeps a handle to its parent so that removal can splice it out of the tree in place.
//!
//! Nothing here rebalances: inserting keys in ascending order produces a chain whose height is the
//! number of keys. The recursive operations use `O(height)` stack.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Error, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), Err(Error::KeyNotFound));
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.find(&1), Ok(&2));
//!
//! // Removing a key hands back its value.
//! assert_eq!(tree.remove(&1), Ok(2));
//! assert_eq!(tree.remove(&1), Err(Error::KeyNotFound));
//! assert!(tree.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::Add;

use slab::Slab;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::traverse::{self, Order, Traverse};

/// Handle to a node stored in a [`Tree`]'s arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// Relation only. The arena owns every node.
    parent: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
        }
    }

    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// An unbalanced Binary Search Tree. This can be used for inserting, finding, and removing keys
/// and values, and for walking them in pre-, in- or post-order.
///
/// Inserting a key that is already present does not overwrite it. The new entry is placed to the
/// right of the existing one and stays shadowed by it until the older entry is removed, so
/// [`find`][Tree::find] and [`remove`][Tree::remove] always see the oldest surviving entry for a
/// key. Trees are meant to be used with unique keys.
#[derive(Clone)]
pub struct Tree<K, V> {
    nodes: Slab<Node<K, V>>,
    /// `None` is the empty tree: no key, no value, no children.
    root: Option<NodeId>,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    /// The number of entries in the tree, shadowed duplicates included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is in its empty state.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every entry, returning the tree to its empty state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Inserts the given value into the tree under the given key. Keys less than a node's key go
    /// to its left, everything else (equal keys included) goes to its right.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2, "two");
    /// tree.insert(1, "one");
    ///
    /// assert_eq!(tree.find(&1), Ok(&"one"));
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        match self.root {
            Some(root) => self.insert_below(root, key, value),
            None => self.root = Some(self.alloc(key, value, None)),
        }
    }

    /// Finds the value associated with the given key. Fails with [`Error::KeyNotFound`] when no
    /// node has the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Error, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.find(&1), Ok(&2));
    /// assert_eq!(tree.find(&42), Err(Error::KeyNotFound));
    /// ```
    pub fn find(&self, key: &K) -> Result<&V>
    where
        K: Ord,
    {
        let id = self
            .locate(key)
            .inspect_err(|_| debug!("find ran off the tree"))?;
        Ok(&self.node(id).value)
    }

    /// Like [`find`][Tree::find] but without the error.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        self.find(key).ok()
    }

    /// Whether some node has the given key.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.locate(key).is_ok()
    }

    /// Removes the node holding the given key and returns its value. Fails with
    /// [`Error::KeyNotFound`], leaving the tree untouched, when no node has the key.
    ///
    /// A node with two children takes over its in-order successor's entry and the successor's old
    /// node is spliced out instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Error, Tree};
    ///
    /// let mut tree: Tree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&2), Ok('b'));
    /// assert_eq!(tree.remove(&2), Err(Error::KeyNotFound));
    /// assert_eq!(tree.keys().collect::<Vec<_>>(), [&1, &3]);
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<V>
    where
        K: Ord,
    {
        let id = self
            .locate(key)
            .inspect_err(|_| debug!("remove ran off the tree"))?;
        let value = self.remove_node(id);
        debug!(len = self.len(), "removed entry");
        Ok(value)
    }

    /// The entry with the smallest key.
    pub fn min(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(self.min_from(root)))
    }

    /// The entry with the largest key. With duplicates this is the newest of them.
    pub fn max(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(self.max_from(root)))
    }

    /// Gets the height of this tree: the number of nodes on its longest root-to-leaf path. The
    /// empty tree has a height of 0.
    pub fn height(&self) -> usize {
        self.height_from(self.root)
    }

    /// Adds up every value in the tree, starting from `V::default()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_, _> = [3, 1, 4].into_iter().map(|x| (x, x)).collect();
    /// assert_eq!(tree.sum(), 8);
    /// assert_eq!(Tree::<i32, i32>::new().sum(), 0);
    /// ```
    pub fn sum(&self) -> V
    where
        V: Clone + Add<Output = V> + Default,
    {
        self.sum_from(self.root)
    }

    /// Lazily walks the tree depth first in the given order. The tree can't change while the
    /// returned iterator is alive, and asking again starts over from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Order, Tree};
    ///
    /// let tree: Tree<_, _> = [2, 1, 3].into_iter().map(|x| (x, x * 10)).collect();
    ///
    /// let keys = |order| tree.traverse(order).map(|(k, _)| *k).collect::<Vec<_>>();
    /// assert_eq!(keys(Order::PreOrder), [2, 1, 3]);
    /// assert_eq!(keys(Order::InOrder), [1, 2, 3]);
    /// assert_eq!(keys(Order::PostOrder), [1, 3, 2]);
    /// ```
    pub fn traverse(&self, order: Order) -> Traverse<'_, K, V> {
        Traverse::new(self, order)
    }

    /// Recursively walks the tree depth first in the given order, calling `visit` on every entry.
    /// Visits the same sequence [`traverse`][Tree::traverse] yields.
    pub fn walk<F>(&self, order: Order, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        traverse::walk(self, self.root, order, &mut visit);
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Traverse<'_, K, V> {
        self.traverse(Order::InOrder)
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates over the values in ascending order of their keys.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    pub(crate) fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    pub(crate) fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = self.node(id);
        (&node.key, &node.value)
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }

    fn alloc(&mut self, key: K, value: V, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.insert(Node::new(key, value, parent)));
        trace!(node = id.0, parent = ?parent.map(|p| p.0), "allocated node");
        id
    }

    fn insert_below(&mut self, id: NodeId, key: K, value: V)
    where
        K: Ord,
    {
        let node = self.node(id);
        let side = if key < node.key {
            Side::Left
        } else {
            Side::Right
        };
        match node.child(side) {
            Some(child) => self.insert_below(child, key, value),
            None => {
                let child = self.alloc(key, value, Some(id));
                *self.node_mut(id).child_mut(side) = Some(child);
            }
        }
    }

    /// The search walk shared by `find` and `remove`. Stops at the first node whose key equals
    /// `key`.
    fn locate(&self, key: &K) -> Result<NodeId>
    where
        K: Ord,
    {
        let root = self.root.ok_or(Error::KeyNotFound)?;
        self.locate_from(root, key)
    }

    fn locate_from(&self, id: NodeId, key: &K) -> Result<NodeId>
    where
        K: Ord,
    {
        let node = self.node(id);
        let next = match key.cmp(&node.key) {
            Ordering::Equal => return Ok(id),
            Ordering::Less => node.left,
            Ordering::Greater => node.right,
        };
        next.map_or(Err(Error::KeyNotFound), |child| {
            self.locate_from(child, key)
        })
    }

    /// Removes the node `id` from the tree and returns the value that was stored under its key.
    fn remove_node(&mut self, id: NodeId) -> V {
        let node = self.node(id);
        match (node.left, node.right) {
            (Some(_), Some(right)) => {
                let successor = self.min_from(right);
                let (node, next) = self
                    .nodes
                    .get2_mut(id.0, successor.0)
                    .expect("Successor is a live node below `id`");
                mem::swap(&mut node.key, &mut next.key);
                mem::swap(&mut node.value, &mut next.value);
                // The successor has no left child so this ends in one of the branches below.
                self.remove_node(successor)
            }
            (Some(child), None) | (None, Some(child)) => self.replace_with(id, Some(child)),
            (None, None) => self.replace_with(id, None),
        }
    }

    /// Splices `id` out of the tree, putting `replacement` where it was. The root has no parent
    /// slot to overwrite, so it is rewritten in place and keeps its handle. Returns the value `id`
    /// held.
    fn replace_with(&mut self, id: NodeId, replacement: Option<NodeId>) -> V {
        let parent = self.node(id).parent;
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, id);
                *self.node_mut(parent).child_mut(side) = replacement;
                if let Some(replacement) = replacement {
                    self.node_mut(replacement).parent = Some(parent);
                }
                trace!(node = id.0, replacement = ?replacement.map(|r| r.0), "spliced node");
                self.nodes.remove(id.0).value
            }
            None => match replacement {
                Some(replacement) => {
                    let Node {
                        key,
                        value,
                        left,
                        right,
                        ..
                    } = self.nodes.remove(replacement.0);
                    let root = self.node_mut(id);
                    root.key = key;
                    root.left = left;
                    root.right = right;
                    let old_value = mem::replace(&mut root.value, value);
                    for child in [left, right].into_iter().flatten() {
                        self.node_mut(child).parent = Some(id);
                    }
                    trace!(node = id.0, replacement = replacement.0, "rewrote root in place");
                    old_value
                }
                None => {
                    self.root = None;
                    trace!(node = id.0, "removed last node");
                    self.nodes.remove(id.0).value
                }
            },
        }
    }

    fn side_of(&self, parent: NodeId, child: NodeId) -> Side {
        if self.node(parent).left == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Descends left from `id` for as long as there is a left child.
    fn min_from(&self, id: NodeId) -> NodeId {
        match self.node(id).left {
            Some(left) => self.min_from(left),
            None => id,
        }
    }

    fn max_from(&self, id: NodeId) -> NodeId {
        match self.node(id).right {
            Some(right) => self.max_from(right),
            None => id,
        }
    }

    fn height_from(&self, id: Option<NodeId>) -> usize {
        id.map_or(0, |id| {
            let node = self.node(id);
            1 + self.height_from(node.left).max(self.height_from(node.right))
        })
    }

    fn sum_from(&self, id: Option<NodeId>) -> V
    where
        V: Clone + Add<Output = V> + Default,
    {
        match id {
            Some(id) => {
                let node = self.node(id);
                self.sum_from(node.left) + node.value.clone() + self.sum_from(node.right)
            }
            None => V::default(),
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Tree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for Tree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Traverse<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K, V> Tree<K, V>
where
    K: Ord + fmt::Debug,
{
    /// Asserts that every child points back at its parent, that no node is unreachable and that
    /// keys respect `left < node <= right`.
    pub(crate) fn assert_links(&self) {
        if let Some(root) = self.root {
            assert_eq!(self.node(root).parent, None);
        }
        for (id, node) in &self.nodes {
            let id = NodeId(id);
            if let Some(left) = node.left {
                assert_eq!(self.node(left).parent, Some(id));
                assert!(self.node(left).key < node.key);
            }
            if let Some(right) = node.right {
                assert_eq!(self.node(right).parent, Some(id));
                assert!(self.node(right).key >= node.key);
            }
        }
        assert_eq!(self.traverse(Order::PreOrder).count(), self.len());

        let keys: Vec<_> = self.keys().collect();
        assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]), "{keys:?}");
    }
}
