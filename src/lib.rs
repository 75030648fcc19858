//! This crate exposes an ordered map built on an unbalanced Binary Search Tree (BST), mostly for
//! educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than (or, for duplicates, equal to) its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is the longest path from
//! the root `Node` to a leaf `Node`). This tree never rebalances, so the height is
//! only `O(lg N)` when keys arrive in a friendly order. Inserting sorted keys
//! builds a chain of height `N`. BSTs also naturally support sorted iteration by
//! visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## Removal
//!
//! Every `Node` knows its parent, which lets removal splice a `Node` out of the
//! tree by pointing its parent at its only child. A `Node` with two children
//! instead takes over the entry of its in-order successor (the smallest key in
//! its right subtree), and the successor's old `Node` is spliced out.
//!
//! ```
//! use ordered_tree::{Order, Tree};
//!
//! let mut tree = Tree::new();
//! for key in [25, 15, 50, 10, 24, 35, 70] {
//!     tree.insert(key, key.to_string());
//! }
//!
//! assert_eq!(tree.remove(&25), Ok("25".to_string()));
//!
//! // 35 was the smallest key to the right of 25, so it is the new root.
//! let pre_order: Vec<_> = tree.traverse(Order::PreOrder).map(|(k, _)| *k).collect();
//! assert_eq!(pre_order, [35, 15, 10, 24, 50, 70]);
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod traverse;
pub mod tree;

#[cfg(test)]
mod test;

pub use error::{Error, Result};
pub use traverse::{Order, Traverse};
pub use tree::Tree;
