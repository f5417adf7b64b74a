//! This crate implements a splay tree, a self-adjusting Binary Search Tree (BST), together with
//! a small priority-queue simulation used to time it.
//!
//! ## Splay Tree
//!
//! A splay tree keeps the usual BST invariants:
//!
//! 1. For every `Node` in the tree, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in the tree, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Keys are unique. Inserting a key that is already present does not add a node.
//!
//! It keeps no balance information at all. Instead every access "splays" the accessed key to
//! the root with a series of rotations (named zig, zig-zig and zig-zag after the shape of the
//! path being rotated). A single access can take `O(N)` time on a tall tree, but splaying roughly
//! halves the depth of every node on the access path, so any sequence of `M` operations costs
//! `O(M lg N)` overall. Recently used keys stay near the root, which suits workloads such as
//! priority queues where the same region of the key space is hit over and over.
//!
//! See [`Tree`] for the operations, [`render`] for drawing a tree and [`sim`] for the
//! benchmark workload.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod render;
pub mod sim;
pub mod tree;

pub use error::Error;
pub use tree::Tree;
