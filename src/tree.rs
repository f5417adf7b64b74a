//! A splay tree. This is a BST that restructures itself on every access so that the accessed
//! key (or, if it is missing, its nearest neighbour on the search path) becomes the root. Keys
//! that were touched recently are therefore cheap to touch again.
//!
//! Operations that restructure the tree take it by value and return the new tree. Read-only
//! queries borrow it and never restructure it.
//!
//! # Examples
//!
//! ```
//! use splay::Tree;
//!
//! let tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find_min(), None);
//!
//! let tree = tree.insert(100).insert(50).insert(200);
//!
//! // The last inserted key is always the root.
//! assert_eq!(tree.root_key(), Some(&200));
//! assert_eq!(tree.find_min(), Some(&50));
//!
//! // Splaying moves a key to the root without changing the set of keys.
//! let tree = tree.splay(&50);
//! assert_eq!(tree.root_key(), Some(&50));
//! assert_eq!(tree.len(), 3);
//!
//! // Inserting a key that is already present changes nothing but the shape.
//! let tree = tree.insert(100);
//! assert_eq!(tree.len(), 3);
//!
//! let tree = tree.delete(&50);
//! assert!(!tree.contains(&50));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![100, 200]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

/// A self-adjusting Binary Search Tree. The tree is nothing more than its root: there is no
/// stored size or other bookkeeping.
pub enum Tree<K> {
    /// A marker for the empty pointer at the bottom of a subtree.
    Leaf,
    /// A [`Node`] that has a key and two children (which are both `Tree`s).
    Node(Box<Node<K>>),
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    // Copies the nodes in post-order through an explicit stack so a tall tree can't overflow the
    // call stack. Finished subtrees wait on `built` until their parent is rebuilt.
    fn clone(&self) -> Self {
        enum Visit<'a, K> {
            Enter(&'a Tree<K>),
            Build(&'a K),
        }

        let mut pending = vec![Visit::Enter(self)];
        let mut built = Vec::new();
        while let Some(visit) = pending.pop() {
            match visit {
                Visit::Enter(Self::Leaf) => built.push(Self::Leaf),
                Visit::Enter(Self::Node(node)) => {
                    pending.push(Visit::Build(&node.key));
                    pending.push(Visit::Enter(&node.right));
                    pending.push(Visit::Enter(&node.left));
                }
                Visit::Build(key) => {
                    let right = built.pop().unwrap_or_default();
                    let left = built.pop().unwrap_or_default();
                    built.push(Self::Node(Box::new(Node {
                        key: key.clone(),
                        left,
                        right,
                    })));
                }
            }
        }

        built.pop().unwrap_or_default()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    // The keys in order. The shape is left out since printing it would recurse per level.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::Leaf
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Leaf)
    }

    /// The root node of the tree, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node<K>> {
        match self {
            Self::Leaf => None,
            Self::Node(n) => Some(n),
        }
    }

    /// The key stored at the root. After [`splay`][Tree::splay], [`insert`][Tree::insert] or
    /// [`delete`][Tree::delete] this is the most recently accessed key (or its neighbour).
    pub fn root_key(&self) -> Option<&K> {
        self.root().map(Node::key)
    }

    /// Counts the keys in the tree. Nothing caches the size so this visits every node.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// How many levels are in the tree. An empty tree has a height of 0 and a single node has a
    /// height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root().map(|root| (root, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }

        height
    }

    /// Returns the smallest key by following left children from the root. This does not splay.
    ///
    /// Returns `None` when the tree is empty since there is no minimum to return.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay::Tree;
    ///
    /// let tree = Tree::new();
    /// assert_eq!(tree.find_min(), None);
    ///
    /// let tree = tree.insert(3).insert(1).insert(2);
    /// assert_eq!(tree.find_min(), Some(&1));
    /// // The root is untouched.
    /// assert_eq!(tree.root_key(), Some(&2));
    /// ```
    pub fn find_min(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(left) = node.left() {
            node = left;
        }

        Some(&node.key)
    }

    /// Returns the largest key by following right children from the root. This does not splay.
    pub fn find_max(&self) -> Option<&K> {
        let mut node = self.root()?;
        while let Some(right) = node.right() {
            node = right;
        }

        Some(&node.key)
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_edge(self.root());
        iter
    }

    /// Moves the tree out of `self`, leaving a [`Leaf`][Tree::Leaf] behind.
    fn take(&mut self) -> Self {
        mem::take(self)
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Returns `true` if `key` is in the tree. This is a plain BST lookup and does not splay.
    pub fn contains(&self, key: &K) -> bool {
        let mut tree = self;
        while let Self::Node(node) = tree {
            tree = match key.cmp(&node.key) {
                Ordering::Less => &node.left,
                Ordering::Equal => return true,
                Ordering::Greater => &node.right,
            };
        }

        false
    }

    /// Returns a tree with the same keys where `key` is at the root. If `key` isn't in the tree
    /// the root is instead the last node on the search path for `key`, which is either its
    /// in-order predecessor or successor.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay::Tree;
    ///
    /// let tree = Tree::new().insert(10).insert(20).insert(30);
    ///
    /// let tree = tree.splay(&10);
    /// assert_eq!(tree.root_key(), Some(&10));
    ///
    /// // 25 is missing so one of its neighbours comes up instead.
    /// let tree = tree.splay(&25);
    /// assert!(matches!(tree.root_key(), Some(&20) | Some(&30)));
    /// ```
    ///
    /// # Stack usage
    ///
    /// Splaying recurses once for every two levels of the search path, as do
    /// [`insert`][Tree::insert] and [`delete`][Tree::delete] which splay first. A degenerate tree
    /// of very large height (e.g. hundreds of thousands of keys inserted in ascending order and
    /// then accessed at the far end) can exhaust the thread's stack.
    pub fn splay(self, key: &K) -> Self {
        match self {
            Self::Leaf => Self::Leaf,
            Self::Node(node) => Self::Node(node.splay(key)),
        }
    }

    /// Returns a tree that also contains `key`, with `key` at the root. If `key` is already
    /// present the tree is only splayed on it and no node is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay::Tree;
    ///
    /// let tree = Tree::new().insert(1).insert(2);
    /// assert_eq!(tree.root_key(), Some(&2));
    ///
    /// let tree = tree.insert(1);
    /// assert_eq!(tree.root_key(), Some(&1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(self, key: K) -> Self {
        let mut root = match self.splay(&key) {
            Self::Leaf => return Self::Node(Node::new_boxed(key)),
            Self::Node(root) => root,
        };

        // The splayed root is the neighbour of `key`, so it and one of its subtrees fall on one
        // side of the new node and its other subtree falls on the other side.
        match key.cmp(&root.key) {
            Ordering::Equal => Self::Node(root),
            Ordering::Greater => {
                let right = root.right.take();
                Self::Node(Box::new(Node {
                    key,
                    left: Self::Node(root),
                    right,
                }))
            }
            Ordering::Less => {
                let left = root.left.take();
                Self::Node(Box::new(Node {
                    key,
                    left,
                    right: Self::Node(root),
                }))
            }
        }
    }

    /// Returns a tree without `key`. If `key` isn't present the keys are unchanged but the tree
    /// is still splayed on `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use splay::Tree;
    ///
    /// let tree = Tree::new().insert(1).insert(2).insert(3);
    ///
    /// let tree = tree.delete(&2);
    /// assert!(!tree.contains(&2));
    /// assert_eq!(tree.len(), 2);
    ///
    /// // Deleting a missing key is fine too.
    /// let tree = tree.delete(&42);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(self, key: &K) -> Self {
        let mut root = match self.splay(key) {
            Self::Leaf => return Self::Leaf,
            Self::Node(root) => root,
        };
        if *key != root.key {
            return Self::Node(root);
        }

        let right = root.right.take();
        // Everything left of the deleted key is smaller than it, so splaying the left subtree on
        // `key` brings its largest key to the root. That root has no right child and can adopt
        // `right`.
        match root.left.take().splay(key) {
            Self::Leaf => right,
            Self::Node(mut predecessor) => {
                debug_assert!(predecessor.right.is_empty());
                predecessor.right = right;
                Self::Node(predecessor)
            }
        }
    }
}

/// A `Node` has a key that is used for searching and sorting. It always has two children
/// although those children may be [`Leaf`][Tree::Leaf]s.
pub struct Node<K> {
    key: K,
    left: Tree<K>,
    right: Tree<K>,
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("left", &self.left().map(Node::key))
            .field("right", &self.right().map(Node::key))
            .finish()
    }
}

impl<K> Drop for Node<K> {
    // Dropping the children through an explicit stack keeps a tall (e.g. list shaped) tree from
    // overflowing the call stack.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        for child in [self.left.take(), self.right.take()] {
            if let Tree::Node(child) = child {
                pending.push(child);
            }
        }
        while let Some(mut node) = pending.pop() {
            for child in [node.left.take(), node.right.take()] {
                if let Tree::Node(child) = child {
                    pending.push(child);
                }
            }
        }
    }
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: Tree::Leaf,
            right: Tree::Leaf,
        })
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, if any.
    pub fn left(&self) -> Option<&Self> {
        self.left.root()
    }

    /// The root of the right subtree, if any.
    pub fn right(&self) -> Option<&Self> {
        self.right.root()
    }

    /// Rotate self to the right. This moves the left child up vertically and self down
    /// vertically. Without a left child there is nothing to rotate and `self` is returned as is.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      old_root              new_root
    ///      /      \              /      \
    ///  new_root    z   rotate ->  x    old_root
    ///   /   \                           /  \
    ///  x     y                         y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.take() {
            Tree::Leaf => self,
            Tree::Node(mut new_root) => {
                self.left = new_root.right.take();
                new_root.right = Tree::Node(self);
                new_root
            }
        }
    }

    /// Mirror image of [`rotate_right`][Node::rotate_right], lifting the right child.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.take() {
            Tree::Leaf => self,
            Tree::Node(mut new_root) => {
                self.right = new_root.left.take();
                new_root.left = Tree::Node(self);
                new_root
            }
        }
    }
}

impl<K> Node<K>
where
    K: Ord,
{
    /// Splays `key` to the top of the subtree rooted at `self`.
    ///
    /// Each call looks two levels down. It splays the grandchild subtree on the search path
    /// first and then lifts the result with one rotation at the child (zig-zag) or at `self`
    /// (zig-zig). A final rotation at `self` lifts it the rest of the way, which is a plain zig
    /// when the search stopped at the child.
    fn splay(mut self: Box<Self>, key: &K) -> Box<Self> {
        match key.cmp(&self.key) {
            Ordering::Equal => self,
            Ordering::Less => {
                let mut left = match self.left.take() {
                    Tree::Leaf => return self,
                    Tree::Node(left) => left,
                };
                match key.cmp(&left.key) {
                    // zig-zig
                    Ordering::Less => {
                        left.left = left.left.take().splay(key);
                        self.left = Tree::Node(left);
                        self = self.rotate_right();
                    }
                    // zig-zag
                    Ordering::Greater => {
                        left.right = left.right.take().splay(key);
                        if !left.right.is_empty() {
                            left = left.rotate_left();
                        }
                        self.left = Tree::Node(left);
                    }
                    Ordering::Equal => self.left = Tree::Node(left),
                }
                // A no-op when the zig-zig rotation left `self` without a left child.
                self.rotate_right()
            }
            Ordering::Greater => {
                let mut right = match self.right.take() {
                    Tree::Leaf => return self,
                    Tree::Node(right) => right,
                };
                match key.cmp(&right.key) {
                    // zig-zag
                    Ordering::Less => {
                        right.left = right.left.take().splay(key);
                        if !right.left.is_empty() {
                            right = right.rotate_right();
                        }
                        self.right = Tree::Node(right);
                    }
                    // zig-zig
                    Ordering::Greater => {
                        right.right = right.right.take().splay(key);
                        self.right = Tree::Node(right);
                        self = self.rotate_left();
                    }
                    Ordering::Equal => self.right = Tree::Node(right),
                }
                self.rotate_left()
            }
        }
    }
}

/// An in-order iterator over the keys of a [`Tree`]. Created by [`Tree::iter`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_edge(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_edge(node.right());
        Some(&node.key)
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a `BTreeSet`.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same set of keys in both.
    fn do_ops<K>(ops: &[Op<K>], mut bst: Tree<K>, set: &mut BTreeSet<K>) -> Tree<K>
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k) => {
                    let fresh = set.insert(k.clone());
                    let before = bst.len();
                    bst = bst.insert(k.clone());
                    assert_eq!(bst.root_key(), Some(k));
                    assert_eq!(bst.len(), before + usize::from(fresh));
                }
                Op::Remove(k) => {
                    let present = set.remove(k);
                    let before = bst.len();
                    bst = bst.delete(k);
                    assert_eq!(bst.len() + usize::from(present), before);
                }
                Op::FindMin => {
                    assert_eq!(bst.find_min(), set.iter().next());
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
        }

        bst
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut set = BTreeSet::new();
            let tree = do_ops(&ops, Tree::new(), &mut set);

            tree.iter().eq(set.iter())
        }
    }

    quickcheck::quickcheck! {
        fn splay_surfaces_present_keys(xs: Vec<i8>) -> bool {
            let mut tree = xs.iter().fold(Tree::new(), |tree, &x| tree.insert(x));
            xs.iter().all(|x| {
                tree = std::mem::take(&mut tree).splay(x);
                tree.root_key() == Some(x)
            })
        }
    }
}
