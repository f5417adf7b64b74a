//! Draws a [`Tree`] as ASCII art for debugging.
//!
//! ```
//! use splay::{render, Tree};
//!
//! let tree = Tree::new().insert(10).insert(20).insert(15);
//!
//! assert_eq!(
//!     render::to_ascii(&tree),
//!     concat!(
//!         "  15\n",
//!         "  / \\\n",
//!         " /   \\\n",
//!         "10   20\n",
//!     )
//! );
//! ```
//!
//! Each subtree is drawn independently and then its children are pushed apart just far enough
//! that, on every row they share, the right edge of the left child and the left edge of the right
//! child are at least [`GAP`] columns apart. Those edges are tracked per row in a "profile".

use std::fmt::Display;

use crate::tree::{Node, Tree};

/// Minimum number of blank columns between two neighbouring subtrees.
const GAP: isize = 3;

/// Stands in for "no column yet" when folding profiles with `min`/`max`.
const INFINITY: isize = 1 << 20;

/// Returns a multi-line drawing of `tree`. Every row ends in a newline and an empty tree is drawn
/// as the empty string. The tree is only read.
pub fn to_ascii<K>(tree: &Tree<K>) -> String
where
    K: Display,
{
    let mut root = match tree.root() {
        Some(root) => Cell::build(root, Side::Root),
        None => return String::new(),
    };
    root.compute_edge_lengths();

    let mut profile = vec![INFINITY; root.height];
    root.left_profile(0, 0, &mut profile);
    let x_min = profile.iter().copied().fold(0, isize::min);

    let mut canvas = Canvas::default();
    for level in 0..root.height {
        canvas.column = 0;
        root.draw_level(-x_min, level as isize, &mut canvas);
        canvas.out.push('\n');
    }

    canvas.out
}

/// Which child of its parent a cell is. Labels are centred slightly differently for left
/// children so that they lean towards their parent's `/`.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Root,
    Right,
}

/// A node of the tree being laid out.
struct Cell {
    left: Option<Box<Cell>>,
    right: Option<Box<Cell>>,
    side: Side,
    label: String,
    /// How many rows of `/` or `\` hang below this cell's label.
    edge_length: isize,
    /// Rows taken up by the drawing of this subtree, label to deepest label.
    height: usize,
}

impl Cell {
    fn build<K>(node: &Node<K>, side: Side) -> Box<Self>
    where
        K: Display,
    {
        Box::new(Self {
            left: node.left().map(|n| Self::build(n, Side::Left)),
            right: node.right().map(|n| Self::build(n, Side::Right)),
            side,
            label: node.key().to_string(),
            edge_length: 0,
            height: 0,
        })
    }

    fn label_len(&self) -> isize {
        self.label.chars().count() as isize
    }

    fn children(&self) -> impl Iterator<Item = (&Self, isize)> {
        let offset = self.edge_length + 1;
        let left = self.left.as_deref().map(|l| (l, -offset));
        let right = self.right.as_deref().map(|r| (r, offset));
        left.into_iter().chain(right)
    }

    /// Records, for each row below `y`, the leftmost column this subtree occupies when its label
    /// is centred on column `x`.
    fn left_profile(&self, x: isize, y: usize, profile: &mut [isize]) {
        let is_left = isize::from(self.side == Side::Left);
        profile[y] = profile[y].min(x - (self.label_len() - is_left) / 2);
        if self.left.is_some() {
            for i in 1..=self.edge_length {
                let row = y + i as usize;
                profile[row] = profile[row].min(x - i);
            }
        }
        let below = y + self.edge_length as usize + 1;
        for (child, dx) in self.children() {
            child.left_profile(x + dx, below, profile);
        }
    }

    /// Mirror of [`left_profile`][Cell::left_profile] tracking the rightmost column.
    fn right_profile(&self, x: isize, y: usize, profile: &mut [isize]) {
        let not_left = isize::from(self.side != Side::Left);
        profile[y] = profile[y].max(x + (self.label_len() - not_left) / 2);
        if self.right.is_some() {
            for i in 1..=self.edge_length {
                let row = y + i as usize;
                profile[row] = profile[row].max(x + i);
            }
        }
        let below = y + self.edge_length as usize + 1;
        for (child, dx) in self.children() {
            child.right_profile(x + dx, below, profile);
        }
    }

    /// Fills in `edge_length` and `height` bottom up.
    fn compute_edge_lengths(&mut self) {
        if let Some(left) = self.left.as_deref_mut() {
            left.compute_edge_lengths();
        }
        if let Some(right) = self.right.as_deref_mut() {
            right.compute_edge_lengths();
        }

        self.edge_length = match (self.left.as_deref(), self.right.as_deref()) {
            (None, None) => 0,
            (left, right) => {
                let mut delta = 4;
                // Only rows both children reach can collide.
                if let (Some(left), Some(right)) = (left, right) {
                    let shared = left.height.min(right.height);
                    let mut left_edge = vec![-INFINITY; left.height];
                    left.right_profile(0, 0, &mut left_edge);
                    let mut right_edge = vec![INFINITY; right.height];
                    right.left_profile(0, 0, &mut right_edge);
                    for row in 0..shared {
                        delta = delta.max(GAP + 1 + left_edge[row] - right_edge[row]);
                    }
                }

                let has_short_child = left.map_or(false, |l| l.height == 1)
                    || right.map_or(false, |r| r.height == 1);
                if has_short_child && delta > 4 {
                    delta -= 1;
                }
                (delta + 1) / 2 - 1
            }
        };

        self.height = self
            .children()
            .map(|(child, _)| child.height + self.edge_length as usize + 1)
            .fold(1, usize::max);
    }

    /// Draws row `level` of this subtree, where row 0 is this cell's label centred on column
    /// `x`.
    fn draw_level(&self, x: isize, level: isize, canvas: &mut Canvas) {
        if level == 0 {
            let is_left = isize::from(self.side == Side::Left);
            canvas.pad_to(x - (self.label_len() - is_left) / 2);
            canvas.write(&self.label);
        } else if self.edge_length >= level {
            if self.left.is_some() {
                canvas.pad_to(x - level);
                canvas.write("/");
            }
            if self.right.is_some() {
                canvas.pad_to(x + level);
                canvas.write("\\");
            }
        } else {
            let below = level - self.edge_length - 1;
            for (child, dx) in self.children() {
                child.draw_level(x + dx, below, canvas);
            }
        }
    }
}

/// The drawing so far plus the column the next character of the current row lands in.
#[derive(Default)]
struct Canvas {
    out: String,
    column: isize,
}

impl Canvas {
    /// Pads the current row with spaces up to `column`. Does nothing if the row is already past
    /// it.
    fn pad_to(&mut self, column: isize) {
        let spaces = (column - self.column).max(0);
        self.out.extend(std::iter::repeat(' ').take(spaces as usize));
        self.column += spaces;
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
        self.column += s.chars().count() as isize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_of(keys: &[i32]) -> Tree<i32> {
        keys.iter().fold(Tree::new(), |tree, &k| tree.insert(k))
    }

    #[test]
    fn empty_tree_draws_nothing() {
        assert_eq!(to_ascii(&Tree::<i32>::new()), "");
    }

    #[test]
    fn single_node() {
        assert_eq!(to_ascii(&tree_of(&[1])), "1\n");
    }

    #[test]
    fn right_child() {
        assert_eq!(to_ascii(&tree_of(&[2, 1])), "1\n \\\n  2\n");
    }

    #[test]
    fn left_child() {
        assert_eq!(to_ascii(&tree_of(&[1, 2])), "  2\n /\n1\n");
    }

    #[test]
    fn left_spine() {
        let tree = tree_of(&[10, 20, 15]).splay(&20);

        assert_eq!(to_ascii(&tree), "   20\n   /\n  15\n /\n10\n");
    }

    #[test]
    fn mixed_shape() {
        let tree = tree_of(&[100, 50, 200, 40, 30, 20, 25]);
        let expected = [
            "  25",
            "  / \\",
            " /   \\",
            "20   30",
            "       \\",
            "       40",
            "         \\",
            "         50",
            "           \\",
            "           100",
            "             \\",
            "             200",
        ];

        assert_eq!(
            to_ascii(&tree),
            expected.iter().map(|row| format!("{}\n", row)).collect::<String>()
        );
    }

    #[test]
    fn drawing_does_not_change_the_tree() {
        let tree = tree_of(&[5, 3, 8, 1, 4]);
        let before = tree.iter().copied().collect::<Vec<_>>();
        let root = tree.root_key().copied();

        let _ = to_ascii(&tree);

        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), before);
        assert_eq!(tree.root_key().copied(), root);
    }
}
