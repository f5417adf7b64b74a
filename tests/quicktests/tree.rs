use splay::Tree;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts,
/// deletes and splays we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], mut bst: Tree<K>, set: &mut BTreeSet<K>) -> Tree<K>
where
    K: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k) => {
                bst = bst.insert(k.clone());
                set.insert(k.clone());
            }
            Op::Remove(k) => {
                bst = bst.delete(k);
                set.remove(k);
            }
            Op::Splay(k) => {
                bst = bst.splay(k);
            }
        }
    }

    bst
}

/// In-order keys are strictly ascending, which is the BST invariant with unique keys.
fn is_search_tree(tree: &Tree<i8>) -> bool {
    let keys: Vec<_> = tree.iter().collect();
    keys.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut set = BTreeSet::new();

    let tree = do_ops(&ops, Tree::new(), &mut set);
    is_search_tree(&tree) && tree.iter().eq(set.iter()) && tree.len() == set.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree = tree.insert(*x);
    }

    xs.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree = tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn last_insert_is_root(xs: Vec<i8>, x: i8) -> bool {
    let tree = xs.iter().fold(Tree::new(), |tree, &k| tree.insert(k));

    tree.insert(x).root_key() == Some(&x)
}

#[quickcheck]
fn duplicate_insert_keeps_keys(xs: Vec<i8>, x: i8) -> bool {
    let once = xs.iter().fold(Tree::new(), |tree, &k| tree.insert(k)).insert(x);
    let keys: Vec<_> = once.iter().copied().collect();

    let twice = once.insert(x);
    twice.iter().copied().eq(keys)
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree = tree.insert(*x);
    }
    for delete in &deletes {
        tree = tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    is_search_tree(&tree)
        && deletes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn insert_then_delete_all_is_empty(xs: Vec<i8>, order: Vec<usize>) -> bool {
    let mut tree = xs.iter().fold(Tree::new(), |tree, &k| tree.insert(k));

    // Delete in an arbitrary order picked by `order`.
    let mut remaining: Vec<_> = xs.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    let mut picks = order.into_iter();
    while !remaining.is_empty() {
        let pos = picks.next().unwrap_or(0) % remaining.len();
        tree = tree.delete(&remaining.swap_remove(pos));
    }

    tree.is_empty()
}

#[quickcheck]
fn find_min_matches_smallest(xs: Vec<i8>) -> bool {
    let tree = xs.iter().fold(Tree::new(), |tree, &k| tree.insert(k));

    tree.find_min() == xs.iter().min() && tree.find_max() == xs.iter().max()
}
