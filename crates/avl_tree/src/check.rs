use thiserror::Error;

use crate::event::TreeObserver;
use crate::node::{Id, Key};
use crate::tree::AvlTree;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("node {key} breaks search order")]
    Order { key: Key },
    #[error("node {key} has balance factor {balance_factor}")]
    Unbalanced { key: Key, balance_factor: i32 },
    #[error("node {key} caches height {cached}, measured {measured}")]
    StaleHeight { key: Key, cached: u32, measured: u32 },
    #[error("node {key} caches balance factor {cached}, measured {measured}")]
    StaleBalance { key: Key, cached: i32, measured: i32 },
    #[error("node {key} does not point back to its parent")]
    ParentLink { key: Key },
    #[error("root flag set on {flagged} node(s), expected exactly the root")]
    RootFlag { flagged: usize },
    #[error("{reachable} of {total} nodes reachable from the root")]
    Unreachable { reachable: usize, total: usize },
}

/// Verifies every structural invariant of `tree` from scratch.
pub fn check<O: TreeObserver>(tree: &AvlTree<O>) -> Result<(), Violation> {
    let root = tree.root_id();
    if !tree.node(root).parent.is_nil() {
        return Err(Violation::ParentLink {
            key: tree.node(root).key,
        });
    }

    let flagged = tree.nodes().iter().filter(|n| n.is_root).count();
    if flagged != 1 || !tree.node(root).is_root {
        return Err(Violation::RootFlag { flagged });
    }

    let mut reachable = 0;
    visit(tree, root, None, None, &mut reachable)?;
    if reachable != tree.len() {
        return Err(Violation::Unreachable {
            reachable,
            total: tree.len(),
        });
    }
    Ok(())
}

/// Height of `tree` measured recursively, ignoring cached values.
pub fn measured_height<O: TreeObserver>(tree: &AvlTree<O>) -> u32 {
    subtree_height(tree, tree.root_id())
}

fn subtree_height<O: TreeObserver>(tree: &AvlTree<O>, x: Id) -> u32 {
    if x.is_nil() {
        return 0;
    }
    let node = tree.node(x);
    1 + subtree_height(tree, node.left).max(subtree_height(tree, node.right))
}

fn visit<O: TreeObserver>(
    tree: &AvlTree<O>,
    x: Id,
    lo: Option<Key>,
    hi: Option<Key>,
    reachable: &mut usize,
) -> Result<u32, Violation> {
    if x.is_nil() {
        return Ok(0);
    }
    *reachable += 1;
    let node = tree.node(x);
    let key = node.key;
    if lo.is_some_and(|lo| key <= lo) || hi.is_some_and(|hi| key >= hi) {
        return Err(Violation::Order { key });
    }
    for child in [node.left, node.right] {
        if !child.is_nil() && tree.node(child).parent != x {
            return Err(Violation::ParentLink {
                key: tree.node(child).key,
            });
        }
    }

    let left = visit(tree, node.left, lo, Some(key), reachable)?;
    let right = visit(tree, node.right, Some(key), hi, reachable)?;
    let measured = 1 + left.max(right);
    let balance_factor = left as i32 - right as i32;

    if !(-1..=1).contains(&balance_factor) {
        return Err(Violation::Unbalanced {
            key,
            balance_factor,
        });
    }
    if node.height != measured {
        return Err(Violation::StaleHeight {
            key,
            cached: node.height,
            measured,
        });
    }
    if node.balance_factor != balance_factor {
        return Err(Violation::StaleBalance {
            key,
            cached: node.balance_factor,
            measured: balance_factor,
        });
    }
    Ok(measured)
}
