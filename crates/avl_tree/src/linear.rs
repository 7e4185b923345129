//! Flat key-sequence form of a tree.
//!
//! `serialize` emits keys in pre-order; `deserialize` replays them as ordinary
//! inserts. The rebuilt tree always holds the same key set (so the same
//! in-order sequence), but its shape can differ from the original when the
//! original was grown in a different order than its pre-order listing.

use crate::error::{Result, TreeError};
use crate::event::{LogObserver, TreeObserver};
use crate::node::Key;
use crate::tree::AvlTree;

const SEPARATOR: char = ',';

/// Pre-order keys: root, then the left subtree, then the right subtree.
pub fn serialize<O: TreeObserver>(tree: &AvlTree<O>) -> Vec<Key> {
    let mut keys = Vec::with_capacity(tree.len());
    let mut stack = vec![tree.root_id()];
    while let Some(x) = stack.pop() {
        if x.is_nil() {
            continue;
        }
        let node = tree.node(x);
        keys.push(node.key);
        stack.push(node.right);
        stack.push(node.left);
    }
    keys
}

pub fn deserialize(keys: &[Key]) -> Result<AvlTree> {
    deserialize_with(keys, LogObserver)
}

/// Rebuilds a tree by inserting `keys` in order; the first key becomes the root.
///
/// Repeated keys are skipped.
pub fn deserialize_with<O: TreeObserver>(keys: &[Key], observer: O) -> Result<AvlTree<O>> {
    let (&first, rest) = keys.split_first().ok_or(TreeError::EmptySequence)?;
    let mut tree = AvlTree::with_observer(first, observer);
    for &key in rest {
        match tree.insert(key) {
            Ok(()) | Err(TreeError::DuplicateKey(_)) => {}
            Err(err) => return Err(err),
        }
    }
    Ok(tree)
}

/// Comma-joined decimal keys, the persisted text form.
pub fn encode(keys: &[Key]) -> String {
    let mut out = String::with_capacity(keys.len() * 4);
    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(&key.to_string());
    }
    out
}

/// Parses the text produced by [`encode`]. Blank input yields no keys.
pub fn decode(text: &str) -> Result<Vec<Key>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(SEPARATOR)
        .map(|token| {
            let token = token.trim();
            token.parse::<Key>().map_err(|_| TreeError::InvalidKey {
                token: token.to_owned(),
            })
        })
        .collect()
}

impl<O: TreeObserver> AvlTree<O> {
    /// Same order as [`serialize`].
    pub fn pre_order(&self) -> Vec<Key> {
        serialize(self)
    }
}
