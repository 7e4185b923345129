use std::fmt;

use crate::event::TreeObserver;
use crate::node::{Id, Node};
use crate::tree::AvlTree;

const INDENT: &str = "    ";

/// Indented outline, one node per line, labelled `Root`, `Left` or `Right`.
///
/// ```text
/// Root: 20
///     Left: 10
///     Right: 30
/// ```
impl<O: TreeObserver> fmt::Display for AvlTree<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, self.root_id(), "Root", 0)
    }
}

fn write_node<O: TreeObserver>(
    f: &mut fmt::Formatter<'_>,
    tree: &AvlTree<O>,
    x: Id,
    label: &str,
    depth: usize,
) -> fmt::Result {
    let node: &Node = tree.node(x);
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    if f.alternate() {
        writeln!(f, "{label}: {} (bf {})", node.key, node.balance_factor)?;
    } else {
        writeln!(f, "{label}: {}", node.key)?;
    }
    if !node.left.is_nil() {
        write_node(f, tree, node.left, "Left", depth + 1)?;
    }
    if !node.right.is_nil() {
        write_node(f, tree, node.right, "Right", depth + 1)?;
    }
    Ok(())
}

impl<O: TreeObserver> fmt::Debug for AvlTree<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("len", &self.len())
            .field("root", &self.root())
            .field("pre_order", &self.pre_order())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::AvlTree;

    #[test]
    fn outline_after_rotation() {
        let mut tree = AvlTree::with_observer(30, ());
        tree.insert(20).unwrap();
        tree.insert(10).unwrap();
        assert_eq!(tree.to_string(), "Root: 20\n    Left: 10\n    Right: 30\n");
    }

    #[test]
    fn outline_nests_and_shows_balance() {
        let mut tree = AvlTree::with_observer(2, ());
        tree.insert(1).unwrap();
        tree.insert(3).unwrap();
        tree.insert(4).unwrap();
        assert_eq!(
            format!("{tree}"),
            "Root: 2\n    Left: 1\n    Right: 3\n        Right: 4\n"
        );
        assert_eq!(
            format!("{tree:#}"),
            "Root: 2 (bf -1)\n    Left: 1 (bf 0)\n    Right: 3 (bf -1)\n        Right: 4 (bf 0)\n"
        );
    }
}
