use std::cmp::Ordering;

use crate::error::{Result, TreeError};
use crate::event::{Direction, LogObserver, RotationCase, TreeEvent, TreeObserver};
use crate::node::{Id, Key, Node, NodeRef, Side};

impl Side {
    #[inline(always)]
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Height-balanced binary search tree over unique `i64` keys.
///
/// A tree is never empty: it starts from a single root key and only grows.
/// Structural changes are reported to the observer `O`.
#[derive(Clone)]
pub struct AvlTree<O: TreeObserver = LogObserver> {
    nodes: Vec<Node>,
    root: Id,
    observer: O,
    path: Vec<Id>,
}

impl AvlTree<LogObserver> {
    pub fn new(key: Key) -> Self {
        Self::with_observer(key, LogObserver)
    }
}

impl<O: TreeObserver> AvlTree<O> {
    pub fn with_observer(key: Key, mut observer: O) -> Self {
        let mut root = Node::new(key);
        root.is_root = true;
        observer.on_event(&TreeEvent::Created { root: key });
        Self {
            nodes: vec![root],
            root: Id::from_idx(0),
            observer,
            path: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeRef<'_, O> {
        NodeRef {
            tree: self,
            id: self.root,
        }
    }

    /// Height of the whole tree; a singleton tree has height 1.
    pub fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn get(&self, key: Key) -> Option<NodeRef<'_, O>> {
        let mut cur = self.root;
        while !cur.is_nil() {
            let node = self.node(cur);
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(NodeRef { tree: self, id: cur }),
            };
        }
        None
    }

    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        let mut keys = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        let mut cur = self.root;
        loop {
            while !cur.is_nil() {
                stack.push(cur);
                cur = self.node(cur).left;
            }
            let Some(x) = stack.pop() else {
                break;
            };
            keys.push(self.node(x).key);
            cur = self.node(x).right;
        }
        keys
    }

    /// Inserts `key` and restores the balance invariant along the insertion path.
    ///
    /// A key that is already present leaves the tree untouched and yields
    /// [`TreeError::DuplicateKey`].
    pub fn insert(&mut self, key: Key) -> Result<()> {
        let mut path = std::mem::take(&mut self.path);
        path.clear();

        let mut cur = self.root;
        let side = loop {
            path.push(cur);
            let node = self.node(cur);
            let side = match key.cmp(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    self.path = path;
                    self.observer.on_event(&TreeEvent::DuplicateIgnored { key });
                    return Err(TreeError::DuplicateKey(key));
                }
            };
            let next = node.child(side);
            if next.is_nil() {
                break side;
            }
            cur = next;
        };

        let x = Id::from_idx(self.nodes.len());
        let mut node = Node::new(key);
        node.parent = cur;
        self.nodes.push(node);
        *self.node_mut(cur).child_mut(side) = x;
        let parent = self.node(cur).key;
        self.observer.on_event(&TreeEvent::NodeCreated { key, parent, side });

        self.rebalance(&mut path);
        self.path = path;
        Ok(())
    }

    /// Unwinds `path` from its deepest entry, refreshing heights and rotating
    /// wherever the balance factor leaves `{-1, 0, 1}`.
    fn rebalance(&mut self, path: &mut Vec<Id>) {
        while let Some(x) = path.pop() {
            self.recalc(x);
            let balance = self.node(x).balance_factor;
            if balance > 1 {
                let left = self.node(x).left;
                let case = if self.balance_factor_of(left) < 0 {
                    RotationCase::LeftRight
                } else {
                    RotationCase::LeftLeft
                };
                self.emit_rebalance(x, case);
                if case == RotationCase::LeftRight {
                    self.rotate_left(left);
                }
                self.rotate_right(x);
            } else if balance < -1 {
                let right = self.node(x).right;
                let case = if self.balance_factor_of(right) > 0 {
                    RotationCase::RightLeft
                } else {
                    RotationCase::RightRight
                };
                self.emit_rebalance(x, case);
                if case == RotationCase::RightLeft {
                    self.rotate_right(right);
                }
                self.rotate_left(x);
            }
        }
    }

    fn emit_rebalance(&mut self, x: Id, case: RotationCase) {
        let node = self.node(x);
        let event = TreeEvent::RebalanceTriggered {
            key: node.key,
            balance_factor: node.balance_factor,
            case,
        };
        self.observer.on_event(&event);
    }

    pub(crate) fn rotate_right(&mut self, x: Id) -> Id {
        self.rotate(x, Side::Left)
    }

    pub(crate) fn rotate_left(&mut self, x: Id) -> Id {
        self.rotate(x, Side::Right)
    }

    /// Promotes the `heavy` child of `x` into the position of `x` and returns it.
    ///
    /// `heavy == Left` is a right rotation. Panics if `x` has no child on that
    /// side: the rebalancer only rotates when the balance factor proves one exists.
    fn rotate(&mut self, x: Id, heavy: Side) -> Id {
        let c = self.node(x).child(heavy);
        assert!(
            !c.is_nil(),
            "rotation at node {} needs a {heavy:?} child",
            self.node(x).key
        );
        let light = heavy.opposite();

        let b = self.node(c).child(light);
        *self.node_mut(x).child_mut(heavy) = b;
        if !b.is_nil() {
            self.node_mut(b).parent = x;
        }

        let p = self.node(x).parent;
        self.node_mut(c).parent = p;
        if p.is_nil() {
            self.promote_root(x, c);
        } else {
            self.replace_child(p, x, c);
        }

        *self.node_mut(c).child_mut(light) = x;
        self.node_mut(x).parent = c;

        self.recalc(x);
        self.recalc(c);

        let event = TreeEvent::Rotated {
            pivot: self.node(x).key,
            promoted: self.node(c).key,
            direction: match heavy {
                Side::Left => Direction::Right,
                Side::Right => Direction::Left,
            },
        };
        self.observer.on_event(&event);
        c
    }

    fn replace_child(&mut self, p: Id, old: Id, new: Id) {
        let parent = self.node_mut(p);
        if parent.left == old {
            parent.left = new;
        } else {
            debug_assert_eq!(parent.right, old);
            parent.right = new;
        }
    }

    /// Moves the root slot and the root flag together.
    fn promote_root(&mut self, old: Id, new: Id) {
        debug_assert_eq!(self.root, old);
        self.node_mut(old).is_root = false;
        let node = self.node_mut(new);
        node.is_root = true;
        node.parent = Id::NIL;
        self.root = new;
    }

    #[inline(always)]
    pub(crate) fn node(&self, x: Id) -> &Node {
        debug_assert!(!x.is_nil());
        &self.nodes[x.idx()]
    }

    #[inline(always)]
    fn node_mut(&mut self, x: Id) -> &mut Node {
        debug_assert!(!x.is_nil());
        &mut self.nodes[x.idx()]
    }

    #[inline(always)]
    pub(crate) fn root_id(&self) -> Id {
        self.root
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline(always)]
    fn height_of(&self, x: Id) -> u32 {
        if x.is_nil() { 0 } else { self.node(x).height }
    }

    /// `height(left) - height(right)` from the children's current heights.
    fn balance_factor_of(&self, x: Id) -> i32 {
        let node = self.node(x);
        self.height_of(node.left) as i32 - self.height_of(node.right) as i32
    }

    fn recalc(&mut self, x: Id) {
        let node = self.node(x);
        let left = self.height_of(node.left);
        let right = self.height_of(node.right);
        let node = self.node_mut(x);
        node.height = 1 + left.max(right);
        node.balance_factor = left as i32 - right as i32;
    }
}
