use crate::event::TreeObserver;
use crate::tree::AvlTree;

pub type Key = i64;

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Id(u32);

impl Id {
    pub(crate) const NIL: Self = Self(u32::MAX);

    #[inline(always)]
    pub(crate) fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline(always)]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub(crate) fn from_idx(idx: usize) -> Self {
        match u32::try_from(idx) {
            Ok(raw) if raw != u32::MAX => Self(raw),
            _ => panic!("node index {idx} exceeds the arena limit"),
        }
    }
}

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) key: Key,
    pub(crate) left: Id,
    pub(crate) right: Id,
    pub(crate) parent: Id,
    pub(crate) height: u32,
    pub(crate) balance_factor: i32,
    pub(crate) is_root: bool,
}

impl Node {
    pub(crate) fn new(key: Key) -> Self {
        Self {
            key,
            left: Id::NIL,
            right: Id::NIL,
            parent: Id::NIL,
            height: 1,
            balance_factor: 0,
            is_root: false,
        }
    }

    #[inline(always)]
    pub(crate) fn child(&self, side: Side) -> Id {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline(always)]
    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Id {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Read-only view of a node inside an [`AvlTree`].
pub struct NodeRef<'a, O: TreeObserver> {
    pub(crate) tree: &'a AvlTree<O>,
    pub(crate) id: Id,
}

impl<O: TreeObserver> Clone for NodeRef<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: TreeObserver> Copy for NodeRef<'_, O> {}

impl<'a, O: TreeObserver> NodeRef<'a, O> {
    #[inline(always)]
    fn node(&self) -> &'a Node {
        self.tree.node(self.id)
    }

    fn wrap(&self, id: Id) -> Option<Self> {
        if id.is_nil() {
            None
        } else {
            Some(Self {
                tree: self.tree,
                id,
            })
        }
    }

    pub fn key(&self) -> Key {
        self.node().key
    }

    pub fn left(&self) -> Option<Self> {
        self.wrap(self.node().left)
    }

    pub fn right(&self) -> Option<Self> {
        self.wrap(self.node().right)
    }

    pub fn child(&self, side: Side) -> Option<Self> {
        self.wrap(self.node().child(side))
    }

    pub fn parent(&self) -> Option<Self> {
        self.wrap(self.node().parent)
    }

    /// Height of the subtree rooted here; a leaf has height 1.
    pub fn height(&self) -> u32 {
        self.node().height
    }

    /// Cached `height(left) - height(right)`, refreshed by every insert.
    pub fn balance_factor(&self) -> i32 {
        self.node().balance_factor
    }

    pub fn is_root(&self) -> bool {
        self.node().is_root
    }
}

impl<O: TreeObserver> std::fmt::Debug for NodeRef<'_, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let node = self.node();
        f.debug_struct("NodeRef")
            .field("key", &node.key)
            .field("left", &self.left().map(|n| n.key()))
            .field("right", &self.right().map(|n| n.key()))
            .field("parent", &self.parent().map(|n| n.key()))
            .field("balance_factor", &node.balance_factor)
            .field("is_root", &node.is_root)
            .finish()
    }
}
