//! BSP tree node data structure

use crate::partition::{Hyperplane, HyperplaneSubset};
use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

slotmap::new_key_type! {
    /// Slot of a node inside one arena.
    pub(crate) struct NodeKey;
}

/// Identity of a [`BspTree`](super::BspTree) instance. Clones get a new one.
pub(crate) type TreeId = u64;

pub(crate) fn next_tree_id() -> TreeId {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a node stored in a [`BspTree`](super::BspTree) arena.
///
/// A handle only addresses nodes of the tree instance that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) tree: TreeId,
    pub(crate) key: NodeKey,
}

impl NodeId {
    pub(crate) const fn new(tree: TreeId, key: NodeKey) -> Self {
        Self { tree, key }
    }

    const fn retag(self, tree: TreeId) -> Self {
        Self { tree, key: self.key }
    }
}

/// Per-node payload carried by a [`BspTree`](super::BspTree).
///
/// The payload holds the non-structural state of a node (e.g. a region
/// location) together with any cache derived from the node's subtree.
pub trait NodeData: Clone + Debug + Default {
    /// Payload for a freshly created child of `parent`.
    fn init_child(_parent: &Self, _is_plus: bool) -> Self {
        Self::default()
    }

    /// Copy of the non-structural properties of this node, caches excluded.
    fn copy_properties(&self) -> Self {
        self.clone()
    }

    /// Drop any state derived from the subtree rooted at this node.
    fn invalidate(&mut self) {}
}

impl NodeData for () {}

/// A BSP tree node: either a leaf or a cut with a minus and a plus child.
///
/// Children are owned by their parent; `parent` is a non-owning handle used
/// for upward navigation only.
#[derive(Debug, Clone)]
pub struct Node<H: Hyperplane, D> {
    /// Convex subset of the cutting hyperplane *or* **None** for a leaf.
    pub(crate) cut: Option<H::Subset>,

    /// Subtree for the minus side of `cut`.
    pub(crate) minus: Option<NodeId>,

    /// Subtree for the plus side of `cut`.
    pub(crate) plus: Option<NodeId>,

    pub(crate) parent: Option<NodeId>,

    pub(crate) data: D,
}

impl<H: Hyperplane, D: NodeData> Node<H, D> {
    /// Create a new detached leaf
    pub(crate) const fn leaf(data: D) -> Self {
        Self {
            cut: None,
            minus: None,
            plus: None,
            parent: None,
            data,
        }
    }

    /// Point every link of this node at the arena of `tree`.
    pub(crate) fn retag(&mut self, tree: TreeId) {
        for link in [&mut self.minus, &mut self.plus, &mut self.parent] {
            *link = link.map(|id| id.retag(tree));
        }
    }

    #[inline]
    pub const fn is_leaf(&self) -> bool {
        self.cut.is_none()
    }

    #[inline]
    pub const fn is_internal(&self) -> bool {
        self.cut.is_some()
    }

    #[inline]
    pub const fn cut(&self) -> Option<&H::Subset> {
        self.cut.as_ref()
    }

    /// Hyperplane of the cut, if the node is internal.
    #[inline]
    pub fn cut_hyperplane(&self) -> Option<&H> {
        self.cut.as_ref().map(|cut| cut.hyperplane())
    }

    #[inline]
    pub const fn minus(&self) -> Option<NodeId> {
        self.minus
    }

    #[inline]
    pub const fn plus(&self) -> Option<NodeId> {
        self.plus
    }

    /// Both children, if the node is internal.
    #[inline]
    pub const fn children(&self) -> Option<(NodeId, NodeId)> {
        match (self.minus, self.plus) {
            (Some(minus), Some(plus)) => Some((minus, plus)),
            _ => None,
        }
    }

    #[inline]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub const fn data(&self) -> &D {
        &self.data
    }
}
