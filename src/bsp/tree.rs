//! Arena backed BSP tree container

use crate::bsp::node::{Node, NodeData, NodeId, NodeKey, TreeId, next_tree_id};
use crate::errors::{BspError, BspResult};
use crate::partition::{Hyperplane, HyperplaneLocation, HyperplaneSubset};
use slotmap::{SecondaryMap, SlotMap};
use std::fmt;
use std::ops::Index;

/// What [`BspTree::find_node`] does with a point lying exactly on a cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FindNodeCutRule {
    /// Stop at the node whose cut contains the point.
    Node,
    /// Keep descending on the minus side.
    Minus,
    /// Keep descending on the plus side.
    Plus,
}

/// A binary space partitioning tree.
///
/// Nodes live in an arena owned by the tree and are addressed by [`NodeId`].
/// The root always exists; a single-leaf tree is the trivial partition of the
/// whole space. Every structural mutation increments [`version`](Self::version).
///
/// Each instance, clones included, has its own identity: handles obtained
/// from one tree are rejected by every other tree.
#[derive(Debug)]
pub struct BspTree<H: Hyperplane, D: NodeData = ()> {
    id: TreeId,
    nodes: SlotMap<NodeKey, Node<H, D>>,
    root: NodeId,
    version: u64,
}

impl<H: Hyperplane, D: NodeData> Clone for BspTree<H, D> {
    fn clone(&self) -> Self {
        let id = next_tree_id();
        let mut nodes = self.nodes.clone();
        for node in nodes.values_mut() {
            node.retag(id);
        }
        Self {
            id,
            nodes,
            root: NodeId::new(id, self.root.key),
            version: self.version,
        }
    }
}

impl<H: Hyperplane, D: NodeData> Default for BspTree<H, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Hyperplane, D: NodeData> Index<NodeId> for BspTree<H, D> {
    type Output = Node<H, D>;

    /// Panics if `id` does not belong to this tree; use [`BspTree::get`] to check.
    fn index(&self, id: NodeId) -> &Self::Output {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {id:?} does not belong to this tree"),
        }
    }
}

impl<H: Hyperplane, D: NodeData> BspTree<H, D> {
    /// Create a tree consisting of a single leaf with default payload
    pub fn new() -> Self {
        Self::with_root_data(D::default())
    }

    /// Create a tree consisting of a single leaf carrying `data`
    pub fn with_root_data(data: D) -> Self {
        let id = next_tree_id();
        let mut nodes = SlotMap::with_key();
        let root = NodeId::new(id, nodes.insert(Node::leaf(data)));
        Self {
            id,
            nodes,
            root,
            version: 0,
        }
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Structural change counter.
    #[inline]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node<H, D>> {
        if id.tree == self.id {
            self.nodes.get(id.key)
        } else {
            None
        }
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn check_node(&self, id: NodeId) -> BspResult<&Node<H, D>> {
        self.get(id).ok_or_else(|| {
            BspError::StructuralMisuse(format!("node {id:?} does not belong to this tree"))
        })
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut D {
        &mut self.nodes[id.key].data
    }

    pub(crate) const fn increment_version(&mut self) {
        self.version += 1;
    }

    /// Replace the whole content of this tree by `other`, keeping the version
    /// strictly increasing.
    pub(crate) fn replace_with(&mut self, other: Self) {
        let next = self.version + 1;
        *self = other;
        self.version = self.version.max(next);
    }

    /// Create a detached leaf carrying `data`.
    pub(crate) fn create_node(&mut self, data: D) -> NodeId {
        NodeId::new(self.id, self.nodes.insert(Node::leaf(data)))
    }

    /// Create a detached leaf carrying a copy of the properties of `id`.
    pub(crate) fn copy_node(&mut self, id: NodeId) -> NodeId {
        let data = self.nodes[id.key].data.copy_properties();
        self.create_node(data)
    }

    /// True if `id` is the plus child of its parent.
    pub fn is_plus(&self, id: NodeId) -> bool {
        self.get(id)
            .and_then(|node| node.parent)
            .is_some_and(|parent| self.nodes[parent.key].plus == Some(id))
    }

    /// True if `id` is the minus child of its parent.
    pub fn is_minus(&self, id: NodeId) -> bool {
        self.get(id)
            .and_then(|node| node.parent)
            .is_some_and(|parent| self.nodes[parent.key].minus == Some(id))
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).and_then(|node| node.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent.key].parent;
        }
        depth
    }

    /// Height of the whole tree; a single leaf has height 0.
    pub fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Height of the subtree rooted at `id`.
    pub fn height_of(&self, id: NodeId) -> usize {
        match self.get(id).and_then(|node| node.children()) {
            Some((minus, plus)) => 1 + self.height_of(minus).max(self.height_of(plus)),
            None => 0,
        }
    }

    /// Number of nodes reachable from the root.
    pub fn count(&self) -> usize {
        self.nodes().count()
    }

    /// Pre-order iterator (node, minus subtree, plus subtree) over the whole tree.
    pub fn nodes(&self) -> Nodes<'_, H, D> {
        self.subtree_nodes(self.root)
    }

    /// Pre-order iterator over the subtree rooted at `id`.
    pub fn subtree_nodes(&self, id: NodeId) -> Nodes<'_, H, D> {
        let stack = if self.contains_node(id) {
            vec![id]
        } else {
            Vec::new()
        };
        Nodes { tree: self, stack }
    }

    /// Leaf cell containing `point`, or the node whose cut contains it.
    pub fn find_cell(&self, point: &H::Point) -> NodeId {
        self.find_node(point, FindNodeCutRule::Node)
    }

    /// Descend from the root following the side of each cut `point` lies on.
    pub fn find_node(&self, point: &H::Point, rule: FindNodeCutRule) -> NodeId {
        let mut current = self.root;
        loop {
            let node = &self.nodes[current.key];
            let (Some(hyperplane), Some((minus, plus))) = (node.cut_hyperplane(), node.children())
            else {
                return current;
            };
            current = match hyperplane.classify(point) {
                HyperplaneLocation::Minus => minus,
                HyperplaneLocation::Plus => plus,
                HyperplaneLocation::On => match rule {
                    FindNodeCutRule::Node => return current,
                    FindNodeCutRule::Minus => minus,
                    FindNodeCutRule::Plus => plus,
                },
            };
        }
    }

    /// Restrict `subset` to the cell of node `id` by splitting it against the
    /// cut of every ancestor. Returns `None` if nothing remains.
    pub fn trim_to_node(&self, id: NodeId, subset: H::Subset) -> Option<H::Subset> {
        let mut trimmed = subset;
        let mut current = id;
        while let Some(parent) = self.get(current).and_then(|node| node.parent) {
            let parent_node = &self.nodes[parent.key];
            let hyperplane = parent_node.cut_hyperplane()?;
            let (minus, plus) = trimmed.split(hyperplane).into_parts();
            trimmed = if parent_node.plus == Some(current) {
                plus?
            } else {
                minus?
            };
            current = parent;
        }
        Some(trimmed)
    }

    /// Cut node `id` with `cutter`, replacing any existing subtree.
    ///
    /// The cutter is trimmed to the cell of the node first. If nothing of it
    /// remains the node is left (or turned into) a leaf and `Ok(false)` is
    /// returned.
    pub fn cut_node(&mut self, id: NodeId, cutter: &H) -> BspResult<bool> {
        self.check_node(id)?;
        match self.trim_to_node(id, cutter.span()) {
            Some(trimmed) if !trimmed.is_empty() => {
                self.set_node_cut(id, Some(trimmed));
                Ok(true)
            },
            _ => {
                log::trace!("cut of node {id:?} is degenerate within its cell");
                self.set_node_cut(id, None);
                Ok(false)
            },
        }
    }

    /// Remove the cut of node `id`, turning it into a leaf.
    /// Returns `Ok(false)` if it already was one.
    pub fn clear_cut(&mut self, id: NodeId) -> BspResult<bool> {
        if self.check_node(id)?.is_leaf() {
            return Ok(false);
        }
        self.set_node_cut(id, None);
        Ok(true)
    }

    /// Insert a convex subset into the tree.
    ///
    /// The subset is pushed down to every leaf it reaches, and each of those
    /// leaves is cut by the subset's hyperplane trimmed to the leaf cell.
    /// Portions lying on an existing cut are dropped. Returns the nodes that
    /// were cut, in insertion order.
    pub fn insert(&mut self, subset: &H::Subset) -> Vec<NodeId> {
        let mut cut_nodes = Vec::new();
        let root = self.root;
        self.insert_recursive(
            root,
            subset.clone(),
            subset.hyperplane().span(),
            &mut cut_nodes,
        );
        cut_nodes
    }

    fn insert_recursive(
        &mut self,
        id: NodeId,
        insert: H::Subset,
        trimmed: H::Subset,
        cut_nodes: &mut Vec<NodeId>,
    ) {
        let node = &self.nodes[id.key];
        match (node.cut_hyperplane().cloned(), node.children()) {
            (Some(hyperplane), Some((minus, plus))) => {
                let (insert_minus, insert_plus) = insert.split(&hyperplane).into_parts();
                if insert_minus.is_none() && insert_plus.is_none() {
                    // lies on the existing cut
                    return;
                }
                let (trimmed_minus, trimmed_plus) = trimmed.split(&hyperplane).into_parts();
                if let (Some(insert), Some(trimmed)) = (insert_minus, trimmed_minus) {
                    self.insert_recursive(minus, insert, trimmed, cut_nodes);
                }
                if let (Some(insert), Some(trimmed)) = (insert_plus, trimmed_plus) {
                    self.insert_recursive(plus, insert, trimmed, cut_nodes);
                }
            },
            _ => {
                if !trimmed.is_empty() {
                    self.set_node_cut(id, Some(trimmed));
                    cut_nodes.push(id);
                }
            },
        }
    }

    /// Set (or clear) the cut of `id`. Existing children are discarded and
    /// fresh leaves initialized through [`NodeData::init_child`] are created.
    pub(crate) fn set_node_cut(&mut self, id: NodeId, cut: Option<H::Subset>) {
        let node = &mut self.nodes[id.key];
        if node.is_leaf() && cut.is_none() {
            return;
        }
        node.cut = None;
        let old_children = [node.minus.take(), node.plus.take()];
        for child in old_children.into_iter().flatten() {
            self.remove_subtree(child);
        }

        if let Some(cut) = cut {
            let parent_data = &self.nodes[id.key].data;
            let minus_data = D::init_child(parent_data, false);
            let plus_data = D::init_child(parent_data, true);
            let minus = self.create_node(minus_data);
            let plus = self.create_node(plus_data);
            self.link(id, cut, minus, plus);
        }

        self.invalidate_from(id);
        self.increment_version();
    }

    /// Attach `cut`, `minus` and `plus` to node `id`. Previous children are
    /// left in the arena until [`Self::prune`]; caches are not invalidated.
    pub(super) fn link(&mut self, id: NodeId, cut: H::Subset, minus: NodeId, plus: NodeId) {
        let node = &mut self.nodes[id.key];
        node.cut = Some(cut);
        node.minus = Some(minus);
        node.plus = Some(plus);
        self.nodes[minus.key].parent = Some(id);
        self.nodes[plus.key].parent = Some(id);
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current.key) {
                stack.extend(node.minus);
                stack.extend(node.plus);
            }
        }
    }

    /// Make `id` the root and drop everything no longer reachable from it.
    pub(crate) fn replace_root(&mut self, id: NodeId) {
        self.nodes[id.key].parent = None;
        self.root = id;
        self.prune();
        self.increment_version();
    }

    /// Drop every node not reachable from the root.
    pub(crate) fn prune(&mut self) {
        let mut reachable = SecondaryMap::new();
        for id in self.nodes() {
            reachable.insert(id.key, ());
        }
        self.nodes.retain(|key, _| reachable.contains_key(key));
    }

    /// Invalidate the cached state of `id` and of all its ancestors.
    pub(crate) fn invalidate_from(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &mut self.nodes[node_id.key];
            node.data.invalidate();
            current = node.parent;
        }
    }

    pub(crate) fn invalidate_all(&mut self) {
        for node in self.nodes.values_mut() {
            node.data.invalidate();
        }
    }

    /// Deep copy the subtree of `source` rooted at `source_id` into a new
    /// detached subtree of this tree and return its root.
    pub fn import_subtree(&mut self, source: &Self, source_id: NodeId) -> BspResult<NodeId> {
        source.check_node(source_id)?;
        Ok(self.import_recursive(source, source_id))
    }

    pub(super) fn import_recursive(&mut self, source: &Self, source_id: NodeId) -> NodeId {
        let source_node = &source.nodes[source_id.key];
        let id = self.create_node(source_node.data.copy_properties());
        if let (Some(cut), Some((minus, plus))) = (source_node.cut.clone(), source_node.children()) {
            let minus = self.import_recursive(source, minus);
            let plus = self.import_recursive(source, plus);
            self.link(id, cut, minus, plus);
        }
        id
    }

    /// Replace the subtree rooted at `target` by a deep copy of the subtree of
    /// `source` rooted at `source_id`, properties included.
    pub fn copy_subtree(&mut self, source: &Self, source_id: NodeId, target: NodeId) -> BspResult<()> {
        let source_node = source.check_node(source_id)?;
        self.check_node(target)?;

        let node = &mut self.nodes[target.key];
        node.cut = None;
        let old_children = [node.minus.take(), node.plus.take()];
        node.data = source_node.data.copy_properties();
        for child in old_children.into_iter().flatten() {
            self.remove_subtree(child);
        }

        if let (Some(cut), Some((minus, plus))) = (source_node.cut.clone(), source_node.children()) {
            let minus = self.import_recursive(source, minus);
            let plus = self.import_recursive(source, plus);
            self.link(target, cut, minus, plus);
        }
        self.invalidate_from(target);
        self.increment_version();
        Ok(())
    }

    /// Full deep copy of the tree.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// New tree whose root is a deep copy of the subtree rooted at `id`.
    pub fn extract(&self, id: NodeId) -> BspResult<Self> {
        let mut tree = Self::new();
        let root = tree.import_subtree(self, id)?;
        tree.replace_root(root);
        Ok(tree)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, label: &str, depth: usize) -> fmt::Result {
        let node = &self.nodes[id.key];
        let indent = "    ".repeat(depth);
        match node.cut() {
            Some(cut) => writeln!(f, "{indent}{label}{cut:?}")?,
            None => writeln!(f, "{indent}{label}leaf {:?}", node.data)?,
        }
        if let Some((minus, plus)) = node.children() {
            self.fmt_node(f, minus, "[-] ", depth + 1)?;
            self.fmt_node(f, plus, "[+] ", depth + 1)?;
        }
        Ok(())
    }
}

impl<H: Hyperplane, D: NodeData> fmt::Display for BspTree<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BspTree[count={}, height={}]", self.count(), self.height())?;
        self.fmt_node(f, self.root, "", 1)
    }
}

/// Pre-order node iterator returned by [`BspTree::nodes`].
pub struct Nodes<'a, H: Hyperplane, D: NodeData> {
    tree: &'a BspTree<H, D>,
    stack: Vec<NodeId>,
}

impl<H: Hyperplane, D: NodeData> Iterator for Nodes<'_, H, D> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some((minus, plus)) = self.tree.nodes[id.key].children() {
            self.stack.push(plus);
            self.stack.push(minus);
        }
        Some(id)
    }
}
