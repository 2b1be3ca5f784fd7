//! Regions of a space represented by BSP trees.
//!
//! A [`RegionBspTree`] attaches an [`RegionLocation`] to every leaf of a
//! [`BspTree`]: the region is the union of the inside leaf cells. On top of the
//! tree it provides classification, boolean operations, boundary extraction,
//! size and barycenter computation and boundary projection.

pub mod boundary;
pub mod merge_ops;
pub mod project;
pub mod size;

pub use boundary::RegionCutBoundary;
pub use merge_ops::RegionMergeOp;
pub use size::{RegionMeasure, RegionSizeProperties};

use crate::bsp::{BspTree, NodeData, NodeId};
use crate::errors::{BspError, BspResult};
use crate::float_types::Real;
use crate::partition::{Hyperplane, HyperplaneLocation, Point, Split};
use crate::traits::BooleanOps;
use std::fmt;
use std::sync::OnceLock;

/// Location of a point or a leaf cell relative to a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionLocation {
    Inside,
    Outside,
    /// On the boundary. Never stored on a leaf.
    Boundary,
}

impl RegionLocation {
    /// Inside becomes outside and vice versa; boundary stays boundary.
    pub const fn complement(self) -> Self {
        match self {
            Self::Inside => Self::Outside,
            Self::Outside => Self::Inside,
            Self::Boundary => Self::Boundary,
        }
    }
}

/// How the children of a newly cut region node are classified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegionCutRule {
    /// Minus child inside, plus child outside.
    #[default]
    MinusInside,
    /// Plus child inside, minus child outside.
    PlusInside,
    /// Both children take the location of the node being cut.
    Inherit,
}

/// Node payload of a region tree.
pub struct RegionNodeData<H: Hyperplane> {
    location: RegionLocation,
    cut_boundary: OnceLock<RegionCutBoundary<H>>,
}

impl<H: Hyperplane> RegionNodeData<H> {
    const fn with_location(location: RegionLocation) -> Self {
        Self {
            location,
            cut_boundary: OnceLock::new(),
        }
    }

    /// Leaf location; meaningless on internal nodes.
    #[inline]
    pub const fn location(&self) -> RegionLocation {
        self.location
    }

    #[inline]
    pub const fn is_inside(&self) -> bool {
        matches!(self.location, RegionLocation::Inside)
    }

    #[inline]
    pub const fn is_outside(&self) -> bool {
        matches!(self.location, RegionLocation::Outside)
    }

    pub(crate) const fn complement(&mut self) {
        self.location = self.location.complement();
    }
}

impl<H: Hyperplane> Default for RegionNodeData<H> {
    fn default() -> Self {
        Self::with_location(RegionLocation::Inside)
    }
}

impl<H: Hyperplane> Clone for RegionNodeData<H> {
    fn clone(&self) -> Self {
        Self {
            location: self.location,
            cut_boundary: self.cut_boundary.clone(),
        }
    }
}

impl<H: Hyperplane> fmt::Debug for RegionNodeData<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.location)
    }
}

impl<H: Hyperplane> NodeData for RegionNodeData<H> {
    fn init_child(_parent: &Self, is_plus: bool) -> Self {
        Self::with_location(if is_plus {
            RegionLocation::Outside
        } else {
            RegionLocation::Inside
        })
    }

    fn copy_properties(&self) -> Self {
        Self::with_location(self.location)
    }

    fn invalidate(&mut self) {
        self.cut_boundary.take();
    }
}

/// A value computed from a tree on first use. Every mutation of the tree
/// goes through `&mut` and resets it.
#[derive(Clone, Debug)]
struct LazyCache<T> {
    cell: OnceLock<T>,
}

impl<T> Default for LazyCache<T> {
    fn default() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }
}

impl<T: Clone> LazyCache<T> {
    fn get_or_compute(&self, compute: impl FnOnce() -> T) -> T {
        self.cell.get_or_init(compute).clone()
    }

    fn reset(&mut self) {
        self.cell.take();
    }
}

/// The tree type wrapped by a [`RegionBspTree`].
pub type RegionTree<H> = BspTree<H, RegionNodeData<H>>;

/// A region of space represented by a BSP tree with inside/outside leaves.
#[derive(Clone, Debug)]
pub struct RegionBspTree<H: Hyperplane> {
    tree: RegionTree<H>,
    boundary_size: LazyCache<Real>,
    size_properties: LazyCache<RegionSizeProperties<H::Point>>,
}

impl<H: Hyperplane> Default for RegionBspTree<H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<H: Hyperplane> RegionBspTree<H> {
    /// Region covering the whole space (`full == true`) or nothing.
    pub fn new(full: bool) -> Self {
        let location = if full {
            RegionLocation::Inside
        } else {
            RegionLocation::Outside
        };
        Self::from_tree(BspTree::with_root_data(RegionNodeData::with_location(location)))
    }

    /// Region covering the whole space.
    pub fn full() -> Self {
        Self::new(true)
    }

    /// Region containing nothing.
    pub fn empty() -> Self {
        Self::new(false)
    }

    pub(crate) fn from_tree(tree: RegionTree<H>) -> Self {
        Self {
            tree,
            boundary_size: LazyCache::default(),
            size_properties: LazyCache::default(),
        }
    }

    /// Read-only access to the underlying tree.
    #[inline]
    pub const fn tree(&self) -> &RegionTree<H> {
        &self.tree
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        self.tree.root()
    }

    #[inline]
    pub const fn version(&self) -> u64 {
        self.tree.version()
    }

    /// Location of a leaf, `None` for internal nodes.
    pub fn node_location(&self, id: NodeId) -> BspResult<Option<RegionLocation>> {
        let node = self.tree.check_node(id)?;
        Ok(node.is_leaf().then(|| node.data().location()))
    }

    /// Set the location of leaf `id`.
    pub fn set_location(&mut self, id: NodeId, location: RegionLocation) -> BspResult<()> {
        if self.tree.check_node(id)?.is_internal() {
            return Err(BspError::StructuralMisuse(format!(
                "cannot set the location of internal node {id:?}"
            )));
        }
        if location == RegionLocation::Boundary {
            return Err(BspError::InvalidArgument(
                "a leaf cannot be located on the boundary".to_string(),
            ));
        }
        self.tree.data_mut(id).location = location;
        self.tree.invalidate_from(id);
        self.tree.increment_version();
        self.invalidate_region_properties();
        Ok(())
    }

    /// Cut node `id` by `cutter`, minus side inside and plus side outside.
    pub fn cut_node(&mut self, id: NodeId, cutter: &H) -> BspResult<bool> {
        self.insert_cut(id, cutter, RegionCutRule::MinusInside)
    }

    /// Cut node `id` by `cutter`, classifying the new children with `rule`.
    /// Returns `Ok(false)` if the cut is degenerate within the node cell.
    pub fn insert_cut(&mut self, id: NodeId, cutter: &H, rule: RegionCutRule) -> BspResult<bool> {
        let previous = self.tree.check_node(id)?.data().location();
        let cut = self.tree.cut_node(id, cutter)?;
        if cut {
            self.apply_cut_rule(id, rule, previous);
        }
        self.invalidate_region_properties();
        Ok(cut)
    }

    /// Turn node `id` back into a leaf. Returns `Ok(false)` if it already was one.
    pub fn clear_cut(&mut self, id: NodeId) -> BspResult<bool> {
        let cleared = self.tree.clear_cut(id)?;
        if cleared {
            self.invalidate_region_properties();
        }
        Ok(cleared)
    }

    /// Insert a convex subset as a boundary, minus side inside.
    pub fn insert(&mut self, subset: &H::Subset) -> Vec<NodeId> {
        self.insert_with_rule(subset, RegionCutRule::MinusInside)
    }

    /// Insert a convex subset, classifying every leaf it cuts with `rule`.
    pub fn insert_with_rule(&mut self, subset: &H::Subset, rule: RegionCutRule) -> Vec<NodeId> {
        let cut_nodes = self.tree.insert(subset);
        for &id in &cut_nodes {
            let previous = self.tree[id].data().location();
            self.apply_cut_rule(id, rule, previous);
        }
        if !cut_nodes.is_empty() {
            self.invalidate_region_properties();
        }
        cut_nodes
    }

    fn apply_cut_rule(&mut self, id: NodeId, rule: RegionCutRule, previous: RegionLocation) {
        let Some((minus, plus)) = self.tree[id].children() else {
            return;
        };
        let (minus_location, plus_location) = match rule {
            RegionCutRule::MinusInside => (RegionLocation::Inside, RegionLocation::Outside),
            RegionCutRule::PlusInside => (RegionLocation::Outside, RegionLocation::Inside),
            RegionCutRule::Inherit => (previous, previous),
        };
        self.tree.data_mut(minus).location = minus_location;
        self.tree.data_mut(plus).location = plus_location;
    }

    /// Classify `point` against the region. NaN points are always outside.
    pub fn classify(&self, point: &H::Point) -> RegionLocation {
        if point.is_nan() {
            return RegionLocation::Outside;
        }
        self.classify_from(self.tree.root(), point)
    }

    fn classify_from(&self, id: NodeId, point: &H::Point) -> RegionLocation {
        let node = &self.tree[id];
        let (Some(hyperplane), Some((minus, plus))) = (node.cut_hyperplane(), node.children()) else {
            return node.data().location();
        };
        match hyperplane.classify(point) {
            HyperplaneLocation::Minus => self.classify_from(minus, point),
            HyperplaneLocation::Plus => self.classify_from(plus, point),
            HyperplaneLocation::On => {
                let minus_location = self.classify_from(minus, point);
                let plus_location = self.classify_from(plus, point);
                if minus_location == plus_location {
                    minus_location
                } else {
                    RegionLocation::Boundary
                }
            },
        }
    }

    /// True if `point` is inside the region or on its boundary.
    pub fn contains(&self, point: &H::Point) -> bool {
        self.classify(point) != RegionLocation::Outside
    }

    /// True if no leaf is outside.
    pub fn is_full(&self) -> bool {
        !self.has_leaf(RegionLocation::Outside)
    }

    /// True if no leaf is inside.
    pub fn is_empty(&self) -> bool {
        !self.has_leaf(RegionLocation::Inside)
    }

    fn has_leaf(&self, location: RegionLocation) -> bool {
        self.tree.nodes().any(|id| {
            let node = &self.tree[id];
            node.is_leaf() && node.data().location() == location
        })
    }

    /// Ids of the inside leaves, in pre-order.
    pub fn inside_leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.nodes().filter(|&id| {
            let node = &self.tree[id];
            node.is_leaf() && node.data().is_inside()
        })
    }

    /// Flip every leaf between inside and outside.
    pub fn complement(&mut self) {
        let ids: Vec<NodeId> = self.tree.nodes().collect();
        for id in ids {
            self.tree.data_mut(id).complement();
        }
        self.tree.invalidate_all();
        self.tree.increment_version();
        self.invalidate_region_properties();
    }

    /// Collapse every internal node whose children are leaves with the same
    /// location. Returns true if the tree changed.
    pub fn condense(&mut self) -> bool {
        let before = self.tree.count();
        let root = self.tree.root();
        let changed = Self::condense_node(&mut self.tree, root);
        if changed {
            log::trace!("condensed region tree from {before} to {} nodes", self.tree.count());
            self.invalidate_region_properties();
        }
        changed
    }

    fn condense_node(tree: &mut RegionTree<H>, id: NodeId) -> bool {
        let Some((minus, plus)) = tree[id].children() else {
            return false;
        };
        let minus_changed = Self::condense_node(tree, minus);
        let plus_changed = Self::condense_node(tree, plus);

        let (minus_node, plus_node) = (&tree[minus], &tree[plus]);
        if minus_node.is_leaf()
            && plus_node.is_leaf()
            && minus_node.data().location() == plus_node.data().location()
        {
            let location = minus_node.data().location();
            tree.set_node_cut(id, None);
            tree.data_mut(id).location = location;
            return true;
        }
        minus_changed || plus_changed
    }

    /// Drop the cached boundary size and size properties.
    pub fn invalidate_region_properties(&mut self) {
        self.boundary_size.reset();
        self.size_properties.reset();
    }

    /// Split the region by `splitter` into the parts on its minus and plus
    /// sides. Each part is a region cut at the root by `splitter`; empty parts
    /// are absent.
    pub fn split(&self, splitter: &H) -> BspResult<Split<Self>> {
        let mut scratch = self.tree.clone();
        let root = scratch.root();
        let (minus, plus) = scratch.split_subtree(root, &splitter.span());
        let minus_half = Self::half_region(&scratch, minus, splitter, false)?;
        let plus_half = Self::half_region(&scratch, plus, splitter, true)?;
        Ok(Split::new(minus_half, plus_half))
    }

    fn half_region(
        source: &RegionTree<H>,
        part: NodeId,
        splitter: &H,
        is_plus: bool,
    ) -> BspResult<Option<Self>> {
        let mut tree = RegionTree::<H>::new();
        let root = tree.root();
        if !tree.cut_node(root, splitter)? {
            log::debug!("splitter is degenerate; region left unsplit");
            if is_plus {
                return Ok(None);
            }
            tree.copy_subtree(source, part, root)?;
        } else if let Some((minus, plus)) = tree[root].children() {
            let (keep, discard) = if is_plus { (plus, minus) } else { (minus, plus) };
            tree.copy_subtree(source, part, keep)?;
            tree.data_mut(discard).location = RegionLocation::Outside;
        }

        let mut region = Self::from_tree(tree);
        region.condense();
        Ok((!region.is_empty()).then_some(region))
    }

    fn merged(tree1: &Self, tree2: &Self, op: RegionMergeOp) -> Self {
        let tree = BspTree::merge(&tree1.tree, &tree2.tree, |output, node1, node2| {
            op.merge_leaf(output, node1, node2)
        });
        let mut region = Self::from_tree(tree);
        region.condense();
        region
    }

    fn assign(&mut self, merged: Self) {
        self.tree.replace_with(merged.tree);
        self.invalidate_region_properties();
    }

    /// Replace this region by its union with `other`.
    pub fn union_with(&mut self, other: &Self) {
        let merged = Self::merged(self, other, RegionMergeOp::Union);
        self.assign(merged);
    }

    /// Replace this region by its intersection with `other`.
    pub fn intersection_with(&mut self, other: &Self) {
        let merged = Self::merged(self, other, RegionMergeOp::Intersection);
        self.assign(merged);
    }

    /// Remove `other` from this region.
    pub fn difference_with(&mut self, other: &Self) {
        let merged = Self::merged(self, other, RegionMergeOp::Difference);
        self.assign(merged);
    }

    /// Replace this region by its symmetric difference with `other`.
    pub fn xor_with(&mut self, other: &Self) {
        let merged = Self::merged(self, other, RegionMergeOp::Xor);
        self.assign(merged);
    }
}

impl<H: Hyperplane> BooleanOps for RegionBspTree<H> {
    fn union(&self, other: &Self) -> Self {
        Self::merged(self, other, RegionMergeOp::Union)
    }

    fn difference(&self, other: &Self) -> Self {
        Self::merged(self, other, RegionMergeOp::Difference)
    }

    fn intersection(&self, other: &Self) -> Self {
        Self::merged(self, other, RegionMergeOp::Intersection)
    }

    fn xor(&self, other: &Self) -> Self {
        Self::merged(self, other, RegionMergeOp::Xor)
    }

    fn inverse(&self) -> Self {
        let mut inverse = self.clone();
        inverse.complement();
        inverse
    }
}

impl<H: Hyperplane> fmt::Display for RegionBspTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}
