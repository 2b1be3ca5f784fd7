//! Extraction of region boundaries from node cuts

use crate::bsp::NodeId;
use crate::errors::BspResult;
use crate::float_types::Real;
use crate::partition::{Hyperplane, HyperplaneSubset, SplitLocation};
use crate::region::{RegionBspTree, RegionTree};

/// Portion of a node cut lying on the region boundary.
///
/// Fragments in `outside_facing` have the region on their minus side and the
/// outside on their plus side; `inside_facing` fragments the other way around.
#[derive(Clone, Debug)]
pub struct RegionCutBoundary<H: Hyperplane> {
    inside_facing: Vec<H::Subset>,
    outside_facing: Vec<H::Subset>,
}

impl<H: Hyperplane> RegionCutBoundary<H> {
    #[inline]
    pub fn inside_facing(&self) -> &[H::Subset] {
        &self.inside_facing
    }

    #[inline]
    pub fn outside_facing(&self) -> &[H::Subset] {
        &self.outside_facing
    }

    /// Total size of all fragments.
    pub fn size(&self) -> Real {
        self.inside_facing
            .iter()
            .chain(&self.outside_facing)
            .map(|fragment| fragment.size())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inside_facing.is_empty() && self.outside_facing.is_empty()
    }

    /// All fragments, inside facing ones first.
    pub fn fragments(&self) -> impl Iterator<Item = &H::Subset> {
        self.inside_facing.iter().chain(&self.outside_facing)
    }
}

/// Push `sub` down the subtree rooted at `id`, collecting the fragments that
/// reach inside and outside leaves.
fn characterize<H: Hyperplane>(
    tree: &RegionTree<H>,
    sub: H::Subset,
    id: NodeId,
    inside: &mut Vec<H::Subset>,
    outside: &mut Vec<H::Subset>,
) {
    let node = &tree[id];
    let (Some(hyperplane), Some((minus, plus))) = (node.cut_hyperplane(), node.children()) else {
        if node.data().is_inside() {
            inside.push(sub);
        } else {
            outside.push(sub);
        }
        return;
    };

    let split = sub.split(hyperplane);
    if split.location() == SplitLocation::Neither {
        // lies on the cut of this node: both sides touch it
        characterize(tree, sub.clone(), plus, inside, outside);
        characterize(tree, sub, minus, inside, outside);
        return;
    }
    let (split_minus, split_plus) = split.into_parts();
    if let Some(fragment) = split_plus {
        characterize(tree, fragment, plus, inside, outside);
    }
    if let Some(fragment) = split_minus {
        characterize(tree, fragment, minus, inside, outside);
    }
}

fn compute_cut_boundary<H: Hyperplane>(tree: &RegionTree<H>, id: NodeId) -> RegionCutBoundary<H> {
    let mut boundary = RegionCutBoundary {
        inside_facing: Vec::new(),
        outside_facing: Vec::new(),
    };
    let node = &tree[id];
    let (Some(cut), Some((minus, plus))) = (node.cut(), node.children()) else {
        return boundary;
    };

    let mut plus_in = Vec::new();
    let mut plus_out = Vec::new();
    characterize(tree, cut.clone(), plus, &mut plus_in, &mut plus_out);

    let mut discarded = Vec::new();
    // outside on the plus side, inside on the minus side
    for fragment in plus_out {
        characterize(tree, fragment, minus, &mut boundary.outside_facing, &mut discarded);
    }
    // inside on the plus side, outside on the minus side
    for fragment in plus_in {
        characterize(tree, fragment, minus, &mut discarded, &mut boundary.inside_facing);
    }
    boundary
}

impl<H: Hyperplane> RegionBspTree<H> {
    /// Boundary portion of the cut of internal node `id`; `None` for leaves.
    /// Computed on first access and cached on the node.
    pub fn cut_boundary(&self, id: NodeId) -> BspResult<Option<&RegionCutBoundary<H>>> {
        let node = self.tree.check_node(id)?;
        if node.is_leaf() {
            return Ok(None);
        }
        Ok(Some(
            node.data()
                .cut_boundary
                .get_or_init(|| compute_cut_boundary(&self.tree, id)),
        ))
    }

    /// Every boundary fragment of the region, oriented so that its plus side
    /// faces the outside.
    pub fn boundaries(&self) -> Vec<H::Subset> {
        let mut boundaries = Vec::new();
        for id in self.tree.nodes() {
            if let Ok(Some(boundary)) = self.cut_boundary(id) {
                boundaries.extend(boundary.outside_facing.iter().cloned());
                boundaries.extend(boundary.inside_facing.iter().map(|fragment| fragment.reverse()));
            }
        }
        boundaries
    }

    /// Total size of the region boundary.
    pub fn boundary_size(&self) -> Real {
        self.boundary_size.get_or_compute(|| {
            self.tree
                .nodes()
                .filter_map(|id| self.cut_boundary(id).ok().flatten())
                .map(RegionCutBoundary::size)
                .sum()
        })
    }
}
