//! Leaf policies turning the generic merge into boolean operations

use crate::bsp::{NodeData, NodeId};
use crate::partition::Hyperplane;
use crate::region::{RegionLocation, RegionNodeData, RegionTree};

/// Boolean operation selected for a region merge.
///
/// Each variant only decides what happens once one of the two merged nodes
/// is a leaf; the traversal itself is shared by all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionMergeOp {
    Union,
    Intersection,
    /// First operand minus second operand.
    Difference,
    /// Symmetric difference.
    Xor,
}

impl RegionMergeOp {
    /// Resulting subtree for the pair `(node1, node2)`, at least one of which
    /// is a leaf.
    pub fn merge_leaf<H: Hyperplane>(
        self,
        tree: &mut RegionTree<H>,
        node1: NodeId,
        node2: NodeId,
    ) -> NodeId {
        let leaf1 = tree[node1].is_leaf();
        match self {
            Self::Union => {
                if !leaf1 {
                    return self.merge_leaf(tree, node2, node1);
                }
                if is_inside(tree, node1) { node1 } else { node2 }
            },
            Self::Intersection => {
                if !leaf1 {
                    return self.merge_leaf(tree, node2, node1);
                }
                if is_inside(tree, node1) { node2 } else { node1 }
            },
            Self::Difference => {
                if leaf1 && is_inside(tree, node1) {
                    complement_subtree(tree, node2);
                    node2
                } else if tree[node2].is_leaf() && is_inside(tree, node2) {
                    let data = RegionNodeData::with_location(RegionLocation::Outside);
                    tree.create_node(data)
                } else {
                    node1
                }
            },
            Self::Xor => {
                if !leaf1 {
                    return self.merge_leaf(tree, node2, node1);
                }
                if is_inside(tree, node1) {
                    complement_subtree(tree, node2);
                }
                node2
            },
        }
    }
}

fn is_inside<H: Hyperplane>(tree: &RegionTree<H>, id: NodeId) -> bool {
    tree[id].data().is_inside()
}

fn complement_subtree<H: Hyperplane>(tree: &mut RegionTree<H>, id: NodeId) {
    let ids: Vec<NodeId> = tree.subtree_nodes(id).collect();
    for node in ids {
        let data = tree.data_mut(node);
        data.complement();
        data.invalidate();
    }
}
