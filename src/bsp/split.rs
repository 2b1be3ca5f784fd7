//! Splitting a subtree by a hyperplane subset it does not contain

use crate::bsp::node::{NodeData, NodeId};
use crate::bsp::tree::BspTree;
use crate::partition::{Hyperplane, HyperplaneSubset, SplitLocation};

impl<H: Hyperplane, D: NodeData> BspTree<H, D> {
    /// Split the subtree rooted at `id` by `partitioner`.
    ///
    /// `partitioner` must already be trimmed to the cell of `id`. Returns the
    /// roots of two subtrees describing the part of the original subtree on
    /// the minus and on the plus side of the partitioner. The original
    /// subtree is consumed: its nodes are either reused by the result or left
    /// unreachable.
    pub(crate) fn split_subtree(&mut self, id: NodeId, partitioner: &H::Subset) -> (NodeId, NodeId) {
        let node = &self[id];
        let (Some(node_cut), Some((minus, plus))) = (node.cut().cloned(), node.children()) else {
            // a homogeneous cell is replicated on both sides
            return (self.copy_node(id), self.copy_node(id));
        };

        let partitioner_split = partitioner.split(node_cut.hyperplane());
        let node_cut_split = node_cut.split(partitioner.hyperplane());

        match (partitioner_split.location(), node_cut_split.location()) {
            (SplitLocation::Plus, SplitLocation::Plus) => {
                let (split_minus, split_plus) = self.split_subtree(plus, partitioner);
                let rebuilt = self.rebuild(id, node_cut, minus, split_plus);
                (split_minus, rebuilt)
            },
            (SplitLocation::Plus, SplitLocation::Minus | SplitLocation::Both | SplitLocation::Neither) => {
                let (split_minus, split_plus) = self.split_subtree(plus, partitioner);
                let rebuilt = self.rebuild(id, node_cut, minus, split_minus);
                (rebuilt, split_plus)
            },
            (SplitLocation::Minus, SplitLocation::Minus) => {
                let (split_minus, split_plus) = self.split_subtree(minus, partitioner);
                let rebuilt = self.rebuild(id, node_cut, split_minus, plus);
                (rebuilt, split_plus)
            },
            (SplitLocation::Minus, SplitLocation::Plus | SplitLocation::Both | SplitLocation::Neither) => {
                let (split_minus, split_plus) = self.split_subtree(minus, partitioner);
                let rebuilt = self.rebuild(id, node_cut, split_plus, plus);
                (split_minus, rebuilt)
            },
            (SplitLocation::Both, cut_location) => {
                let (partitioner_minus, partitioner_plus) = partitioner_split.into_parts();
                let (cut_minus, cut_plus) = node_cut_split.into_parts();
                if cut_location != SplitLocation::Both {
                    log::debug!(
                        "partitioner crosses node cut but node cut split is {cut_location:?}; \
                         using the available fragments"
                    );
                }

                let (minus_of_minus, plus_of_minus) = match partitioner_minus {
                    Some(fragment) => self.split_subtree(minus, &fragment),
                    None => (minus, self.duplicate_subtree(minus)),
                };
                let (minus_of_plus, plus_of_plus) = match partitioner_plus {
                    Some(fragment) => self.split_subtree(plus, &fragment),
                    None => (plus, self.duplicate_subtree(plus)),
                };

                let result_minus = self.join(id, cut_minus, minus_of_minus, minus_of_plus);
                let result_plus = self.join(id, cut_plus, plus_of_minus, plus_of_plus);
                (result_minus, result_plus)
            },
            (SplitLocation::Neither, cut_location) => {
                if cut_location != SplitLocation::Neither {
                    log::debug!(
                        "partitioner lies on node cut but node cut split is {cut_location:?}; \
                         treating the cuts as coincident"
                    );
                }
                if partitioner.hyperplane().similar_orientation(node_cut.hyperplane()) {
                    (minus, plus)
                } else {
                    (plus, minus)
                }
            },
        }
    }

    /// Copy the properties of `template` into a new node cut by `cut`.
    fn rebuild(&mut self, template: NodeId, cut: H::Subset, minus: NodeId, plus: NodeId) -> NodeId {
        let rebuilt = self.copy_node(template);
        self.link(rebuilt, cut, minus, plus);
        rebuilt
    }

    /// Deep copy of the subtree rooted at `id`, inside this arena.
    fn duplicate_subtree(&mut self, id: NodeId) -> NodeId {
        let copy = self.copy_node(id);
        let node = &self[id];
        if let (Some(cut), Some((minus, plus))) = (node.cut().cloned(), node.children()) {
            let minus = self.duplicate_subtree(minus);
            let plus = self.duplicate_subtree(plus);
            self.link(copy, cut, minus, plus);
        }
        copy
    }

    /// Like [`Self::rebuild`] but tolerates a missing cut fragment, in which
    /// case the minus subtree stands for the whole side.
    fn join(&mut self, template: NodeId, cut: Option<H::Subset>, minus: NodeId, plus: NodeId) -> NodeId {
        match cut {
            Some(cut) => self.rebuild(template, cut, minus, plus),
            None => {
                log::debug!("missing node cut fragment while splitting {template:?}");
                minus
            },
        }
    }
}
