//! Generic two-tree merge driver

use crate::bsp::node::{NodeData, NodeId};
use crate::bsp::tree::BspTree;
use crate::partition::Hyperplane;

impl<H: Hyperplane, D: NodeData> BspTree<H, D> {
    /// Merge `tree1` and `tree2` into a new tree.
    ///
    /// Both inputs are only read: their content is imported into the arena
    /// of the output first, so every node handed to `merge_leaf` belongs to
    /// the output tree. The two trees are walked together, node2's subtree
    /// being split by node1's cut whenever both nodes are internal; as soon
    /// as either node is a leaf, `merge_leaf(output, node1, node2)` decides the
    /// resulting subtree. It may return either argument (possibly modified)
    /// or a freshly created node.
    pub fn merge<F>(tree1: &Self, tree2: &Self, mut merge_leaf: F) -> Self
    where
        F: FnMut(&mut Self, NodeId, NodeId) -> NodeId,
    {
        let mut output = Self::new();
        let root1 = output.import_recursive(tree1, tree1.root());
        let root2 = output.import_recursive(tree2, tree2.root());

        let root = output.merge_recursive(root1, root2, &mut merge_leaf);
        output.replace_root(root);

        log::trace!(
            "merged trees of {} and {} nodes into {} nodes",
            tree1.count(),
            tree2.count(),
            output.count()
        );
        output
    }

    fn merge_recursive<F>(&mut self, node1: NodeId, node2: NodeId, merge_leaf: &mut F) -> NodeId
    where
        F: FnMut(&mut Self, NodeId, NodeId) -> NodeId,
    {
        let node = &self[node1];
        match (node.cut().cloned(), node.children()) {
            (Some(cut), Some((minus1, plus1))) if self[node2].is_internal() => {
                let (minus2, plus2) = self.split_subtree(node2, &cut);
                let minus = self.merge_recursive(minus1, minus2, merge_leaf);
                let plus = self.merge_recursive(plus1, plus2, merge_leaf);
                self.link(node1, cut, minus, plus);
                node1
            },
            _ => merge_leaf(self, node1, node2),
        }
    }
}
