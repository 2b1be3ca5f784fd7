//! Visitor based traversal of a [`BspTree`]

use crate::bsp::node::{NodeData, NodeId};
use crate::bsp::tree::BspTree;
use crate::partition::Hyperplane;

/// Order in which a node and its two subtrees are visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisitOrder {
    /// Pre-order, minus subtree first.
    #[default]
    NodeMinusPlus,
    /// Pre-order, plus subtree first.
    NodePlusMinus,
    /// In-order, minus subtree first.
    MinusNodePlus,
    /// In-order, plus subtree first.
    PlusNodeMinus,
    /// Post-order, minus subtree first.
    MinusPlusNode,
    /// Post-order, plus subtree first.
    PlusMinusNode,
    /// Skip the node and its whole subtree.
    None,
}

#[derive(Clone, Copy)]
enum Step {
    Node,
    Minus,
    Plus,
}

impl VisitOrder {
    const fn steps(self) -> Option<[Step; 3]> {
        match self {
            Self::NodeMinusPlus => Some([Step::Node, Step::Minus, Step::Plus]),
            Self::NodePlusMinus => Some([Step::Node, Step::Plus, Step::Minus]),
            Self::MinusNodePlus => Some([Step::Minus, Step::Node, Step::Plus]),
            Self::PlusNodeMinus => Some([Step::Plus, Step::Node, Step::Minus]),
            Self::MinusPlusNode => Some([Step::Minus, Step::Plus, Step::Node]),
            Self::PlusMinusNode => Some([Step::Plus, Step::Minus, Step::Node]),
            Self::None => None,
        }
    }
}

/// What the traversal does after a node has been visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisitResult {
    Continue,
    /// Stop the whole traversal.
    Terminate,
}

/// Trait implemented by visitors called during a [`BspTree::accept`] traversal.
pub trait BspTreeVisitor<H: Hyperplane, D: NodeData> {
    /// Execute an operation on a node of the tree.
    fn visit(&mut self, tree: &BspTree<H, D>, node: NodeId) -> VisitResult;

    /// Order in which `node` and its subtrees should be visited.
    fn visit_order(&mut self, _tree: &BspTree<H, D>, _node: NodeId) -> VisitOrder {
        VisitOrder::NodeMinusPlus
    }
}

impl<F, H, D> BspTreeVisitor<H, D> for F
where
    H: Hyperplane,
    D: NodeData,
    F: FnMut(&BspTree<H, D>, NodeId) -> VisitResult,
{
    fn visit(&mut self, tree: &BspTree<H, D>, node: NodeId) -> VisitResult {
        (self)(tree, node)
    }
}

impl<H: Hyperplane, D: NodeData> BspTree<H, D> {
    /// Walk the tree with `visitor`, letting it pick the order at every node.
    pub fn accept<V: BspTreeVisitor<H, D>>(&self, visitor: &mut V) {
        self.accept_node(self.root(), visitor);
    }

    fn accept_node<V: BspTreeVisitor<H, D>>(&self, id: NodeId, visitor: &mut V) -> VisitResult {
        let Some(steps) = visitor.visit_order(self, id).steps() else {
            return VisitResult::Continue;
        };
        let children = self[id].children();

        for step in steps {
            let result = match (step, children) {
                (Step::Node, _) => visitor.visit(self, id),
                (Step::Minus, Some((minus, _))) => self.accept_node(minus, visitor),
                (Step::Plus, Some((_, plus))) => self.accept_node(plus, visitor),
                (Step::Minus | Step::Plus, None) => VisitResult::Continue,
            };
            if result == VisitResult::Terminate {
                return VisitResult::Terminate;
            }
        }
        VisitResult::Continue
    }
}
