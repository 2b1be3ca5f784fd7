//! Binary Space Partitioning (BSP) tree implementation
//!
//! This module provides the space-agnostic tree: an arena of nodes, each
//! either a leaf or a convex hyperplane subset (the cut) with a minus and a
//! plus subtree. Region semantics live in [`crate::region`].

pub mod merge;
pub mod node;
pub mod split;
pub mod tree;
pub mod visitor;

pub use node::{Node, NodeData, NodeId};
pub use tree::{BspTree, FindNodeCutRule, Nodes};
pub use visitor::{BspTreeVisitor, VisitOrder, VisitResult};
