mod support;

use bspgeom::{
    BspError, BspTree, HyperplaneSubset,
    bsp::FindNodeCutRule,
    euclidean::{Line, LineSubset, OrientedPoint},
    partition::Hyperplane,
};
use nalgebra::{Point1, Point2};

use crate::support::{approx_eq, precision};

fn x_axis() -> Line {
    Line::from_points(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), precision()).unwrap()
}

fn y_axis() -> Line {
    Line::from_points(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), precision()).unwrap()
}

#[test]
fn new_tree_is_a_single_leaf() {
    let tree: BspTree<OrientedPoint> = BspTree::new();
    assert_eq!(tree.count(), 1);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.version(), 0);
    assert!(tree[tree.root()].is_leaf());
    assert_eq!(tree.depth(tree.root()), 0);
}

#[test]
fn cut_node_creates_children() {
    let mut tree: BspTree<OrientedPoint> = BspTree::new();
    let root = tree.root();
    assert!(tree.cut_node(root, &OrientedPoint::positive_facing(0.0, precision())).unwrap());

    assert_eq!(tree.count(), 3);
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.version(), 1);

    let (minus, plus) = tree[root].children().unwrap();
    assert_eq!(tree[minus].parent(), Some(root));
    assert!(tree.is_minus(minus));
    assert!(tree.is_plus(plus));
    assert_eq!(tree.depth(plus), 1);
}

#[test]
fn degenerate_cut_is_not_an_error() {
    let mut tree: BspTree<OrientedPoint> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &OrientedPoint::positive_facing(0.0, precision())).unwrap();
    let minus = tree[root].minus().unwrap();
    let version = tree.version();

    // the minus cell is x < 0: neither a point on its boundary nor one outside it cuts it
    assert!(!tree.cut_node(minus, &OrientedPoint::positive_facing(0.0, precision())).unwrap());
    assert!(!tree.cut_node(minus, &OrientedPoint::positive_facing(5.0, precision())).unwrap());
    assert!(tree[minus].is_leaf());
    assert_eq!(tree.version(), version);

    assert!(tree.cut_node(minus, &OrientedPoint::positive_facing(-5.0, precision())).unwrap());
    assert_eq!(tree.count(), 5);
}

#[test]
fn clear_cut_discards_children() {
    let mut tree: BspTree<OrientedPoint> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &OrientedPoint::negative_facing(1.0, precision())).unwrap();
    let version = tree.version();

    assert!(tree.clear_cut(root).unwrap());
    assert!(tree[root].is_leaf());
    assert_eq!(tree.count(), 1);
    assert!(tree.version() > version);

    assert!(!tree.clear_cut(root).unwrap());
}

#[test]
fn foreign_node_is_structural_misuse() {
    let mut first: BspTree<OrientedPoint> = BspTree::new();
    let root = first.root();
    first.cut_node(root, &OrientedPoint::positive_facing(0.0, precision())).unwrap();
    let foreign = first[root].plus().unwrap();

    let mut second: BspTree<OrientedPoint> = BspTree::new();
    let result = second.cut_node(foreign, &OrientedPoint::positive_facing(1.0, precision()));
    assert!(matches!(result, Err(BspError::StructuralMisuse(_))));
    assert!(second.extract(foreign).is_err());
}

#[test]
fn handles_are_bound_to_their_tree() {
    let build = |offset: f64| {
        let mut tree: BspTree<OrientedPoint> = BspTree::new();
        let root = tree.root();
        tree.cut_node(root, &OrientedPoint::positive_facing(offset, precision())).unwrap();
        tree
    };
    let first = build(0.0);
    let mut twin = build(5.0);
    let leaf = first.find_cell(&Point1::new(-1.0));

    assert!(first.contains_node(leaf));
    assert!(!twin.contains_node(leaf));
    assert!(twin.get(leaf).is_none());
    assert!(matches!(
        twin.cut_node(leaf, &OrientedPoint::positive_facing(4.0, precision())),
        Err(BspError::StructuralMisuse(_))
    ));
    assert!(matches!(twin.clear_cut(first.root()), Err(BspError::StructuralMisuse(_))));
    assert_eq!(twin.count(), 3);

    let clone = first.clone();
    assert!(!clone.contains_node(leaf));
    assert!(!clone.contains_node(first.root()));
    assert_eq!(clone.find_cell(&Point1::new(-1.0)), clone[clone.root()].minus().unwrap());
}

#[test]
fn find_node_follows_the_cut_rule() {
    let mut tree: BspTree<Line> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &x_axis()).unwrap();
    let (minus, plus) = tree[root].children().unwrap();

    assert_eq!(tree.find_cell(&Point2::new(3.0, 1.0)), minus);
    assert_eq!(tree.find_cell(&Point2::new(3.0, -1.0)), plus);

    let on_cut = Point2::new(3.0, 0.0);
    assert_eq!(tree.find_cell(&on_cut), root);
    assert_eq!(tree.find_node(&on_cut, FindNodeCutRule::Node), root);
    assert_eq!(tree.find_node(&on_cut, FindNodeCutRule::Minus), minus);
    assert_eq!(tree.find_node(&on_cut, FindNodeCutRule::Plus), plus);
}

#[test]
fn insert_cuts_every_reached_leaf() {
    let mut tree: BspTree<Line> = BspTree::new();
    let horizontal =
        LineSubset::segment(Point2::new(-2.0, 0.0), Point2::new(2.0, 0.0), precision()).unwrap();
    assert_eq!(tree.insert(&horizontal).len(), 1);

    // the root cut spans the whole line, not just the inserted segment
    let root_cut = tree[tree.root()].cut().unwrap();
    assert!(root_cut.size().is_infinite());

    let vertical =
        LineSubset::segment(Point2::new(1.0, -1.0), Point2::new(1.0, 1.0), precision()).unwrap();
    let cut_nodes = tree.insert(&vertical);
    assert_eq!(cut_nodes.len(), 2);
    assert_eq!(tree.count(), 7);
    assert_eq!(tree.height(), 2);

    // a subset lying on an existing cut is dropped
    let coincident =
        LineSubset::segment(Point2::new(5.0, 0.0), Point2::new(6.0, 0.0), precision()).unwrap();
    assert!(tree.insert(&coincident).is_empty());
    assert_eq!(tree.count(), 7);
}

#[test]
fn trim_to_node_restricts_to_the_cell() {
    let mut tree: BspTree<Line> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &x_axis()).unwrap();
    let minus = tree[root].minus().unwrap();

    // the minus cell of the x axis is y > 0: only the upper half of the y axis remains
    let trimmed = tree.trim_to_node(minus, y_axis().span()).unwrap();
    assert!(trimmed.size().is_infinite());
    let closest = trimmed.closest(&Point2::new(0.0, -3.0));
    assert!(approx_eq(closest.y, 0.0, 1e-12));

    let plus = tree[root].plus().unwrap();
    let above =
        LineSubset::segment(Point2::new(0.0, 1.0), Point2::new(1.0, 2.0), precision()).unwrap();
    assert!(tree.trim_to_node(plus, above).is_none());
}

#[test]
fn copy_is_independent() {
    let mut tree: BspTree<OrientedPoint> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &OrientedPoint::positive_facing(0.0, precision())).unwrap();

    let mut copy = tree.copy();
    let copy_minus = copy[copy.root()].minus().unwrap();
    copy.cut_node(copy_minus, &OrientedPoint::positive_facing(-1.0, precision())).unwrap();

    assert_eq!(copy.count(), 5);
    assert_eq!(tree.count(), 3);
    assert_eq!(
        tree.find_cell(&Point1::new(-2.0)),
        tree[root].minus().unwrap()
    );
}

#[test]
fn extract_and_import_subtrees() {
    let mut tree: BspTree<OrientedPoint> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &OrientedPoint::positive_facing(0.0, precision())).unwrap();
    let plus = tree[root].plus().unwrap();
    tree.cut_node(plus, &OrientedPoint::positive_facing(2.0, precision())).unwrap();

    let extracted = tree.extract(plus).unwrap();
    assert_eq!(extracted.count(), 3);
    assert!(extracted[extracted.root()].parent().is_none());

    let mut other: BspTree<OrientedPoint> = BspTree::new();
    let other_root = other.root();
    other.copy_subtree(&tree, plus, other_root).unwrap();
    assert_eq!(other.count(), 3);
    let location = other[other.root()].cut_hyperplane().unwrap().location();
    assert!(approx_eq(location, 2.0, 1e-12));

    let detached = other.import_subtree(&tree, root).unwrap();
    assert!(other[detached].parent().is_none());
    // detached subtrees are not reachable from the root
    assert_eq!(other.count(), 3);
}

#[test]
fn node_iterator_is_pre_order() {
    let mut tree: BspTree<OrientedPoint> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &OrientedPoint::positive_facing(0.0, precision())).unwrap();
    let (minus, plus) = tree[root].children().unwrap();

    let nodes: Vec<_> = tree.nodes().collect();
    assert_eq!(nodes, vec![root, minus, plus]);
}

#[test]
fn display_dumps_the_structure() {
    let mut tree: BspTree<OrientedPoint> = BspTree::new();
    let root = tree.root();
    tree.cut_node(root, &OrientedPoint::positive_facing(0.0, precision())).unwrap();

    let dump = tree.to_string();
    assert!(dump.starts_with("BspTree[count=3, height=1]"));
    assert!(dump.contains("[-] leaf"));
    assert!(dump.contains("[+] leaf"));
}
