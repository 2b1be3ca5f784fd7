mod support;

use bspgeom::{BooleanOps, RegionLocation, euclidean::RegionBspTree1D};
use nalgebra::Point1;

use crate::support::{approx_eq, interval, intervals, line_samples, plane_samples, rectangle};

fn bounds(region: &RegionBspTree1D) -> Vec<(f64, f64)> {
    region
        .to_intervals()
        .iter()
        .map(|interval| (interval.min() as f64, interval.max() as f64))
        .collect()
}

fn assert_bounds(region: &RegionBspTree1D, expected: &[(f64, f64)]) {
    let actual = bounds(region);
    assert_eq!(actual.len(), expected.len(), "intervals {actual:?}, expected {expected:?}");
    for ((min, max), (expected_min, expected_max)) in actual.iter().zip(expected) {
        assert!((min - expected_min).abs() < 1e-9, "intervals {actual:?}");
        assert!((max - expected_max).abs() < 1e-9, "intervals {actual:?}");
    }
}

#[test]
fn union_of_overlapping_intervals() {
    let union = interval(0.0, 2.0).union(&interval(1.0, 3.0));
    assert_bounds(&union, &[(0.0, 3.0)]);
    assert!(approx_eq(union.size(), 3.0, 1e-9));
}

#[test]
fn union_of_touching_intervals_is_one_interval() {
    let union = interval(0.0, 1.0).union(&interval(1.0, 2.0));
    assert_bounds(&union, &[(0.0, 2.0)]);
    assert_eq!(union.classify(&Point1::new(1.0)), RegionLocation::Inside);
}

#[test]
fn intersection_of_disjoint_intervals_is_empty() {
    let intersection = interval(0.0, 1.0).intersection(&interval(2.0, 3.0));
    assert!(intersection.is_empty());
    assert!(approx_eq(intersection.size(), 0.0, 1e-12));
    assert!(intersection.barycenter().is_none());
}

#[test]
fn difference_punches_a_hole() {
    let difference = interval(0.0, 4.0).difference(&interval(1.0, 2.0));
    assert_bounds(&difference, &[(0.0, 1.0), (2.0, 4.0)]);
    assert!(approx_eq(difference.size(), 3.0, 1e-9));
    assert_eq!(difference.classify(&Point1::new(1.5)), RegionLocation::Outside);
    assert_eq!(difference.classify(&Point1::new(2.0)), RegionLocation::Boundary);
}

#[test]
fn xor_keeps_the_non_shared_parts() {
    let xor = interval(0.0, 2.0).xor(&interval(1.0, 3.0));
    assert_bounds(&xor, &[(0.0, 1.0), (2.0, 3.0)]);
    assert!(approx_eq(xor.size(), 2.0, 1e-9));
}

#[test]
fn operations_with_full_and_empty() {
    let a = intervals(&[(0.0, 1.0), (3.0, 5.0)]);
    let full = RegionBspTree1D::full();
    let empty = RegionBspTree1D::empty();

    assert!(a.union(&full).is_full());
    assert!(a.intersection(&empty).is_empty());
    assert_bounds(&a.union(&empty), &[(0.0, 1.0), (3.0, 5.0)]);
    assert_bounds(&a.intersection(&full), &[(0.0, 1.0), (3.0, 5.0)]);
    assert!(a.difference(&a).is_empty());
    assert!(a.xor(&a).is_empty());
    assert_bounds(&full.difference(&a.inverse()), &[(0.0, 1.0), (3.0, 5.0)]);
}

#[test]
fn de_morgan_duality_on_the_line() {
    let a = intervals(&[(-3.0, -1.0), (0.5, 2.5)]);
    let b = intervals(&[(-2.0, 1.0), (4.0, 6.0)]);

    let union = a.union(&b);
    let dual = a.inverse().intersection(&b.inverse()).inverse();
    for point in line_samples(-5.0, 7.0, 97) {
        assert_eq!(union.classify(&point), dual.classify(&point), "at {point}");
    }
    assert!(approx_eq(union.size(), dual.size(), 1e-9));
}

#[test]
fn difference_is_intersection_with_complement() {
    let a = intervals(&[(0.0, 5.0), (7.0, 9.0)]);
    let b = intervals(&[(1.0, 2.0), (4.0, 8.0)]);

    let difference = a.difference(&b);
    let identity = a.intersection(&b.inverse());
    assert_bounds(&difference, &[(0.0, 1.0), (2.0, 4.0), (8.0, 9.0)]);
    assert_eq!(bounds(&difference), bounds(&identity));

    // |A| = |A - B| + |A & B|
    let shared = a.intersection(&b);
    assert!(approx_eq(a.size(), difference.size() + shared.size(), 1e-9));
}

#[test]
fn union_all_folds_every_region() {
    let pieces = [interval(2.0, 3.0), interval(4.0, 5.0), interval(2.5, 4.5)];
    let union = interval(0.0, 1.0).union_all(&pieces);
    assert_bounds(&union, &[(0.0, 1.0), (2.0, 5.0)]);
}

#[test]
fn merge_results_are_condensed() {
    let mut union = interval(0.0, 2.0).union(&interval(1.0, 3.0));
    assert!(!union.condense());

    let mut empty = interval(0.0, 2.0).difference(&interval(-1.0, 3.0));
    assert!(!empty.condense());
    assert_eq!(empty.tree().count(), 1);
}

#[test]
fn in_place_operations_bump_the_version() {
    let mut region = interval(0.0, 2.0);
    let other = interval(1.0, 3.0);

    let mut version = region.version();
    region.union_with(&other);
    assert!(region.version() > version);
    assert_bounds(&region, &[(0.0, 3.0)]);

    version = region.version();
    region.difference_with(&interval(1.0, 2.0));
    assert!(region.version() > version);
    assert_bounds(&region, &[(0.0, 1.0), (2.0, 3.0)]);

    version = region.version();
    region.intersection_with(&interval(0.5, 2.5));
    assert!(region.version() > version);
    assert_bounds(&region, &[(0.5, 1.0), (2.0, 2.5)]);

    version = region.version();
    region.xor_with(&interval(0.0, 3.0));
    assert!(region.version() > version);
    assert_bounds(&region, &[(0.0, 0.5), (1.0, 2.0), (2.5, 3.0)]);
}

#[test]
fn inputs_are_left_untouched() {
    let a = interval(0.0, 2.0);
    let b = interval(1.0, 3.0);
    let (a_version, b_version) = (a.version(), b.version());

    let _ = a.xor(&b);
    assert_eq!(a.version(), a_version);
    assert_eq!(b.version(), b_version);
    assert_bounds(&a, &[(0.0, 2.0)]);
    assert_bounds(&b, &[(1.0, 3.0)]);
}

#[test]
fn rectangle_booleans_match_point_membership() {
    let a = rectangle(0.0, 0.0, 2.0, 2.0);
    let b = rectangle(1.0, 1.0, 3.0, 3.0);

    let union = a.union(&b);
    let intersection = a.intersection(&b);
    let difference = a.difference(&b);
    let xor = a.xor(&b);

    for point in plane_samples(-1.0, 4.0, 10) {
        let in_a = a.contains(&point);
        let in_b = b.contains(&point);
        assert_eq!(union.contains(&point), in_a || in_b, "union at {point}");
        assert_eq!(intersection.contains(&point), in_a && in_b, "intersection at {point}");
        assert_eq!(difference.contains(&point), in_a && !in_b, "difference at {point}");
        assert_eq!(xor.contains(&point), in_a != in_b, "xor at {point}");
    }
}

#[test]
fn rectangle_boolean_areas() {
    let a = rectangle(0.0, 0.0, 2.0, 2.0);
    let b = rectangle(1.0, 1.0, 3.0, 3.0);

    assert!(approx_eq(a.union(&b).size(), 7.0, 1e-9));
    assert!(approx_eq(a.intersection(&b).size(), 1.0, 1e-9));
    assert!(approx_eq(a.difference(&b).size(), 3.0, 1e-9));
    assert!(approx_eq(a.xor(&b).size(), 6.0, 1e-9));
}

#[test]
fn plane_de_morgan_duality() {
    let a = rectangle(0.0, 0.0, 2.0, 1.0);
    let b = rectangle(1.0, -1.0, 3.0, 3.0);

    let intersection = a.intersection(&b);
    let dual = a.inverse().union(&b.inverse()).inverse();
    for point in plane_samples(-1.0, 4.0, 10) {
        assert_eq!(intersection.classify(&point), dual.classify(&point), "at {point}");
    }
    assert!(approx_eq(dual.size(), 1.0, 1e-9));
}
