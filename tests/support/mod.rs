//! Test support library
//! Provides region builders and comparison helpers shared by the integration tests.
#![allow(dead_code)]

use bspgeom::{
    euclidean::{Interval, RegionBspTree1D, RegionBspTree2D},
    float_types::{Precision, Real},
    spherical::RegionBspTree1S,
};
use nalgebra::{Point1, Point2};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Precision context used by every test region.
pub fn precision() -> Precision {
    Precision::new(1e-9)
}

/// Region of the real line holding `[min, max]`.
pub fn interval(min: Real, max: Real) -> RegionBspTree1D {
    Interval::new(min, max, precision())
        .and_then(|interval| interval.to_tree())
        .unwrap()
}

/// Region of the real line holding the union of the given intervals.
pub fn intervals(bounds: &[(Real, Real)]) -> RegionBspTree1D {
    RegionBspTree1D::from_intervals(
        bounds
            .iter()
            .map(|&(min, max)| Interval::new(min, max, precision()).unwrap()),
    )
    .unwrap()
}

/// Axis aligned rectangle `[x0, x1] x [y0, y1]`.
pub fn rectangle(x0: Real, y0: Real, x1: Real, y1: Real) -> RegionBspTree2D {
    RegionBspTree2D::from_polygon(
        &[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ],
        precision(),
    )
    .unwrap()
}

/// Arc of the circle from `min` to `max`.
pub fn arc(min: Real, max: Real) -> RegionBspTree1S {
    RegionBspTree1S::from_interval(min, max, precision()).unwrap()
}

/// Evenly spaced sample points of the real line in `[min, max]`.
pub fn line_samples(min: Real, max: Real, count: usize) -> Vec<Point1<Real>> {
    (0..=count)
        .map(|i| Point1::new(min + (max - min) * i as Real / count as Real))
        .collect()
}

/// Grid of sample points covering `[min, max]^2`, offset so that no sample
/// falls on an integer coordinate.
pub fn plane_samples(min: Real, max: Real, count: usize) -> Vec<Point2<Real>> {
    let step = (max - min) / count as Real;
    let mut samples = Vec::with_capacity(count * count);
    for i in 0..count {
        for j in 0..count {
            samples.push(Point2::new(
                min + step * (i as Real + 0.37),
                min + step * (j as Real + 0.61),
            ));
        }
    }
    samples
}
