//! One dimensional Euclidean space: the real line.
//!
//! Hyperplanes are [`OrientedPoint`]s and regions are unions of intervals.

use crate::bsp::NodeId;
use crate::errors::{BspError, BspResult};
use crate::float_types::{Precision, Real};
use crate::partition::{Hyperplane, HyperplaneLocation, HyperplaneSubset, Point, Split};
use crate::region::{RegionBspTree, RegionMeasure, RegionSizeProperties};
use nalgebra::Point1;

/// A region of the real line.
pub type RegionBspTree1D = RegionBspTree<OrientedPoint>;

impl Point for Point1<Real> {
    fn is_nan(&self) -> bool {
        self.x.is_nan()
    }

    fn distance(&self, other: &Self) -> Real {
        nalgebra::distance(self, other)
    }
}

/// A point of the line together with the direction its plus side faces.
///
/// A positive facing point has `x > location` on its plus side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedPoint {
    location: Real,
    positive_facing: bool,
    precision: Precision,
}

impl OrientedPoint {
    /// Fails on a non-finite location.
    pub fn new(location: Real, positive_facing: bool, precision: Precision) -> BspResult<Self> {
        if !location.is_finite() {
            return Err(BspError::InvalidArgument(format!(
                "oriented point location must be finite, got {location}"
            )));
        }
        Ok(Self {
            location,
            positive_facing,
            precision,
        })
    }

    pub const fn positive_facing(location: Real, precision: Precision) -> Self {
        Self {
            location,
            positive_facing: true,
            precision,
        }
    }

    pub const fn negative_facing(location: Real, precision: Precision) -> Self {
        Self {
            location,
            positive_facing: false,
            precision,
        }
    }

    #[inline]
    pub const fn location(&self) -> Real {
        self.location
    }

    #[inline]
    pub const fn is_positive_facing(&self) -> bool {
        self.positive_facing
    }

    pub fn point(&self) -> Point1<Real> {
        Point1::new(self.location)
    }
}

impl Hyperplane for OrientedPoint {
    type Point = Point1<Real>;
    type Subset = OrientedPointSubset;

    fn offset(&self, point: &Point1<Real>) -> Real {
        let delta = point.x - self.location;
        if self.positive_facing { delta } else { -delta }
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    fn reverse(&self) -> Self {
        Self {
            positive_facing: !self.positive_facing,
            ..*self
        }
    }

    fn similar_orientation(&self, other: &Self) -> bool {
        self.positive_facing == other.positive_facing
    }

    fn span(&self) -> OrientedPointSubset {
        OrientedPointSubset { hyperplane: *self }
    }
}

/// The only convex subset of an oriented point: the point itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedPointSubset {
    hyperplane: OrientedPoint,
}

impl HyperplaneSubset<OrientedPoint> for OrientedPointSubset {
    fn hyperplane(&self) -> &OrientedPoint {
        &self.hyperplane
    }

    fn split(&self, splitter: &OrientedPoint) -> Split<Self> {
        match splitter.classify(&self.hyperplane.point()) {
            HyperplaneLocation::Minus => Split::new(Some(*self), None),
            HyperplaneLocation::Plus => Split::new(None, Some(*self)),
            HyperplaneLocation::On => Split::new(None, None),
        }
    }

    fn size(&self) -> Real {
        0.0
    }

    fn is_empty(&self) -> bool {
        false
    }

    fn is_infinite(&self) -> bool {
        false
    }

    fn closest(&self, _point: &Point1<Real>) -> Point1<Real> {
        self.hyperplane.point()
    }

    fn reverse(&self) -> Self {
        Self {
            hyperplane: self.hyperplane.reverse(),
        }
    }
}

/// A closed interval `[min, max]` of the real line; either bound may be infinite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    min: Real,
    max: Real,
    precision: Precision,
}

impl Interval {
    /// Fails if a bound is NaN, if `min > max`, or if both bounds are the same infinity.
    pub fn new(min: Real, max: Real, precision: Precision) -> BspResult<Self> {
        if min.is_nan() || max.is_nan() {
            return Err(BspError::InvalidArgument(format!(
                "interval bounds must not be NaN: [{min}, {max}]"
            )));
        }
        if min == Real::INFINITY || max == Real::NEG_INFINITY {
            return Err(BspError::InvalidArgument(format!(
                "interval [{min}, {max}] has both bounds at the same infinity"
            )));
        }
        if precision.gt(min, max) {
            return Err(BspError::InvalidArgument(format!(
                "interval min {min} is greater than max {max}"
            )));
        }
        Ok(Self {
            min,
            max: max.max(min),
            precision,
        })
    }

    #[inline]
    pub const fn min(&self) -> Real {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> Real {
        self.max
    }

    pub fn size(&self) -> Real {
        self.max - self.min
    }

    pub fn is_infinite(&self) -> bool {
        self.min.is_infinite() || self.max.is_infinite()
    }

    /// Midpoint, `None` for infinite intervals.
    pub fn midpoint(&self) -> Option<Real> {
        (!self.is_infinite()).then(|| 0.5 * (self.min + self.max))
    }

    pub fn contains(&self, x: Real) -> bool {
        self.precision.lte(self.min, x) && self.precision.lte(x, self.max)
    }

    /// Region tree holding exactly this interval.
    pub fn to_tree(&self) -> BspResult<RegionBspTree1D> {
        if self.precision.eq(self.min, self.max) {
            return Ok(RegionBspTree1D::empty());
        }
        let mut region = RegionBspTree1D::full();
        let mut node = region.root();
        if self.min.is_finite() {
            region.cut_node(node, &OrientedPoint::negative_facing(self.min, self.precision))?;
            node = region.tree()[node].minus().unwrap_or(node);
        }
        if self.max.is_finite() {
            region.cut_node(node, &OrientedPoint::positive_facing(self.max, self.precision))?;
        }
        Ok(region)
    }
}

impl RegionBspTree<OrientedPoint> {
    /// Union of the given intervals.
    pub fn from_intervals<I>(intervals: I) -> BspResult<Self>
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut region = Self::empty();
        for interval in intervals {
            region.add_interval(&interval)?;
        }
        Ok(region)
    }

    /// Add `interval` to the region.
    pub fn add_interval(&mut self, interval: &Interval) -> BspResult<()> {
        self.union_with(&interval.to_tree()?);
        Ok(())
    }

    /// Bounds of the cell of leaf `id`, derived from its ancestors' cuts.
    fn cell_bounds(&self, id: NodeId) -> (Real, Real, Precision) {
        let tree = self.tree();
        let mut min = Real::NEG_INFINITY;
        let mut max = Real::INFINITY;
        let mut precision = Precision::default();
        let mut current = id;
        while let Some(parent) = tree[current].parent() {
            if let Some(cut) = tree[parent].cut_hyperplane() {
                precision = cut.precision();
                let lower = cut.is_positive_facing() == tree.is_plus(current);
                if lower {
                    min = min.max(cut.location());
                } else {
                    max = max.min(cut.location());
                }
            }
            current = parent;
        }
        (min, max, precision)
    }

    /// The region as sorted, disjoint intervals; touching cells are merged.
    pub fn to_intervals(&self) -> Vec<Interval> {
        let mut cells: Vec<Interval> = self
            .inside_leaves()
            .map(|id| self.cell_bounds(id))
            .filter(|(min, max, precision)| precision.lt(*min, *max))
            .map(|(min, max, precision)| Interval { min, max, precision })
            .collect();
        cells.sort_by(|a, b| a.min.total_cmp(&b.min));

        let mut intervals: Vec<Interval> = Vec::with_capacity(cells.len());
        for cell in cells {
            if let Some(last) = intervals.last_mut() {
                if last.precision.gte(last.max, cell.min) {
                    last.max = last.max.max(cell.max);
                    continue;
                }
            }
            intervals.push(cell);
        }
        intervals
    }
}

impl RegionMeasure for OrientedPoint {
    fn region_size_properties(region: &RegionBspTree<Self>) -> RegionSizeProperties<Point1<Real>> {
        let intervals = region.to_intervals();
        if intervals.iter().any(Interval::is_infinite) {
            return RegionSizeProperties::infinite();
        }

        let (size, weighted) = intervals.iter().fold((0.0, 0.0), |(size, weighted), interval| {
            let length = interval.size();
            (size + length, weighted + length * 0.5 * (interval.min + interval.max))
        });
        let barycenter = (size > 0.0).then(|| Point1::new(weighted / size));
        RegionSizeProperties::new(size, barycenter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionLocation;

    fn precision() -> Precision {
        Precision::new(1e-9)
    }

    #[test]
    fn oriented_point_offsets() {
        let positive = OrientedPoint::positive_facing(2.0, precision());
        assert_eq!(positive.offset(&Point1::new(5.0)), 3.0);
        assert_eq!(positive.classify(&Point1::new(1.0)), HyperplaneLocation::Minus);
        assert_eq!(positive.reverse().offset(&Point1::new(5.0)), -3.0);
        assert!(!positive.similar_orientation(&positive.reverse()));
        assert!(OrientedPoint::new(Real::NAN, true, precision()).is_err());
    }

    #[test]
    fn interval_rejects_bad_bounds() {
        assert!(Interval::new(Real::NAN, 1.0, precision()).is_err());
        assert!(Interval::new(2.0, 1.0, precision()).is_err());
        assert!(Interval::new(Real::INFINITY, Real::INFINITY, precision()).is_err());
        assert!(Interval::new(Real::NEG_INFINITY, Real::INFINITY, precision()).is_ok());
    }

    #[test]
    fn interval_tree_classifies_points() {
        let region = Interval::new(1.0, 3.0, precision())
            .and_then(|interval| interval.to_tree())
            .expect("valid interval");
        assert_eq!(region.classify(&Point1::new(2.0)), RegionLocation::Inside);
        assert_eq!(region.classify(&Point1::new(1.0)), RegionLocation::Boundary);
        assert_eq!(region.classify(&Point1::new(3.0)), RegionLocation::Boundary);
        assert_eq!(region.classify(&Point1::new(4.0)), RegionLocation::Outside);
        assert_eq!(region.classify(&Point1::new(Real::NAN)), RegionLocation::Outside);
    }

    #[test]
    fn half_line_is_infinite() {
        let region = Interval::new(Real::NEG_INFINITY, 0.0, precision())
            .and_then(|interval| interval.to_tree())
            .expect("valid interval");
        assert!(region.size().is_infinite());
        assert!(region.barycenter().is_none());
        assert_eq!(region.classify(&Point1::new(-1e6)), RegionLocation::Inside);
    }

    #[test]
    fn zero_width_interval_is_empty() {
        let region = Interval::new(1.0, 1.0, precision())
            .and_then(|interval| interval.to_tree())
            .expect("valid interval");
        assert!(region.is_empty());
    }
}
