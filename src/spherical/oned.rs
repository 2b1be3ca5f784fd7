//! The 1-sphere: angles on a circle.
//!
//! Points are azimuths normalized to `[0, 2π)`. Hyperplanes are
//! [`CutAngle`]s; since the azimuth origin is itself a fixed boundary of the
//! parametrization, a region crossing it is stored as two pieces, joined again
//! by [`RegionBspTree1S::to_intervals`].

use crate::bsp::NodeId;
use crate::errors::{BspError, BspResult};
use crate::float_types::{Precision, Real, TAU};
use crate::partition::{Hyperplane, HyperplaneLocation, HyperplaneSubset, Point, Split};
use crate::region::{RegionBspTree, RegionMeasure, RegionSizeProperties};

/// A region of the circle.
pub type RegionBspTree1S = RegionBspTree<CutAngle>;

/// A point on the circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point1S {
    azimuth: Real,
}

impl Point1S {
    /// Point at the origin of azimuths.
    pub const ZERO: Self = Self { azimuth: 0.0 };

    /// Point at `azimuth` radians, normalized into `[0, 2π)`. NaN stays NaN.
    pub fn of(azimuth: Real) -> Self {
        let normalized = azimuth.rem_euclid(TAU);
        Self {
            azimuth: if normalized >= TAU { 0.0 } else { normalized },
        }
    }

    #[inline]
    pub const fn azimuth(&self) -> Real {
        self.azimuth
    }

    /// Position on the unit circle embedded in the plane.
    pub fn to_vector(&self) -> (Real, Real) {
        let (sin, cos) = self.azimuth.sin_cos();
        (cos, sin)
    }
}

impl Point for Point1S {
    fn is_nan(&self) -> bool {
        self.azimuth.is_nan()
    }

    /// Shortest angular distance, in `[0, π]`.
    fn distance(&self, other: &Self) -> Real {
        let delta = (self.azimuth - other.azimuth).abs();
        delta.min(TAU - delta)
    }
}

/// An oriented point of the circle.
///
/// A positive facing cut has the azimuths above its own on its plus side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutAngle {
    point: Point1S,
    positive_facing: bool,
    precision: Precision,
}

impl CutAngle {
    /// Fails on a non-finite azimuth.
    pub fn new(azimuth: Real, positive_facing: bool, precision: Precision) -> BspResult<Self> {
        if !azimuth.is_finite() {
            return Err(BspError::InvalidArgument(format!(
                "cut angle azimuth must be finite, got {azimuth}"
            )));
        }
        Ok(Self {
            point: Point1S::of(azimuth),
            positive_facing,
            precision,
        })
    }

    pub fn positive_facing(azimuth: Real, precision: Precision) -> Self {
        Self {
            point: Point1S::of(azimuth),
            positive_facing: true,
            precision,
        }
    }

    pub fn negative_facing(azimuth: Real, precision: Precision) -> Self {
        Self {
            point: Point1S::of(azimuth),
            positive_facing: false,
            precision,
        }
    }

    #[inline]
    pub const fn point(&self) -> &Point1S {
        &self.point
    }

    #[inline]
    pub const fn azimuth(&self) -> Real {
        self.point.azimuth
    }

    #[inline]
    pub const fn is_positive_facing(&self) -> bool {
        self.positive_facing
    }
}

impl Hyperplane for CutAngle {
    type Point = Point1S;
    type Subset = CutAngleSubset;

    fn offset(&self, point: &Point1S) -> Real {
        let delta = point.azimuth - self.point.azimuth;
        if self.positive_facing { delta } else { -delta }
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    /// Points within precision of the azimuth origin, on either side of the
    /// wrap, are classified as the origin itself.
    fn classify(&self, point: &Point1S) -> HyperplaneLocation {
        let point = if self.precision.eq_zero(point.distance(&Point1S::ZERO)) {
            Point1S::ZERO
        } else {
            *point
        };
        match self.precision.signum(self.offset(&point)) {
            -1 => HyperplaneLocation::Minus,
            0 => HyperplaneLocation::On,
            _ => HyperplaneLocation::Plus,
        }
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

    fn span(&self) -> CutAngleSubset {
        CutAngleSubset { hyperplane: *self }
    }

    /// Offsets say nothing about distances across the azimuth origin.
    fn separation(&self, _point: &Point1S) -> Real {
        0.0
    }
}

/// The only convex subset of a cut angle: its point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutAngleSubset {
    hyperplane: CutAngle,
}

impl HyperplaneSubset<CutAngle> for CutAngleSubset {
    fn hyperplane(&self) -> &CutAngle {
        &self.hyperplane
    }

    fn split(&self, splitter: &CutAngle) -> Split<Self> {
        match splitter.classify(&self.hyperplane.point) {
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

    fn closest(&self, _point: &Point1S) -> Point1S {
        self.hyperplane.point
    }

    fn reverse(&self) -> Self {
        Self {
            hyperplane: self.hyperplane.reverse(),
        }
    }
}

/// Arc of the circle from `min` to `max` counter-clockwise.
///
/// `min` lies in `[0, 2π)` and `max` in `(min, min + 2π]`, so an arc crossing
/// the azimuth origin has `max > 2π`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularInterval {
    min: Real,
    max: Real,
}

impl AngularInterval {
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

    pub fn midpoint(&self) -> Point1S {
        Point1S::of(0.5 * (self.min + self.max))
    }

    pub fn is_full(&self, precision: &Precision) -> bool {
        precision.gte(self.size(), TAU)
    }

    pub fn contains(&self, point: &Point1S, precision: &Precision) -> bool {
        let mut azimuth = point.azimuth;
        if precision.lt(azimuth, self.min) {
            azimuth += TAU;
        }
        precision.lte(self.min, azimuth) && precision.lte(azimuth, self.max)
    }
}

impl RegionBspTree<CutAngle> {
    /// Region holding the arc from `min` to `max` counter-clockwise.
    ///
    /// The arc may cross the azimuth origin. An arc of `2π` or more yields the
    /// full circle; zero width, reversed or non-finite bounds are rejected.
    pub fn from_interval(min: Real, max: Real, precision: Precision) -> BspResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(BspError::InvalidArgument(format!(
                "angular interval bounds must be finite, got [{min}, {max}]"
            )));
        }
        let width = max - min;
        if !precision.gt(width, 0.0) {
            return Err(BspError::InvalidArgument(format!(
                "angular interval [{min}, {max}] has no positive width"
            )));
        }
        if precision.gte(width, TAU) {
            return Ok(Self::full());
        }

        let start = Point1S::of(min).azimuth;
        let end = start + width;
        let mut region = Self::full();
        let root = region.root();

        if precision.gt(end, TAU) {
            // wraps around the origin: inside below `end - 2π` or above `start`
            region.cut_node(root, &CutAngle::positive_facing(end - TAU, precision))?;
            if let Some(plus) = region.tree()[root].plus() {
                region.cut_node(plus, &CutAngle::negative_facing(start, precision))?;
            }
            return Ok(region);
        }

        let mut node = root;
        if !precision.eq_zero(start) {
            region.cut_node(node, &CutAngle::negative_facing(start, precision))?;
            node = region.tree()[node].minus().unwrap_or(node);
        }
        if !precision.eq(end, TAU) {
            region.cut_node(node, &CutAngle::positive_facing(end, precision))?;
        }
        Ok(region)
    }

    /// Add the arc from `min` to `max` to the region.
    pub fn add_interval(&mut self, min: Real, max: Real, precision: Precision) -> BspResult<()> {
        self.union_with(&Self::from_interval(min, max, precision)?);
        Ok(())
    }

    /// Bounds of the cell of leaf `id` within `[0, 2π]`.
    fn cell_bounds(&self, id: NodeId) -> (Real, Real, Precision) {
        let tree = self.tree();
        let mut min: Real = 0.0;
        let mut max = TAU;
        let mut precision = Precision::default();
        let mut current = id;
        while let Some(parent) = tree[current].parent() {
            if let Some(cut) = tree[parent].cut_hyperplane() {
                precision = cut.precision();
                if cut.is_positive_facing() == tree.is_plus(current) {
                    min = min.max(cut.azimuth());
                } else {
                    max = max.min(cut.azimuth());
                }
            }
            current = parent;
        }
        (min, max, precision)
    }

    /// Inside cells in increasing azimuth order, adjacent cells merged.
    ///
    /// Sibling cells are disjoint by construction, so the only inconsistency
    /// left to detect is a cell whose ancestors' cuts leave it inverted. A tree
    /// built through the public API never has one.
    fn inside_arcs(&self) -> BspResult<(Vec<AngularInterval>, Precision)> {
        let mut precision = Precision::default();
        let mut cells = Vec::new();
        for id in self.inside_leaves() {
            let (min, max, cell_precision) = self.cell_bounds(id);
            precision = cell_precision;
            if precision.gt(min, max) {
                return Err(BspError::InconsistentRegion(format!(
                    "inside cell of node {id:?} has inverted bounds [{min}, {max}]"
                )));
            }
            if precision.lt(min, max) {
                cells.push(AngularInterval { min, max });
            }
        }
        cells.sort_by(|a, b| a.min.total_cmp(&b.min));

        let mut arcs: Vec<AngularInterval> = Vec::with_capacity(cells.len());
        for cell in cells {
            match arcs.last_mut() {
                Some(last) if precision.eq(cell.min, last.max) => last.max = cell.max,
                _ => arcs.push(cell),
            }
        }
        Ok((arcs, precision))
    }

    /// Inside arcs with the two pieces split at the azimuth origin joined,
    /// together with the precision of the cuts bounding them.
    fn joined_arcs(&self) -> BspResult<(Vec<AngularInterval>, Precision)> {
        let (mut arcs, precision) = self.inside_arcs()?;
        if arcs.len() > 1 {
            let first = arcs[0];
            let last = arcs[arcs.len() - 1];
            if precision.eq_zero(first.min) && precision.eq(last.max, TAU) {
                arcs.remove(0);
                if let Some(joined) = arcs.last_mut() {
                    joined.max = TAU + first.max;
                }
            }
        }
        Ok((arcs, precision))
    }

    /// The region as disjoint arcs sorted by their start.
    ///
    /// An arc crossing the azimuth origin is returned as a single interval
    /// whose `max` exceeds `2π`, listed last. Fails with
    /// [`BspError::InconsistentRegion`] if an inside cell has inverted bounds.
    pub fn to_intervals(&self) -> BspResult<Vec<AngularInterval>> {
        self.joined_arcs().map(|(arcs, _)| arcs)
    }
}

impl RegionMeasure for CutAngle {
    fn region_size_properties(region: &RegionBspTree<Self>) -> RegionSizeProperties<Point1S> {
        let (arcs, precision) = match region.joined_arcs() {
            Ok(joined) => joined,
            Err(err) => {
                log::warn!("measuring inconsistent circle region: {err}");
                let size = region
                    .inside_leaves()
                    .map(|id| {
                        let (min, max, _) = region.cell_bounds(id);
                        (max - min).max(0.0)
                    })
                    .sum();
                return RegionSizeProperties::new(size, None);
            },
        };

        let mut size = 0.0;
        let (mut x, mut y): (Real, Real) = (0.0, 0.0);
        for arc in &arcs {
            let length = arc.size();
            let (cos, sin) = arc.midpoint().to_vector();
            size += length;
            x += length * cos;
            y += length * sin;
        }

        let balanced = precision.gte(size, TAU) || precision.eq_zero(x.hypot(y));
        let barycenter = (!balanced).then(|| Point1S::of(y.atan2(x)));
        RegionSizeProperties::new(size, barycenter)
    }
}
