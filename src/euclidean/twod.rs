//! Two dimensional Euclidean space.
//!
//! Hyperplanes are oriented [`Line`]s and cuts are [`LineSubset`]s, i.e.
//! segments, rays or whole lines. Regions are arbitrary polygonal areas.

use crate::errors::{BspError, BspResult};
use crate::float_types::{Precision, Real};
use crate::partition::{Hyperplane, HyperplaneLocation, HyperplaneSubset, Point, Split};
use crate::region::{RegionBspTree, RegionMeasure, RegionSizeProperties};
use nalgebra::{Point2, Vector2};

/// A region of the plane.
pub type RegionBspTree2D = RegionBspTree<Line>;

impl Point for Point2<Real> {
    fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    fn distance(&self, other: &Self) -> Real {
        nalgebra::distance(self, other)
    }
}

/// An oriented line.
///
/// The plus side is on the right of the direction vector, the minus side on
/// its left, so a counter-clockwise boundary has the region on its minus side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    /// Projection of the coordinate origin onto the line.
    origin: Point2<Real>,
    /// Unit vector.
    direction: Vector2<Real>,
    precision: Precision,
}

impl Line {
    /// Line through `p1` and `p2`, directed from `p1` to `p2`.
    pub fn from_points(p1: Point2<Real>, p2: Point2<Real>, precision: Precision) -> BspResult<Self> {
        if !p1.coords.iter().chain(p2.coords.iter()).all(|c| c.is_finite()) {
            return Err(BspError::InvalidArgument(format!(
                "line points must be finite, got {p1} and {p2}"
            )));
        }
        if precision.eq_zero(nalgebra::distance(&p1, &p2)) {
            return Err(BspError::InvalidArgument(format!(
                "cannot build a line from coincident points {p1} and {p2}"
            )));
        }
        Self::from_point_and_direction(p1, p2 - p1, precision)
    }

    /// Line through `point` directed along `direction`.
    pub fn from_point_and_direction(
        point: Point2<Real>,
        direction: Vector2<Real>,
        precision: Precision,
    ) -> BspResult<Self> {
        if !point.coords.iter().chain(direction.iter()).all(|c| c.is_finite()) {
            return Err(BspError::InvalidArgument(format!(
                "line point and direction must be finite, got {point} and {direction}"
            )));
        }
        let norm = direction.norm();
        if precision.eq_zero(norm) {
            return Err(BspError::InvalidArgument("line direction has zero length".to_string()));
        }
        let direction = direction / norm;
        let origin = point - direction * point.coords.dot(&direction);
        Ok(Self {
            origin,
            direction,
            precision,
        })
    }

    #[inline]
    pub const fn origin(&self) -> &Point2<Real> {
        &self.origin
    }

    #[inline]
    pub const fn direction(&self) -> &Vector2<Real> {
        &self.direction
    }

    /// Unit normal pointing to the plus side.
    pub fn normal(&self) -> Vector2<Real> {
        Vector2::new(self.direction.y, -self.direction.x)
    }

    /// Signed position of the projection of `point` along the line.
    pub fn abscissa(&self, point: &Point2<Real>) -> Real {
        (point - self.origin).dot(&self.direction)
    }

    /// Point of the line at `abscissa`.
    pub fn point_at(&self, abscissa: Real) -> Point2<Real> {
        self.origin + self.direction * abscissa
    }

    /// Intersection point with `other`, `None` if the lines are parallel.
    pub fn intersection(&self, other: &Self) -> Option<Point2<Real>> {
        let cross = self.direction.perp(&other.direction);
        if self.precision.eq_zero(cross) {
            return None;
        }
        let abscissa = -other.offset(&self.origin) / cross;
        Some(self.point_at(abscissa))
    }
}

impl Hyperplane for Line {
    type Point = Point2<Real>;
    type Subset = LineSubset;

    fn offset(&self, point: &Point2<Real>) -> Real {
        (point - self.origin).dot(&self.normal())
    }

    fn precision(&self) -> Precision {
        self.precision
    }

    fn reverse(&self) -> Self {
        Self {
            direction: -self.direction,
            ..*self
        }
    }

    fn similar_orientation(&self, other: &Self) -> bool {
        self.direction.dot(&other.direction) >= 0.0
    }

    fn span(&self) -> LineSubset {
        LineSubset {
            line: *self,
            start: Real::NEG_INFINITY,
            end: Real::INFINITY,
        }
    }
}

/// Convex subset of a line: the abscissa range `[start, end]`, bounds may be infinite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSubset {
    line: Line,
    start: Real,
    end: Real,
}

impl LineSubset {
    /// Segment from `p1` to `p2`.
    pub fn segment(p1: Point2<Real>, p2: Point2<Real>, precision: Precision) -> BspResult<Self> {
        let line = Line::from_points(p1, p2, precision)?;
        Ok(Self {
            start: line.abscissa(&p1),
            end: line.abscissa(&p2),
            line,
        })
    }

    /// Portion of `line` between two abscissas.
    pub fn from_abscissas(line: Line, start: Real, end: Real) -> BspResult<Self> {
        if start.is_nan() || end.is_nan() || line.precision.gt(start, end) {
            return Err(BspError::InvalidArgument(format!(
                "invalid line subset abscissas [{start}, {end}]"
            )));
        }
        Ok(Self { line, start, end })
    }

    /// The whole `line`.
    pub fn span(line: Line) -> Self {
        line.span()
    }

    #[inline]
    pub const fn line(&self) -> &Line {
        &self.line
    }

    #[inline]
    pub const fn start(&self) -> Real {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Real {
        self.end
    }

    pub fn start_point(&self) -> Option<Point2<Real>> {
        self.start.is_finite().then(|| self.line.point_at(self.start))
    }

    pub fn end_point(&self) -> Option<Point2<Real>> {
        self.end.is_finite().then(|| self.line.point_at(self.end))
    }

    const fn with_range(&self, start: Real, end: Real) -> Self {
        Self {
            line: self.line,
            start,
            end,
        }
    }
}

impl HyperplaneSubset<Line> for LineSubset {
    fn hyperplane(&self) -> &Line {
        &self.line
    }

    fn split(&self, splitter: &Line) -> Split<Self> {
        let Some(crossing) = self.line.intersection(splitter) else {
            return match splitter.classify(&self.line.origin) {
                HyperplaneLocation::Minus => Split::new(Some(*self), None),
                HyperplaneLocation::Plus => Split::new(None, Some(*self)),
                HyperplaneLocation::On => Split::new(None, None),
            };
        };

        let precision = self.line.precision;
        let abscissa = self.line.abscissa(&crossing);
        let (before, after) = if precision.lte(self.end, abscissa) {
            (Some(*self), None)
        } else if precision.gte(self.start, abscissa) {
            (None, Some(*self))
        } else {
            (
                Some(self.with_range(self.start, abscissa)),
                Some(self.with_range(abscissa, self.end)),
            )
        };

        // moving along the line increases the splitter offset: after the crossing is plus
        if self.line.direction.dot(&splitter.normal()) > 0.0 {
            Split::new(before, after)
        } else {
            Split::new(after, before)
        }
    }

    fn size(&self) -> Real {
        self.end - self.start
    }

    fn is_empty(&self) -> bool {
        !self.line.precision.lt(self.start, self.end)
    }

    fn closest(&self, point: &Point2<Real>) -> Point2<Real> {
        let abscissa = self.line.abscissa(point).max(self.start).min(self.end);
        self.line.point_at(abscissa)
    }

    fn reverse(&self) -> Self {
        Self {
            line: self.line.reverse(),
            start: -self.end,
            end: -self.start,
        }
    }
}

impl RegionBspTree<Line> {
    /// Region enclosed by a simple polygon given as counter-clockwise vertices.
    ///
    /// Clockwise vertices describe the complement of the enclosed area.
    pub fn from_polygon(vertices: &[Point2<Real>], precision: Precision) -> BspResult<Self> {
        if vertices.len() < 3 {
            return Err(BspError::InvalidArgument(format!(
                "a polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let segments = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(p1, p2)| LineSubset::segment(*p1, *p2, precision))
            .collect::<BspResult<Vec<_>>>()?;

        let mut region = Self::empty();
        for segment in &segments {
            region.insert(segment);
        }
        Ok(region)
    }

    /// Boundary of the region as oriented segments, region on their left.
    pub fn boundary_segments(&self) -> Vec<LineSubset> {
        self.boundaries()
    }
}

impl RegionMeasure for Line {
    fn region_size_properties(region: &RegionBspTree<Self>) -> RegionSizeProperties<Point2<Real>> {
        let boundaries = region.boundaries();
        if boundaries.is_empty() {
            return if region.is_full() {
                RegionSizeProperties::infinite()
            } else {
                RegionSizeProperties::zero()
            };
        }

        let mut twice_area = 0.0;
        let mut centroid_sum = Vector2::<Real>::zeros();
        for segment in &boundaries {
            let (Some(p1), Some(p2)) = (segment.start_point(), segment.end_point()) else {
                return RegionSizeProperties::infinite();
            };
            let cross = p1.coords.perp(&p2.coords);
            twice_area += cross;
            centroid_sum += (p1.coords + p2.coords) * cross;
        }

        let area = 0.5 * twice_area;
        let barycenter = (area.abs() > Real::EPSILON)
            .then(|| Point2::from(centroid_sum / (3.0 * twice_area)));
        RegionSizeProperties::new(area, barycenter)
    }
}
