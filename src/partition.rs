//! Capabilities a space has to provide before BSP trees can partition it.
//!
//! A space supplies a [`Hyperplane`] type that classifies points and a convex
//! [`HyperplaneSubset`] type (a bounded or unbounded convex portion of a
//! hyperplane) that can be split by other hyperplanes. The tree, merge and
//! region algorithms are written purely against these traits.

use crate::float_types::{Precision, Real};
use std::fmt::Debug;

/// Position of a point relative to a hyperplane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HyperplaneLocation {
    Minus,
    On,
    Plus,
}

/// Where a split object ended up relative to the splitting hyperplane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitLocation {
    /// Entirely on the minus side.
    Minus,
    /// Entirely on the plus side.
    Plus,
    /// Divided into a minus part and a plus part.
    Both,
    /// Neither side, i.e. lying on the splitter itself.
    Neither,
}

/// Result of dividing an object by a hyperplane.
#[derive(Clone, Debug, PartialEq)]
pub struct Split<T> {
    minus: Option<T>,
    plus: Option<T>,
    location: SplitLocation,
}

impl<T> Split<T> {
    /// Build a split result; the location is derived from which parts exist.
    pub fn new(minus: Option<T>, plus: Option<T>) -> Self {
        let location = match (&minus, &plus) {
            (Some(_), Some(_)) => SplitLocation::Both,
            (Some(_), None) => SplitLocation::Minus,
            (None, Some(_)) => SplitLocation::Plus,
            (None, None) => SplitLocation::Neither,
        };
        Self {
            minus,
            plus,
            location,
        }
    }

    #[inline]
    pub const fn location(&self) -> SplitLocation {
        self.location
    }

    #[inline]
    pub const fn minus(&self) -> Option<&T> {
        self.minus.as_ref()
    }

    #[inline]
    pub const fn plus(&self) -> Option<&T> {
        self.plus.as_ref()
    }

    /// Consume the split, returning `(minus, plus)`.
    pub fn into_parts(self) -> (Option<T>, Option<T>) {
        (self.minus, self.plus)
    }
}

/// A point of a partitioned space.
pub trait Point: Clone + Debug + PartialEq {
    /// True if any coordinate is NaN.
    fn is_nan(&self) -> bool;

    /// Distance to `other` in the metric of the space.
    fn distance(&self, other: &Self) -> Real;
}

/// An oriented hyperplane dividing its space into a minus and a plus side.
pub trait Hyperplane: Clone + Debug + Sized {
    type Point: Point;
    type Subset: HyperplaneSubset<Self>;

    /// Signed offset of `point`: negative on the minus side, positive on the plus side.
    fn offset(&self, point: &Self::Point) -> Real;

    /// Comparator used for every decision involving this hyperplane.
    fn precision(&self) -> Precision;

    /// The same hyperplane with minus and plus sides swapped.
    fn reverse(&self) -> Self;

    /// True if `other` points in roughly the same direction (the plus sides agree).
    fn similar_orientation(&self, other: &Self) -> bool;

    /// A subset covering the whole hyperplane.
    fn span(&self) -> Self::Subset;

    /// Classify `point` using the precision of this hyperplane.
    fn classify(&self, point: &Self::Point) -> HyperplaneLocation {
        match self.precision().signum(self.offset(point)) {
            -1 => HyperplaneLocation::Minus,
            0 => HyperplaneLocation::On,
            _ => HyperplaneLocation::Plus,
        }
    }

    /// True if `point` lies on the hyperplane.
    fn contains(&self, point: &Self::Point) -> bool {
        self.classify(point) == HyperplaneLocation::On
    }

    /// Lower bound on the distance from `point` to anything lying on the side
    /// of the hyperplane opposite to `point` (including the hyperplane itself).
    ///
    /// Spaces that wrap around must return a bound that stays valid across
    /// the wrap, `0.0` being always acceptable.
    fn separation(&self, point: &Self::Point) -> Real {
        self.offset(point).abs()
    }
}

/// Convex portion of a hyperplane, used as the cut of a BSP node.
pub trait HyperplaneSubset<H: Hyperplane>: Clone + Debug {
    /// The hyperplane containing this subset.
    fn hyperplane(&self) -> &H;

    /// Split this subset by `splitter`.
    ///
    /// Parts lying on the splitter (within precision) are dropped, so a
    /// subset contained in `splitter` yields a [`SplitLocation::Neither`] result.
    fn split(&self, splitter: &H) -> Split<Self>;

    /// Measure of the subset in the dimension of the hyperplane (`0` for points).
    fn size(&self) -> Real;

    /// True if the subset has no extent at all.
    fn is_empty(&self) -> bool;

    /// True if the subset is unbounded.
    fn is_infinite(&self) -> bool {
        self.size().is_infinite()
    }

    /// Point of the subset closest to `point`.
    fn closest(&self, point: &H::Point) -> H::Point;

    /// The same subset lying on the reversed hyperplane.
    fn reverse(&self) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_location_follows_parts() {
        assert_eq!(Split::new(Some(1), Some(2)).location(), SplitLocation::Both);
        assert_eq!(Split::new(Some(1), None::<i32>).location(), SplitLocation::Minus);
        assert_eq!(Split::new(None::<i32>, Some(2)).location(), SplitLocation::Plus);
        assert_eq!(Split::<i32>::new(None, None).location(), SplitLocation::Neither);
    }

    #[test]
    fn into_parts_returns_both_sides() {
        let split = Split::new(Some("minus"), Some("plus"));
        assert_eq!(split.minus(), Some(&"minus"));
        assert_eq!(split.into_parts(), (Some("minus"), Some("plus")));
    }
}
