//! Size and barycenter of regions

use crate::float_types::Real;
use crate::partition::Hyperplane;
use crate::region::RegionBspTree;

/// Size of a region together with its barycenter.
///
/// Infinite regions have an infinite size and no barycenter; empty regions
/// have size zero and no barycenter.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionSizeProperties<P> {
    size: Real,
    barycenter: Option<P>,
}

impl<P> RegionSizeProperties<P> {
    pub const fn new(size: Real, barycenter: Option<P>) -> Self {
        Self { size, barycenter }
    }

    /// Properties of a region with infinite size.
    pub const fn infinite() -> Self {
        Self::new(Real::INFINITY, None)
    }

    /// Properties of an empty region.
    pub const fn zero() -> Self {
        Self::new(0.0, None)
    }

    #[inline]
    pub const fn size(&self) -> Real {
        self.size
    }

    #[inline]
    pub const fn barycenter(&self) -> Option<&P> {
        self.barycenter.as_ref()
    }
}

/// Hyperplanes whose regions know how to measure themselves.
pub trait RegionMeasure: Hyperplane {
    /// Compute the size and barycenter of `region`.
    fn region_size_properties(region: &RegionBspTree<Self>) -> RegionSizeProperties<Self::Point>;
}

impl<H: RegionMeasure> RegionBspTree<H> {
    /// Size and barycenter, cached until the next mutation.
    pub fn size_properties(&self) -> RegionSizeProperties<H::Point> {
        self.size_properties.get_or_compute(|| H::region_size_properties(self))
    }

    /// Measure of the region: length, area, or arc length depending on the space.
    pub fn size(&self) -> Real {
        self.size_properties().size()
    }

    /// Center of mass of the region, if it is finite and not empty.
    pub fn barycenter(&self) -> Option<H::Point> {
        self.size_properties().barycenter
    }

    /// True if the region has an infinite size.
    pub fn is_infinite(&self) -> bool {
        self.size().is_infinite()
    }
}
