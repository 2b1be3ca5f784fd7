//! Region representation, **boolean operations** (*union*, *difference*,
//! *intersection*, *xor*) and point classification over spaces partitioned by
//! [BSP](bsp) trees.
//!
//! The [`bsp`] module is space-agnostic: it only needs a [`Hyperplane`] and a
//! convex [`HyperplaneSubset`] of it. The [`region`] module interprets a tree
//! as a region by marking every leaf cell inside or outside, and derives
//! boundaries, size, barycenter and closest boundary points from it.
//!
//! Spaces shipped with the crate:
//! - [`euclidean::oned`]: the real line, regions are unions of intervals
//! - [`euclidean::twod`]: the plane, regions are polygonal areas
//! - [`spherical::oned`]: the circle, regions are unions of arcs
//!
//! ```
//! use bspgeom::euclidean::{Interval, RegionBspTree1D};
//! use bspgeom::float_types::Precision;
//! use bspgeom::traits::BooleanOps;
//!
//! let precision = Precision::new(1e-9);
//! let a = Interval::new(0.0, 2.0, precision)?.to_tree()?;
//! let b = Interval::new(1.0, 3.0, precision)?.to_tree()?;
//! let overlap: RegionBspTree1D = a.intersection(&b);
//! assert!((overlap.size() - 1.0).abs() < 1e-9);
//! # Ok::<(), bspgeom::errors::BspError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod bsp;
pub mod errors;
pub mod euclidean;
pub mod float_types;
pub mod partition;
pub mod region;
pub mod spherical;
pub mod traits;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use bsp::{BspTree, NodeId};
pub use errors::{BspError, BspResult};
pub use partition::{Hyperplane, HyperplaneSubset, Split, SplitLocation};
pub use region::{RegionBspTree, RegionLocation};
pub use traits::BooleanOps;
