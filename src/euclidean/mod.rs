//! Euclidean spaces

pub mod oned;
pub mod twod;

pub use oned::{Interval, OrientedPoint, OrientedPointSubset, RegionBspTree1D};
pub use twod::{Line, LineSubset, RegionBspTree2D};
