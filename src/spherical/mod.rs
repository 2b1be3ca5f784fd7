//! Spherical spaces

pub mod oned;

pub use oned::{AngularInterval, CutAngle, CutAngleSubset, Point1S, RegionBspTree1S};
