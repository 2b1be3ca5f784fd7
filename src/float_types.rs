// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::cmp::Ordering;
use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used across the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `BSPGEOM_TOLERANCE` (e.g. `BSPGEOM_TOLERANCE=1e-9 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// Returns the current tolerance value.
/// If not set yet, it tries `BSPGEOM_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("BSPGEOM_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `bspgeom::float_types::set_tolerance(1e-9);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

/// Epsilon based floating point comparator.
///
/// Every geometric decision in the crate (point classification, split
/// locations, interval adjacency) goes through one of these instead of raw
/// `==` / `<` on floats. Two values are considered equivalent when they are
/// identical (this covers matching infinities) or when their absolute
/// difference is at most `epsilon`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Precision {
    epsilon: Real,
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(tolerance())
    }
}

impl Precision {
    /// Create a comparator with the given absolute tolerance. Values below
    /// machine epsilon are raised to it; NaN falls back to the crate tolerance.
    pub fn new(epsilon: Real) -> Self {
        let epsilon = if epsilon.is_nan() {
            tolerance()
        } else {
            epsilon.abs().max(Real::EPSILON)
        };
        Self { epsilon }
    }

    /// The absolute tolerance of this comparator.
    #[inline]
    pub const fn epsilon(&self) -> Real {
        self.epsilon
    }

    /// Compare `a` and `b`, treating values within tolerance as equal.
    ///
    /// NaN compares as greater than everything so that sorting stays total.
    pub fn compare(&self, a: Real, b: Real) -> Ordering {
        if self.eq(a, b) {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else if a > b {
            Ordering::Greater
        } else if a.is_nan() && !b.is_nan() {
            Ordering::Greater
        } else if b.is_nan() && !a.is_nan() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    #[inline]
    pub fn eq(&self, a: Real, b: Real) -> bool {
        a == b || (a - b).abs() <= self.epsilon
    }

    #[inline]
    pub fn eq_zero(&self, a: Real) -> bool {
        self.eq(a, 0.0)
    }

    #[inline]
    pub fn lt(&self, a: Real, b: Real) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    #[inline]
    pub fn lte(&self, a: Real, b: Real) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    #[inline]
    pub fn gt(&self, a: Real, b: Real) -> bool {
        self.compare(a, b) == Ordering::Greater
    }

    #[inline]
    pub fn gte(&self, a: Real, b: Real) -> bool {
        self.compare(a, b) != Ordering::Less
    }

    /// Sign of `a` with values within tolerance of zero mapped to `0`.
    #[inline]
    pub fn signum(&self, a: Real) -> i8 {
        match self.compare(a, 0.0) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }
}
