//! Error types for BSP tree and region operations

use thiserror::Error;

/// All the failures a tree or region operation may report.
///
/// Degenerate geometry (for example a cut whose trace vanishes inside its
/// cell) is *not* an error; those operations report a `false` outcome instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BspError {
    /// (InvalidArgument) A constructor received NaN, non-finite or otherwise malformed input
    #[error("(InvalidArgument) {0}")]
    InvalidArgument(String),
    /// (StructuralMisuse) The API was used on a node or tree it does not apply to
    #[error("(StructuralMisuse) {0}")]
    StructuralMisuse(String),
    /// (InconsistentRegion) The tree does not describe a consistent region of its space
    #[error("(InconsistentRegion) {0}")]
    InconsistentRegion(String),
}

/// Result alias used throughout the crate.
pub type BspResult<T> = Result<T, BspError>;
