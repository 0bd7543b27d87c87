//! Errors raised by the partial functions of the geometry library.
//!
//! Most of the library is total: degenerate inputs yield `None`, an empty
//! result list, or a documented fallback. The few functions that cannot pick
//! a meaningful fallback return a [`GeometryError`].

use thiserror::Error;

/// Failure of a geometric computation on degenerate input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A direction vector had (near) zero length.
    #[error("zero-length vector has no direction")]
    ZeroLength,

    /// A plane was described by a (near) zero normal vector.
    #[error("plane normal vector must be non-zero")]
    ZeroNormal,

    /// The input points do not span the required shape.
    #[error("degenerate input: {0}")]
    Degenerate(&'static str),
}

/// Result alias for geometry library functions.
pub type Result<T> = std::result::Result<T, GeometryError>;
