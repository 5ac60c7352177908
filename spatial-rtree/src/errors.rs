//! Error and result types for geometry construction and index configuration.

use thiserror::Error;

/// Errors that can occur while building geometries or configuring an index.
///
/// All of these are raised eagerly by constructors. Once a geometry or a
/// [`Context`](crate::Context) exists it is valid, so tree operations and
/// searches never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpatialError {
    /// Degenerate input: non-finite coordinates or too few distinct vertices.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Well-formed input the predicate engine cannot handle, such as a
    /// self-intersecting polygon ring.
    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),

    /// Invalid index configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for spatial operations
pub type SpatialResult<T> = Result<T, SpatialError>;
