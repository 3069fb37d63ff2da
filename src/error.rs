//! Error types for garden planning.

use thiserror::Error;

/// Result type alias for planning operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// No strip layout exists for the requested circle geometry.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A segment is wider than a container or not positive.
    #[error("invalid segment: width {width} with container capacity {capacity}")]
    InvalidSegment { width: f64, capacity: f64 },

    /// A width would be cut into more pieces than the limit allows.
    #[error("width {width} needs {pieces} pieces, more than the limit of {limit}")]
    TooManyPieces {
        width: f64,
        pieces: usize,
        limit: usize,
    },

    #[error("invalid container capacity: {0}")]
    InvalidCapacity(f64),

    #[error("configuration error: {0}")]
    InvalidConfig(String),
}
