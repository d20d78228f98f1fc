//! Error types for distance queries and their collaborators.

use navmesh_geodesic::GeodesicError;
use thiserror::Error;

/// Result type for distance queries.
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors from a single distance query.
///
/// Unreachable targets are results, not errors; see
/// [`DistanceResult`](crate::DistanceResult).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// A query point is unusable (non-finite coordinates).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver rejected the snapped vertices.
    #[error("geodesic error: {0}")]
    Geodesic(#[from] GeodesicError),
}

impl QueryError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Errors reported by a [`TextCompletion`](crate::TextCompletion) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompletionError {
    /// The backend could not produce a response.
    #[error("completion backend failed: {0}")]
    Backend(String),

    /// The backend answered with something other than text.
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}

/// Errors while rendering a path visualization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VisualizeError {
    /// The scene has no faces to draw.
    #[error("scene mesh has no faces")]
    EmptyScene,

    /// Scene data could not be encoded.
    #[error("failed to encode scene: {0}")]
    Encode(#[from] serde_json::Error),

    /// The output could not be written.
    #[error("failed to write visualization: {0}")]
    Io(#[from] std::io::Error),
}
