//! Error types for the mesh store.

use navmesh_io::IoError;
use thiserror::Error;

/// Result type for mesh store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Kind of mesh element addressed by an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A vertex index.
    Vertex,
    /// A face index.
    Face,
    /// An edge index.
    Edge,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vertex => write!(f, "vertex"),
            Self::Face => write!(f, "face"),
            Self::Edge => write!(f, "edge"),
        }
    }
}

/// Errors that can occur when building or querying a [`NavMesh`](crate::NavMesh).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The mesh source could not be parsed or is structurally invalid.
    #[error("mesh format error: {0}")]
    MeshFormat(#[from] IoError),

    /// The mesh has no vertices or no faces.
    #[error("mesh is empty ({vertex_count} vertices, {face_count} faces)")]
    EmptyMesh {
        /// Number of vertices.
        vertex_count: usize,
        /// Number of faces.
        face_count: usize,
    },

    /// An element index is outside the mesh.
    #[error("{kind} index {index} out of range (mesh has {len})")]
    IndexOutOfRange {
        /// Which kind of element was addressed.
        kind: ElementKind,
        /// The offending index.
        index: usize,
        /// Number of elements of that kind.
        len: usize,
    },
}

impl StoreError {
    /// Structural error found while validating an in-memory mesh.
    #[must_use]
    pub fn invalid_mesh(message: impl Into<String>) -> Self {
        Self::MeshFormat(IoError::invalid_content(0, message))
    }

    pub(crate) const fn out_of_range(kind: ElementKind, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { kind, index, len }
    }
}
