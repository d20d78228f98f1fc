//! Read access shared by the raw mesh and the validated store.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::Point3;

/// Vertices and faces of a walkable surface.
///
/// Implemented by [`IndexedMesh`](crate::IndexedMesh) and by the validated
/// store, so geometry routines accept either.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangular faces.
    fn face_count(&self) -> usize;

    /// A surface without faces has nothing to walk on.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Vertex `index`, `None` if out of range.
    fn vertex(&self, index: usize) -> Option<&Vertex>;

    /// Corner indices of face `index`, `None` if out of range.
    fn face(&self, index: usize) -> Option<[u32; 3]>;

    /// Face `face_index` with resolved corner positions.
    ///
    /// `None` if the face or one of its corners is out of range.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// All vertices in index order.
    fn vertices(&self) -> impl Iterator<Item = &Vertex>;

    /// All faces in index order.
    fn faces(&self) -> impl Iterator<Item = [u32; 3]>;

    /// Resolvable faces paired with their index, skipping faces whose
    /// corners are out of range.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: face indices are u32
    fn indexed_triangles(&self) -> impl Iterator<Item = (u32, Triangle)> {
        (0..self.face_count()).filter_map(|f| self.triangle(f).map(|tri| (f as u32, tri)))
    }

    /// Total walkable area.
    fn surface_area(&self) -> f64 {
        self.indexed_triangles().map(|(_, tri)| tri.area()).sum()
    }
}

/// Types with an axis-aligned extent.
pub trait MeshBounds {
    /// Box around every vertex; empty for a mesh without vertices.
    fn bounds(&self) -> Aabb;

    /// Middle of [`bounds`](Self::bounds).
    fn center(&self) -> Point3<f64> {
        self.bounds().center()
    }
}
