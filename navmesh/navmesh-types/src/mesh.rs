//! Unvalidated navmesh geometry.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A navmesh as loaded: vertex positions plus faces that name their
/// corners by vertex index.
///
/// Nothing is validated here. Walkable surfaces are usually open, may be
/// non-manifold where stairs meet floors, and often fall apart into
/// several islands.
///
/// # Example
///
/// ```
/// use navmesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// // One step of a ramp rising 0.5 m over 2 m
/// let mut ramp = IndexedMesh::with_capacity(3, 1);
/// ramp.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// ramp.vertices.push(Vertex::from_coords(2.0, 0.0, 0.5));
/// ramp.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// ramp.faces.push([0, 1, 2]);
///
/// assert_eq!(ramp.face_count(), 1);
/// assert_eq!(ramp.first_invalid_face(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertices; a vertex's position in this list is its id.
    pub vertices: Vec<Vertex>,

    /// Faces as corner ids into `vertices`.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Mesh with no vertices and no faces.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Empty mesh with room for the given counts.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Mesh from flat `x y z` positions and `i j k` face indices, the
    /// layout of the text format.
    ///
    /// An array whose length is not a multiple of 3 yields an empty mesh.
    ///
    /// # Example
    ///
    /// ```
    /// use navmesh_types::{IndexedMesh, MeshTopology};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        Self {
            vertices: positions
                .chunks_exact(3)
                .map(|xyz| Vertex::from_coords(xyz[0], xyz[1], xyz[2]))
                .collect(),
            faces: indices
                .chunks_exact(3)
                .map(|ijk| [ijk[0], ijk[1], ijk[2]])
                .collect(),
        }
    }

    /// Index of the first face that references a missing vertex.
    #[must_use]
    pub fn first_invalid_face(&self) -> Option<usize> {
        let n = self.vertices.len();
        self.faces
            .iter()
            .position(|face| face.iter().any(|&i| i as usize >= n))
    }

    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        self.vertices
            .iter_mut()
            .for_each(|v| v.position += offset);
    }

    /// Append `other` as a further island; its face indices are shifted
    /// past the existing vertices.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, so vertex counts > 4B are unsupported
    pub fn merge(&mut self, other: &Self) {
        let base = self.vertices.len() as u32;
        self.vertices.extend(other.vertices.iter().copied());
        self.faces
            .extend(other.faces.iter().map(|face| face.map(|i| i + base)));
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let corner = |i: u32| self.vertices.get(i as usize).map(|v| v.position);
        let [a, b, c] = *self.faces.get(face_index)?;
        Some(Triangle::new(corner(a)?, corner(b)?, corner(c)?))
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.faces.iter().copied()
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// A unit square on the XY plane split into two triangles.
///
/// Vertices are the corners `(0,0)`, `(1,0)`, `(1,1)`, `(0,1)` and the
/// faces are `[0, 1, 2]` and `[0, 2, 3]`.
///
/// # Example
///
/// ```
/// use navmesh_types::{unit_square, MeshTopology};
///
/// let square = unit_square();
/// assert_eq!(square.vertex_count(), 4);
/// assert_eq!(square.face_count(), 2);
/// ```
#[must_use]
pub fn unit_square() -> IndexedMesh {
    let mut mesh = IndexedMesh::with_capacity(4, 2);
    mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(1.0, 1.0, 0.0));
    mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
    mesh.faces.push([0, 1, 2]);
    mesh.faces.push([0, 2, 3]);
    mesh
}
