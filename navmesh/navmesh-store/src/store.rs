//! The read-only navigation mesh.

use std::path::Path;

use navmesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Triangle, Vertex};
use tracing::{debug, info};

use crate::components::label_components;
use crate::error::{ElementKind, StoreError, StoreResult};
use crate::topology::{Edge, Topology};

/// Angle excess, in radians, below which a vertex counts as flat.
const SADDLE_TOLERANCE: f64 = 1e-9;

/// A validated navigation mesh with cached topology.
///
/// Built once, then shared read-only (`&NavMesh` is `Send + Sync`) by any
/// number of concurrent queries.
///
/// # Invariants
///
/// - At least one vertex and one face.
/// - Every face index refers to an existing vertex.
/// - No face repeats a vertex index.
///
/// # Example
///
/// ```
/// use navmesh_store::NavMesh;
/// use navmesh_types::unit_square;
///
/// let nav = NavMesh::from_mesh(unit_square()).unwrap();
/// assert_eq!(nav.vertex_count(), 4);
/// assert_eq!(nav.edge_count(), 5);
/// assert_eq!(nav.component_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NavMesh {
    mesh: IndexedMesh,
    topology: Topology,
    components: Vec<u32>,
    component_count: usize,
    bounds: Aabb,
}

impl NavMesh {
    /// Load and validate a navmesh file.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MeshFormat`] if the file cannot be read or parsed
    /// - [`StoreError::EmptyMesh`] if it holds no vertices or no faces
    pub fn load<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let mesh = navmesh_io::load_navmesh(path)?;
        let nav = Self::from_mesh(mesh)?;
        info!(
            path = %path.display(),
            vertices = nav.vertex_count(),
            faces = nav.face_count(),
            edges = nav.edge_count(),
            components = nav.component_count,
            "Loaded navmesh"
        );
        Ok(nav)
    }

    /// Validate an in-memory mesh and build its topology.
    ///
    /// # Errors
    ///
    /// - [`StoreError::EmptyMesh`] if the mesh has no vertices or no faces
    /// - [`StoreError::MeshFormat`] if a face index is out of range, a face
    ///   repeats a vertex, or a coordinate is not finite
    pub fn from_mesh(mesh: IndexedMesh) -> StoreResult<Self> {
        if mesh.vertices.is_empty() || mesh.faces.is_empty() {
            return Err(StoreError::EmptyMesh {
                vertex_count: mesh.vertices.len(),
                face_count: mesh.faces.len(),
            });
        }
        validate(&mesh)?;

        let topology = Topology::build(&mesh.vertices, &mesh.faces);
        let (components, component_count) = label_components(mesh.vertices.len(), &mesh.faces);
        let bounds = mesh.bounds();

        debug!(
            boundary_edges = topology.edges.iter().filter(|e| e.is_boundary()).count(),
            non_manifold_edges = topology.edges.iter().filter(|e| e.is_non_manifold()).count(),
            components = component_count,
            "Built navmesh topology"
        );

        Ok(Self {
            mesh,
            topology,
            components,
            component_count,
            bounds,
        })
    }

    /// The underlying indexed mesh.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.mesh.faces.len()
    }

    /// Number of distinct edges.
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.topology.edges.len()
    }

    /// Position of vertex `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] for an invalid index.
    pub fn vertex(&self, index: usize) -> StoreResult<Point3<f64>> {
        self.mesh
            .vertices
            .get(index)
            .map(|v| v.position)
            .ok_or_else(|| StoreError::out_of_range(ElementKind::Vertex, index, self.vertex_count()))
    }

    /// Vertex indices of face `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] for an invalid index.
    pub fn face(&self, index: usize) -> StoreResult<[u32; 3]> {
        self.mesh
            .faces
            .get(index)
            .copied()
            .ok_or_else(|| StoreError::out_of_range(ElementKind::Face, index, self.face_count()))
    }

    /// Resolved triangle of face `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] for an invalid index.
    pub fn triangle(&self, index: usize) -> StoreResult<Triangle> {
        self.mesh
            .triangle(index)
            .ok_or_else(|| StoreError::out_of_range(ElementKind::Face, index, self.face_count()))
    }

    /// Edge `index`.
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] for an invalid index.
    pub fn edge(&self, index: usize) -> StoreResult<&Edge> {
        self.topology
            .edges
            .get(index)
            .ok_or_else(|| StoreError::out_of_range(ElementKind::Edge, index, self.edge_count()))
    }

    /// Position of a vertex known to be valid.
    ///
    /// Intended for indices obtained from this mesh (faces, edges,
    /// neighbors). Panics on an out-of-range index.
    #[inline]
    #[must_use]
    pub fn position(&self, vertex: u32) -> Point3<f64> {
        self.mesh.vertices[vertex as usize].position
    }

    /// All vertices.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.mesh.vertices
    }

    /// All faces.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.mesh.faces
    }

    /// All edges.
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.topology.edges
    }

    /// Edge ids of a face; entry `k` joins corners `k` and `(k + 1) % 3`.
    #[must_use]
    pub fn face_edges(&self, face: u32) -> Option<[u32; 3]> {
        self.topology.face_edges.get(face as usize).copied()
    }

    /// Id of the edge joining `a` and `b`, if any.
    #[must_use]
    pub fn find_edge(&self, a: u32, b: u32) -> Option<u32> {
        self.topology.find_edge(a, b)
    }

    /// Faces incident to a vertex (empty for an invalid index).
    #[must_use]
    pub fn vertex_faces(&self, vertex: u32) -> &[u32] {
        self.topology
            .vertex_faces
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Edges incident to a vertex (empty for an invalid index).
    #[must_use]
    pub fn vertex_edges(&self, vertex: u32) -> &[u32] {
        self.topology
            .vertex_edges
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// Vertices sharing an edge with `vertex`, ascending.
    #[must_use]
    pub fn neighbors(&self, vertex: u32) -> &[u32] {
        self.topology
            .neighbors
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    /// The corner of `face` that is not an endpoint of `edge`.
    #[must_use]
    pub fn opposite_vertex(&self, face: u32, edge: u32) -> Option<u32> {
        let corners = self.mesh.faces.get(face as usize)?;
        let [a, b] = self.topology.edges.get(edge as usize)?.vertices;
        corners.iter().copied().find(|&v| v != a && v != b)
    }

    /// Whether a vertex lies on a boundary or non-manifold edge.
    #[must_use]
    pub fn is_boundary_vertex(&self, vertex: u32) -> bool {
        self.vertex_edges(vertex).iter().any(|&e| {
            let edge = &self.topology.edges[e as usize];
            edge.is_boundary() || edge.is_non_manifold()
        })
    }

    /// Sum of the corner angles at `vertex` over its incident faces.
    ///
    /// `2π` for an interior vertex of a flat region, less at the tip of a
    /// cone, more at a saddle.
    #[must_use]
    pub fn angle_sum(&self, vertex: u32) -> f64 {
        let Some(apex) = self.mesh.vertices.get(vertex as usize).map(|v| v.position) else {
            return 0.0;
        };
        self.vertex_faces(vertex)
            .iter()
            .filter_map(|&f| self.mesh.faces.get(f as usize))
            .map(|corners| {
                let mut spokes = corners
                    .iter()
                    .filter(|&&v| v != vertex)
                    .map(|&v| self.position(v) - apex);
                match (spokes.next(), spokes.next()) {
                    (Some(u), Some(w)) => u.angle(&w),
                    _ => 0.0,
                }
            })
            .sum()
    }

    /// Whether an interior vertex has more than `2π` of surface around it.
    ///
    /// Shortest paths across the interior can only bend at such vertices.
    #[must_use]
    pub fn is_saddle_vertex(&self, vertex: u32) -> bool {
        !self.is_boundary_vertex(vertex)
            && self.angle_sum(vertex) > std::f64::consts::TAU + SADDLE_TOLERANCE
    }

    /// Connected component id of a vertex.
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] for an invalid index.
    pub fn component_of(&self, vertex: usize) -> StoreResult<u32> {
        self.components
            .get(vertex)
            .copied()
            .ok_or_else(|| StoreError::out_of_range(ElementKind::Vertex, vertex, self.vertex_count()))
    }

    /// Number of connected components (isolated vertices count as one each).
    #[inline]
    #[must_use]
    pub const fn component_count(&self) -> usize {
        self.component_count
    }

    /// Whether two vertices are connected through faces.
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] if either index is invalid.
    pub fn same_component(&self, a: usize, b: usize) -> StoreResult<bool> {
        Ok(self.component_of(a)? == self.component_of(b)?)
    }

    /// Bounding box of all vertices.
    #[inline]
    #[must_use]
    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }
}

impl MeshTopology for NavMesh {
    fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    fn face_count(&self) -> usize {
        self.mesh.faces.len()
    }

    fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.mesh.vertices.get(index)
    }

    fn face(&self, index: usize) -> Option<[u32; 3]> {
        self.mesh.faces.get(index).copied()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        self.mesh.triangle(face_index)
    }

    fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.mesh.vertices.iter()
    }

    fn faces(&self) -> impl Iterator<Item = [u32; 3]> {
        self.mesh.faces.iter().copied()
    }
}

impl MeshBounds for NavMesh {
    fn bounds(&self) -> Aabb {
        self.bounds
    }
}

fn validate(mesh: &IndexedMesh) -> StoreResult<()> {
    if let Some(v) = mesh.vertices.iter().position(|v| !v.is_finite()) {
        return Err(StoreError::invalid_mesh(format!(
            "vertex {v} has a non-finite coordinate"
        )));
    }
    let n = mesh.vertices.len();
    for (f, face) in mesh.faces.iter().enumerate() {
        if let Some(&bad) = face.iter().find(|&&i| i as usize >= n) {
            return Err(StoreError::invalid_mesh(format!(
                "face {f} references vertex {bad} but the mesh has {n} vertices"
            )));
        }
        let [a, b, c] = *face;
        if a == b || b == c || a == c {
            return Err(StoreError::invalid_mesh(format!(
                "face {f} repeats a vertex: [{a}, {b}, {c}]"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use navmesh_io::IoError;
    use navmesh_types::{unit_square, Vector3};

    fn two_squares() -> IndexedMesh {
        let mut mesh = unit_square();
        let mut other = unit_square();
        other.translate(Vector3::new(3.0, 0.0, 0.0));
        mesh.merge(&other);
        mesh
    }

    #[test]
    fn empty_mesh_is_rejected() {
        let err = NavMesh::from_mesh(IndexedMesh::new()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::EmptyMesh {
                vertex_count: 0,
                face_count: 0
            }
        ));

        let mut no_faces = unit_square();
        no_faces.faces.clear();
        assert!(matches!(
            NavMesh::from_mesh(no_faces),
            Err(StoreError::EmptyMesh { face_count: 0, .. })
        ));
    }

    #[test]
    fn out_of_range_face_is_format_error() {
        let mut mesh = unit_square();
        mesh.faces.push([1, 2, 7]);
        let err = NavMesh::from_mesh(mesh).unwrap_err();
        assert!(matches!(err, StoreError::MeshFormat(IoError::InvalidContent { .. })));
        assert!(err.to_string().contains("vertex 7"));
    }

    #[test]
    fn repeated_corner_is_format_error() {
        let mut mesh = unit_square();
        mesh.faces.push([1, 1, 2]);
        assert!(matches!(NavMesh::from_mesh(mesh), Err(StoreError::MeshFormat(_))));
    }

    #[test]
    fn accessors_check_bounds() {
        let nav = NavMesh::from_mesh(unit_square()).unwrap();
        assert_eq!(nav.vertex(2).unwrap(), Point3::new(1.0, 1.0, 0.0));
        assert_eq!(nav.face(1).unwrap(), [0, 2, 3]);
        assert!(matches!(
            nav.vertex(4),
            Err(StoreError::IndexOutOfRange {
                kind: ElementKind::Vertex,
                index: 4,
                len: 4
            })
        ));
        assert!(matches!(
            nav.face(2),
            Err(StoreError::IndexOutOfRange {
                kind: ElementKind::Face,
                ..
            })
        ));
        assert!(nav.edge(5).is_err());
        assert!(nav.vertex_faces(99).is_empty());
    }

    #[test]
    fn opposite_vertex_in_face() {
        let nav = NavMesh::from_mesh(unit_square()).unwrap();
        let diagonal = nav.find_edge(0, 2).unwrap();
        assert_eq!(nav.opposite_vertex(0, diagonal), Some(1));
        assert_eq!(nav.opposite_vertex(1, diagonal), Some(3));
    }

    #[test]
    fn components_of_disjoint_squares() {
        let nav = NavMesh::from_mesh(two_squares()).unwrap();
        assert_eq!(nav.component_count(), 2);
        assert!(nav.same_component(0, 3).unwrap());
        assert!(!nav.same_component(0, 4).unwrap());
        assert_eq!(nav.component_of(6).unwrap(), 1);
        assert!(nav.component_of(8).is_err());
    }

    #[test]
    fn isolated_vertex_is_its_own_component() {
        let mut mesh = unit_square();
        mesh.vertices.push(Vertex::from_coords(9.0, 9.0, 0.0));
        let nav = NavMesh::from_mesh(mesh).unwrap();
        assert_eq!(nav.component_count(), 2);
        assert!(nav.neighbors(4).is_empty());
        assert!(!nav.same_component(4, 0).unwrap());
    }

    #[test]
    fn boundary_vertices() {
        let nav = NavMesh::from_mesh(unit_square()).unwrap();
        assert!((0..4).all(|v| nav.is_boundary_vertex(v)));
    }

    /// Hub vertex 0 fanned by four faces over a ring at heights `lift`.
    fn fan(lift: [f64; 4]) -> NavMesh {
        let mesh = IndexedMesh::from_raw(
            &[
                0.0, 0.0, 0.0, 1.0, 0.0, lift[0], 0.0, 1.0, lift[1], //
                -1.0, 0.0, lift[2], 0.0, -1.0, lift[3],
            ],
            &[0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1],
        );
        NavMesh::from_mesh(mesh).unwrap()
    }

    #[test]
    fn angle_sum_classifies_hub() {
        use std::f64::consts::TAU;

        let flat = fan([0.0; 4]);
        assert!((flat.angle_sum(0) - TAU).abs() < 1e-12);
        assert!(!flat.is_boundary_vertex(0));
        assert!(!flat.is_saddle_vertex(0));

        let cone = fan([-0.5; 4]);
        assert!(cone.angle_sum(0) < TAU);
        assert!(!cone.is_saddle_vertex(0));

        let saddle = fan([0.5, -0.5, 0.5, -0.5]);
        assert!(saddle.angle_sum(0) > TAU + 0.1);
        assert!(saddle.is_saddle_vertex(0));

        // Ring vertices sit on the boundary
        assert!(saddle.is_boundary_vertex(1));
        assert!(!saddle.is_saddle_vertex(1));
        assert!(saddle.angle_sum(99).abs() < f64::EPSILON);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.txt");
        std::fs::write(&path, "4 2\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n0 1 2\n0 2 3\n").unwrap();
        let nav = NavMesh::load(&path).unwrap();
        assert_eq!(nav.face_count(), 2);
        assert!((nav.bounds().max.x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_missing_file_is_format_error() {
        let err = NavMesh::load("definitely_missing_navmesh.txt").unwrap_err();
        assert!(matches!(err, StoreError::MeshFormat(IoError::FileNotFound { .. })));
    }

    #[test]
    fn load_header_only_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::write(&path, "0 0\n").unwrap();
        assert!(matches!(NavMesh::load(&path), Err(StoreError::EmptyMesh { .. })));
    }
}
