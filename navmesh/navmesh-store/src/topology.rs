//! Cached edge and incidence tables.

use hashbrown::HashMap;
use navmesh_types::Vertex;
use smallvec::SmallVec;

/// An undirected mesh edge.
///
/// Endpoints are stored with `vertices[0] < vertices[1]`. Faces are listed
/// in ascending index order: one face for a boundary edge, two for an
/// interior edge, more for a non-manifold edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Endpoint vertex indices, ascending.
    pub vertices: [u32; 2],
    /// Euclidean length.
    pub length: f64,
    /// Incident faces, ascending.
    pub faces: SmallVec<[u32; 2]>,
}

impl Edge {
    /// Whether exactly one face uses this edge.
    #[inline]
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.faces.len() == 1
    }

    /// Whether more than two faces use this edge.
    #[inline]
    #[must_use]
    pub fn is_non_manifold(&self) -> bool {
        self.faces.len() > 2
    }

    /// The endpoint that is not `v`, or `None` if `v` is not an endpoint.
    #[must_use]
    pub fn other_vertex(&self, v: u32) -> Option<u32> {
        match self.vertices {
            [a, b] if a == v => Some(b),
            [a, b] if b == v => Some(a),
            _ => None,
        }
    }
}

#[inline]
const fn normalize_edge(v0: u32, v1: u32) -> (u32, u32) {
    if v0 < v1 { (v0, v1) } else { (v1, v0) }
}

/// Incidence tables derived once from validated faces.
#[derive(Debug, Clone)]
pub(crate) struct Topology {
    pub edges: Vec<Edge>,
    pub edge_lookup: HashMap<(u32, u32), u32>,
    /// `face_edges[f][k]` joins `face[k]` and `face[(k + 1) % 3]`.
    pub face_edges: Vec<[u32; 3]>,
    pub vertex_faces: Vec<Vec<u32>>,
    pub vertex_edges: Vec<Vec<u32>>,
    /// Shared-edge neighbors, ascending.
    pub neighbors: Vec<Vec<u32>>,
}

impl Topology {
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: face and edge counts are bounded by u32 vertex indexing
    pub fn build(vertices: &[Vertex], faces: &[[u32; 3]]) -> Self {
        let n = vertices.len();
        let mut edges: Vec<Edge> = Vec::with_capacity(faces.len() * 3 / 2 + 1);
        let mut edge_lookup: HashMap<(u32, u32), u32> = HashMap::with_capacity(edges.capacity());
        let mut face_edges = Vec::with_capacity(faces.len());
        let mut vertex_faces: Vec<Vec<u32>> = vec![Vec::new(); n];

        for (f, face) in faces.iter().enumerate() {
            let f = f as u32;
            let mut ids = [0u32; 3];
            for k in 0..3 {
                let (a, b) = normalize_edge(face[k], face[(k + 1) % 3]);
                let id = *edge_lookup.entry((a, b)).or_insert_with(|| {
                    let length = (vertices[b as usize].position - vertices[a as usize].position).norm();
                    edges.push(Edge {
                        vertices: [a, b],
                        length,
                        faces: SmallVec::new(),
                    });
                    (edges.len() - 1) as u32
                });
                edges[id as usize].faces.push(f);
                ids[k] = id;
                vertex_faces[face[k] as usize].push(f);
            }
            face_edges.push(ids);
        }

        let mut vertex_edges: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut neighbors: Vec<Vec<u32>> = vec![Vec::new(); n];
        for (e, edge) in edges.iter().enumerate() {
            let [a, b] = edge.vertices;
            vertex_edges[a as usize].push(e as u32);
            vertex_edges[b as usize].push(e as u32);
            neighbors[a as usize].push(b);
            neighbors[b as usize].push(a);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Self {
            edges,
            edge_lookup,
            face_edges,
            vertex_faces,
            vertex_edges,
            neighbors,
        }
    }

    pub fn find_edge(&self, a: u32, b: u32) -> Option<u32> {
        self.edge_lookup.get(&normalize_edge(a, b)).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use navmesh_types::unit_square;

    #[test]
    fn square_topology() {
        let square = unit_square();
        let topo = Topology::build(&square.vertices, &square.faces);

        assert_eq!(topo.edges.len(), 5);
        let diagonal = topo.find_edge(2, 0).unwrap();
        let diag = &topo.edges[diagonal as usize];
        assert_eq!(diag.vertices, [0, 2]);
        assert_eq!(diag.faces.as_slice(), &[0, 1]);
        assert!((diag.length - 2.0_f64.sqrt()).abs() < 1e-12);

        let boundary = topo.edges.iter().filter(|e| e.is_boundary()).count();
        assert_eq!(boundary, 4);

        assert_eq!(topo.neighbors[0], vec![1, 2, 3]);
        assert_eq!(topo.neighbors[1], vec![0, 2]);
        assert_eq!(topo.vertex_faces[0], vec![0, 1]);
    }

    #[test]
    fn face_edges_follow_winding() {
        let square = unit_square();
        let topo = Topology::build(&square.vertices, &square.faces);
        let [e01, e12, e20] = topo.face_edges[0];
        assert_eq!(topo.edges[e01 as usize].vertices, [0, 1]);
        assert_eq!(topo.edges[e12 as usize].vertices, [1, 2]);
        assert_eq!(topo.edges[e20 as usize].vertices, [0, 2]);
    }

    #[test]
    fn non_manifold_edge() {
        let vertices: Vec<Vertex> = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.5, 1.0, 0.0],
            [0.5, -1.0, 0.0],
            [0.5, 0.0, 1.0],
        ]
        .into_iter()
        .map(Vertex::from)
        .collect();
        let faces = [[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        let topo = Topology::build(&vertices, &faces);
        let shared = &topo.edges[topo.find_edge(0, 1).unwrap() as usize];
        assert!(shared.is_non_manifold());
        assert_eq!(shared.other_vertex(0), Some(1));
        assert_eq!(shared.other_vertex(4), None);
    }
}
