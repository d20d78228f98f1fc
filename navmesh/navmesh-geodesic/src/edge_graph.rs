//! Shortest paths restricted to mesh edges.
//!
//! Edge-graph distances are an upper bound on surface geodesic distances
//! and are cheap to compute, which makes them useful for pruning and as a
//! reference in tests.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use navmesh_store::NavMesh;

use crate::distance::DistanceField;
use crate::error::{GeodesicError, GeodesicResult};

/// Dijkstra over the mesh edge graph.
///
/// # Example
///
/// ```
/// use navmesh_geodesic::EdgeGraph;
/// use navmesh_store::NavMesh;
/// use navmesh_types::unit_square;
///
/// let nav = NavMesh::from_mesh(unit_square()).unwrap();
/// let field = EdgeGraph::new(&nav).distance_field(&[1]).unwrap();
/// // 1 -> 0 -> 3 or 1 -> 2 -> 3; the diagonal joins 0 and 2 only
/// assert!((field.distance(3) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EdgeGraph<'a> {
    nav: &'a NavMesh,
}

#[derive(Debug, Clone, Copy)]
struct State {
    vertex: u32,
    distance: f64,
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; lower vertex first on equal distance
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl<'a> EdgeGraph<'a> {
    /// Wrap a navigation mesh.
    #[must_use]
    pub const fn new(nav: &'a NavMesh) -> Self {
        Self { nav }
    }

    /// Distances from the nearest of `sources` to every vertex.
    ///
    /// # Errors
    ///
    /// [`GeodesicError::InvalidVertexIndex`] if any source is out of range.
    pub fn distance_field(&self, sources: &[usize]) -> GeodesicResult<DistanceField> {
        self.distance_field_with_cutoff(sources, f64::INFINITY)
    }

    /// Like [`distance_field`](Self::distance_field), leaving vertices farther
    /// than `max_distance` unreachable.
    ///
    /// # Errors
    ///
    /// [`GeodesicError::InvalidVertexIndex`] if any source is out of range.
    pub fn distance_field_with_cutoff(
        &self,
        sources: &[usize],
        max_distance: f64,
    ) -> GeodesicResult<DistanceField> {
        let (distances, _) = self.run(sources, max_distance)?;
        Ok(DistanceField::from_distances(distances))
    }

    /// Vertex sequence of a shortest edge path, or `None` if unreachable.
    ///
    /// # Errors
    ///
    /// [`GeodesicError::InvalidVertexIndex`] if either vertex is out of range.
    pub fn vertex_path(&self, source: usize, target: usize) -> GeodesicResult<Option<Vec<u32>>> {
        self.check(target)?;
        let (distances, previous) = self.run(&[source], f64::INFINITY)?;
        if !distances[target].is_finite() {
            return Ok(None);
        }

        #[allow(clippy::cast_possible_truncation)]
        // Truncation: vertex indices are u32, meshes with >4B vertices unsupported
        let mut path = vec![target as u32];
        let mut current = target;
        while let Some(prev) = previous[current] {
            path.push(prev);
            current = prev as usize;
        }
        path.reverse();
        Ok(Some(path))
    }

    fn check(&self, vertex: usize) -> GeodesicResult<()> {
        let vertex_count = self.nav.vertex_count();
        if vertex < vertex_count {
            Ok(())
        } else {
            Err(GeodesicError::InvalidVertexIndex {
                index: vertex,
                vertex_count,
            })
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32, meshes with >4B vertices unsupported
    fn run(
        &self,
        sources: &[usize],
        max_distance: f64,
    ) -> GeodesicResult<(Vec<f64>, Vec<Option<u32>>)> {
        for &source in sources {
            self.check(source)?;
        }

        let vertex_count = self.nav.vertex_count();
        let mut distances = vec![f64::INFINITY; vertex_count];
        let mut previous = vec![None; vertex_count];
        let mut heap = BinaryHeap::with_capacity(vertex_count);

        for &source in sources {
            distances[source] = 0.0;
            heap.push(State {
                vertex: source as u32,
                distance: 0.0,
            });
        }

        while let Some(State { vertex, distance }) = heap.pop() {
            if distance > distances[vertex as usize] {
                continue;
            }

            for &edge_id in self.nav.vertex_edges(vertex) {
                let edge = &self.nav.edges()[edge_id as usize];
                let Some(neighbor) = edge.other_vertex(vertex) else {
                    continue;
                };
                let next = distance + edge.length;
                if next <= max_distance && next < distances[neighbor as usize] {
                    distances[neighbor as usize] = next;
                    previous[neighbor as usize] = Some(vertex);
                    heap.push(State {
                        vertex: neighbor,
                        distance: next,
                    });
                }
            }
        }

        Ok((distances, previous))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use navmesh_types::{unit_square, IndexedMesh, Vertex};

    fn square() -> NavMesh {
        NavMesh::from_mesh(unit_square()).unwrap()
    }

    #[test]
    fn single_source() {
        let nav = square();
        let field = EdgeGraph::new(&nav).distance_field(&[0]).unwrap();

        assert_eq!(field.reachable_count(), 4);
        assert!(field.distance(0) < 1e-10);
        assert!((field.distance(1) - 1.0).abs() < 1e-10);
        assert!((field.distance(2) - 2.0_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn multi_source() {
        let nav = square();
        let field = EdgeGraph::new(&nav).distance_field(&[1, 3]).unwrap();

        assert!(field.distance(1) < 1e-10);
        assert!(field.distance(3) < 1e-10);
        assert!((field.distance(0) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn cutoff() {
        let nav = square();
        let field = EdgeGraph::new(&nav)
            .distance_field_with_cutoff(&[0], 0.5)
            .unwrap();

        assert_eq!(field.reachable_count(), 1);
    }

    #[test]
    fn vertex_path_follows_edges() {
        let nav = square();
        let path = EdgeGraph::new(&nav).vertex_path(1, 3).unwrap().unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path[0], 1);
        assert_eq!(path[2], 3);
    }

    #[test]
    fn unreachable_vertex() {
        let mut mesh = unit_square();
        mesh.vertices.push(Vertex::from_coords(9.0, 9.0, 0.0));
        let nav = NavMesh::from_mesh(mesh).unwrap();
        let graph = EdgeGraph::new(&nav);

        assert!(graph.vertex_path(0, 4).unwrap().is_none());
        assert!(graph.distance_field(&[0]).unwrap().distance(4).is_infinite());
    }

    #[test]
    fn invalid_source() {
        let nav = square();
        let err = EdgeGraph::new(&nav).distance_field(&[7]).unwrap_err();
        assert_eq!(
            err,
            GeodesicError::InvalidVertexIndex {
                index: 7,
                vertex_count: 4
            }
        );
    }

    #[test]
    fn empty_sources() {
        let nav = NavMesh::from_mesh(IndexedMesh::from_raw(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[0, 1, 2],
        ))
        .unwrap();
        let field = EdgeGraph::new(&nav).distance_field(&[]).unwrap();
        assert_eq!(field.unreachable_count(), 3);
    }
}
