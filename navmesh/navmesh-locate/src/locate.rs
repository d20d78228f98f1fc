//! Point-to-surface snapping.

use std::sync::Arc;

use navmesh_store::NavMesh;
use navmesh_types::{MeshTopology, Point3};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bvh::{FaceBvh, FaceHit};
use crate::config::{LocateStrategy, LocatorConfig};

/// Where a query point lands on the mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SnapResult {
    /// The original query point.
    pub query: Point3<f64>,
    /// Closest point on the mesh surface.
    pub surface_point: Point3<f64>,
    /// Face containing `surface_point`.
    pub face: u32,
    /// Mesh vertex closest to `surface_point`.
    pub vertex: u32,
    /// Position of `vertex`.
    pub vertex_position: Point3<f64>,
}

impl SnapResult {
    /// Distance from the query point to the surface.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        (self.surface_point - self.query).norm()
    }

    /// Distance from the surface point to the chosen vertex.
    #[inline]
    #[must_use]
    pub fn vertex_offset(&self) -> f64 {
        (self.vertex_position - self.surface_point).norm()
    }
}

/// Maps arbitrary 3D points to the nearest surface point and vertex.
///
/// The closest face minimizes squared distance with ties going to the
/// lowest face index; the closest vertex is measured from the surface point
/// over all vertices with ties going to the lowest vertex index. Both
/// strategies return identical results.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use navmesh_locate::Locator;
/// use navmesh_store::NavMesh;
/// use navmesh_types::{unit_square, Point3};
///
/// let nav = Arc::new(NavMesh::from_mesh(unit_square()).unwrap());
/// let locator = Locator::new(nav);
///
/// let snap = locator.locate(&Point3::new(0.9, 0.8, 1.5));
/// assert_eq!(snap.vertex, 2);
/// assert!((snap.offset() - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Locator {
    nav: Arc<NavMesh>,
    bvh: Option<FaceBvh>,
    config: LocatorConfig,
}

impl Locator {
    /// Create a locator with the default configuration (AABB tree).
    #[must_use]
    pub fn new(nav: Arc<NavMesh>) -> Self {
        Self::with_config(nav, LocatorConfig::default())
    }

    /// Create a locator with an explicit configuration.
    #[must_use]
    pub fn with_config(nav: Arc<NavMesh>, config: LocatorConfig) -> Self {
        let bvh = match config.strategy {
            LocateStrategy::AabbTree => {
                let bvh = FaceBvh::build(&nav, config.leaf_size);
                debug!(
                    faces = bvh.face_count(),
                    depth = bvh.depth(),
                    leaf_size = config.leaf_size,
                    "Built face BVH"
                );
                Some(bvh)
            }
            LocateStrategy::BruteForce => None,
        };
        Self { nav, bvh, config }
    }

    /// The mesh this locator searches.
    #[inline]
    #[must_use]
    pub const fn nav(&self) -> &Arc<NavMesh> {
        &self.nav
    }

    /// The active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Snap `point` to the mesh.
    ///
    /// Never fails: the store guarantees at least one face, and points far
    /// outside the mesh bounds snap to the nearest boundary.
    #[must_use]
    pub fn locate(&self, point: &Point3<f64>) -> SnapResult {
        let hit = self
            .nearest_face(point)
            .unwrap_or_else(|| self.fallback_hit(point));
        let vertex = self.nearest_vertex(&hit.point);
        SnapResult {
            query: *point,
            surface_point: hit.point,
            face: hit.face,
            vertex,
            vertex_position: self.nav.position(vertex),
        }
    }

    /// Closest face to `point`.
    #[must_use]
    pub fn nearest_face(&self, point: &Point3<f64>) -> Option<FaceHit> {
        match &self.bvh {
            Some(bvh) => bvh.nearest(&self.nav, point),
            None => self.scan_faces(point),
        }
    }

    /// Closest vertex to `point`, lowest index on ties.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: vertex indices are u32
    pub fn nearest_vertex(&self, point: &Point3<f64>) -> u32 {
        let mut best = 0u32;
        let mut best_d2 = f64::INFINITY;
        for (i, v) in self.nav.vertices().iter().enumerate() {
            let d2 = (v.position - point).norm_squared();
            if d2 < best_d2 {
                best = i as u32;
                best_d2 = d2;
            }
        }
        best
    }

    fn scan_faces(&self, point: &Point3<f64>) -> Option<FaceHit> {
        let mut best: Option<FaceHit> = None;
        for (face, tri) in self.nav.indexed_triangles() {
            let closest = tri.closest_point(point);
            let hit = FaceHit {
                face,
                point: closest,
                distance_squared: (closest - point).norm_squared(),
            };
            if hit.beats(best.as_ref()) {
                best = Some(hit);
            }
        }
        best
    }

    /// Face 0's first corner; only reached if every distance was NaN.
    fn fallback_hit(&self, point: &Point3<f64>) -> FaceHit {
        let corner = self.nav.faces().first().map_or(0, |f| f[0]);
        let p = self.nav.position(corner);
        FaceHit {
            face: 0,
            point: p,
            distance_squared: (p - point).norm_squared(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use navmesh_types::{unit_square, IndexedMesh, Vector3, Vertex};

    fn square_locator(strategy: LocateStrategy) -> Locator {
        let nav = Arc::new(NavMesh::from_mesh(unit_square()).unwrap());
        Locator::with_config(nav, LocatorConfig::default().with_strategy(strategy))
    }

    #[test]
    fn point_on_vertex_snaps_to_that_vertex() {
        for strategy in [LocateStrategy::BruteForce, LocateStrategy::AabbTree] {
            let locator = square_locator(strategy);
            for v in 0..4u32 {
                let p = locator.nav().position(v);
                let snap = locator.locate(&p);
                assert_eq!(snap.vertex, v);
                assert_eq!(snap.surface_point, p);
                assert!(snap.offset() < 1e-15);
            }
        }
    }

    #[test]
    fn point_above_surface_projects_down() {
        let locator = square_locator(LocateStrategy::AabbTree);
        let snap = locator.locate(&Point3::new(0.3, 0.6, 2.0));
        assert!((snap.surface_point - Point3::new(0.3, 0.6, 0.0)).norm() < 1e-12);
        assert_eq!(snap.face, 1);
        assert_eq!(snap.vertex, 3);
        assert!((snap.offset() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn far_point_snaps_to_nearest_corner() {
        for strategy in [LocateStrategy::BruteForce, LocateStrategy::AabbTree] {
            let locator = square_locator(strategy);
            let snap = locator.locate(&Point3::new(1.0e9, 1.0e9, -1.0e9));
            assert_eq!(snap.vertex, 2);
            assert_eq!(snap.surface_point, Point3::new(1.0, 1.0, 0.0));
        }
    }

    #[test]
    fn vertex_ties_prefer_lowest_index() {
        let locator = square_locator(LocateStrategy::BruteForce);
        // Center of the square is equidistant from all four corners.
        assert_eq!(locator.nearest_vertex(&Point3::new(0.5, 0.5, 0.0)), 0);
    }

    #[test]
    fn nearest_vertex_is_global() {
        // A vertex of another component lies closer than any corner of the
        // face containing the surface point.
        let mut mesh = IndexedMesh::new();
        mesh.vertices.extend(
            [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]]
                .into_iter()
                .map(Vertex::from),
        );
        let mut island = unit_square();
        island.translate(Vector3::new(4.0, 4.0, 1.0));
        mesh.faces.push([0, 1, 2]);
        mesh.merge(&island);
        let nav = Arc::new(NavMesh::from_mesh(mesh).unwrap());
        let locator = Locator::new(nav);

        let snap = locator.locate(&Point3::new(3.9, 3.9, 0.0));
        assert_eq!(snap.face, 0);
        assert_eq!(snap.vertex, 3);
    }

    #[test]
    fn strategies_agree_on_sample_points() {
        let brute = square_locator(LocateStrategy::BruteForce);
        let tree = square_locator(LocateStrategy::AabbTree);
        for i in -3..=6 {
            for j in -3..=6 {
                let p = Point3::new(f64::from(i) * 0.25, f64::from(j) * 0.25, f64::from(i - j));
                assert_eq!(brute.locate(&p), tree.locate(&p));
            }
        }
    }
}
