//! The distance query service.

use std::sync::Arc;

use navmesh_geodesic::{GeodesicOutcome, GeodesicSolver};
use navmesh_locate::Locator;
use navmesh_store::NavMesh;
use navmesh_types::Point3;
use rayon::prelude::*;
use tracing::info;

use crate::config::QueryConfig;
use crate::error::{QueryError, QueryResult};
use crate::result::{DistanceResult, Route};

/// Answers distance questions between arbitrary 3D points.
///
/// Straight-line distance ignores the mesh. Navigable distance snaps both
/// points to their closest mesh vertices and measures the geodesic between
/// them. The service has no side effects; visualization is left to callers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use navmesh_query::DistanceQueryService;
/// use navmesh_store::NavMesh;
/// use navmesh_types::{unit_square, Point3};
///
/// let nav = Arc::new(NavMesh::from_mesh(unit_square()).unwrap());
/// let service = DistanceQueryService::new(nav);
///
/// let result = service
///     .navigable_distance(&Point3::new(1.1, -0.1, 0.0), &Point3::new(0.0, 1.0, 0.3))
///     .unwrap();
/// assert!((result.distance().unwrap() - 2.0_f64.sqrt()).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct DistanceQueryService {
    locator: Locator,
    config: QueryConfig,
}

impl DistanceQueryService {
    /// Create a service with default configuration.
    #[must_use]
    pub fn new(nav: Arc<NavMesh>) -> Self {
        Self::with_config(nav, QueryConfig::default())
    }

    /// Create a service with the given configuration.
    #[must_use]
    pub fn with_config(nav: Arc<NavMesh>, config: QueryConfig) -> Self {
        Self {
            locator: Locator::with_config(nav, config.locator),
            config,
        }
    }

    /// The mesh queries run on.
    #[must_use]
    pub fn nav(&self) -> &Arc<NavMesh> {
        self.locator.nav()
    }

    /// The locator used for snapping.
    #[must_use]
    pub const fn locator(&self) -> &Locator {
        &self.locator
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Euclidean distance between two points.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidInput`] for non-finite coordinates.
    pub fn straight_line_distance(&self, start: &Point3<f64>, goal: &Point3<f64>) -> QueryResult<f64> {
        check_finite("start", start)?;
        check_finite("goal", goal)?;
        Ok((goal - start).norm())
    }

    /// Surface distance between the mesh vertices closest to two points.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidInput`] for non-finite coordinates.
    pub fn navigable_distance(
        &self,
        start: &Point3<f64>,
        goal: &Point3<f64>,
    ) -> QueryResult<DistanceResult> {
        check_finite("start", start)?;
        check_finite("goal", goal)?;

        let start_snap = self.locator.locate(start);
        let goal_snap = self.locator.locate(goal);

        let solver = GeodesicSolver::with_config(self.nav(), self.config.solver);
        let outcome =
            solver.shortest_path(start_snap.vertex as usize, goal_snap.vertex as usize)?;

        let result = match outcome {
            GeodesicOutcome::Reachable(path) => DistanceResult::Navigable(Route {
                distance: path.length,
                path,
                start: start_snap,
                goal: goal_snap,
            }),
            GeodesicOutcome::Unreachable(reason) => DistanceResult::Unreachable(reason),
        };

        info!(
            start_vertex = start_snap.vertex,
            goal_vertex = goal_snap.vertex,
            distance = ?result.distance(),
            "Navigable distance query"
        );
        Ok(result)
    }

    /// Run [`navigable_distance`](Self::navigable_distance) for many pairs in
    /// parallel. Results keep the input order.
    #[must_use]
    pub fn navigable_distances(
        &self,
        pairs: &[(Point3<f64>, Point3<f64>)],
    ) -> Vec<QueryResult<DistanceResult>> {
        pairs
            .par_iter()
            .map(|(start, goal)| self.navigable_distance(start, goal))
            .collect()
    }
}

fn check_finite(name: &str, point: &Point3<f64>) -> QueryResult<()> {
    if point.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(QueryError::invalid_input(format!(
            "{name} point has non-finite coordinates: ({}, {}, {})",
            point.x, point.y, point.z
        )))
    }
}
