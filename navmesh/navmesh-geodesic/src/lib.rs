//! Exact geodesic distances and paths on navigation meshes.
//!
//! The distance between two vertices is the length of the shortest path
//! that stays on the mesh surface, bending around walls and obstacles
//! instead of cutting through them.
//!
//! - [`GeodesicSolver`] - exact vertex-to-vertex paths and distance fields
//! - [`GeodesicOutcome`] / [`GeodesicPath`] - query results
//! - [`EdgeGraph`] / [`DistanceField`] - Dijkstra along mesh edges, an
//!   upper bound on the exact distance
//!
//! # Layer 0 Crate
//!
//! No engine dependencies. Solvers borrow an immutable
//! [`NavMesh`](navmesh_store::NavMesh) and can run concurrently.
//!
//! # Example
//!
//! ```
//! use navmesh_geodesic::{EdgeGraph, GeodesicSolver};
//! use navmesh_store::NavMesh;
//! use navmesh_types::unit_square;
//!
//! let nav = NavMesh::from_mesh(unit_square()).unwrap();
//!
//! let exact = GeodesicSolver::new(&nav).distance(1, 3).unwrap().unwrap();
//! let along_edges = EdgeGraph::new(&nav).distance_field(&[1]).unwrap().distance(3);
//!
//! assert!(exact < along_edges);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod distance;
mod edge_graph;
mod error;
mod exact;
mod path;
mod window;

pub use config::{SolverConfig, GEODESIC_EPSILON};
pub use distance::DistanceField;
pub use edge_graph::EdgeGraph;
pub use error::{GeodesicError, GeodesicResult};
pub use exact::GeodesicSolver;
pub use path::{GeodesicOutcome, GeodesicPath, UnreachableReason};
