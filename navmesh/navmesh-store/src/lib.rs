//! Read-only navigation mesh store.
//!
//! [`NavMesh`] owns a validated triangle mesh and the topology every query
//! needs: edges with their lengths and incident faces, per-vertex incident
//! faces and neighbors, and connected component labels.
//!
//! # Layer 0 Crate
//!
//! No engine dependencies. The store never mutates after construction, so a
//! single instance can serve concurrent queries.
//!
//! # Example
//!
//! ```
//! use navmesh_store::NavMesh;
//! use navmesh_types::{unit_square, Point3};
//!
//! let nav = NavMesh::from_mesh(unit_square()).unwrap();
//! assert_eq!(nav.vertex(2).unwrap(), Point3::new(1.0, 1.0, 0.0));
//! assert_eq!(nav.neighbors(1), &[0, 2]);
//! assert!(nav.same_component(0, 3).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod components;
mod error;
mod store;
mod topology;

pub use error::{ElementKind, StoreError, StoreResult};
pub use store::NavMesh;
pub use topology::Edge;
