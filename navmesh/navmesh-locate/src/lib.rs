//! Nearest-surface locator for navigation meshes.
//!
//! Snaps arbitrary 3D points (object positions, often off the walkable
//! surface) to the closest point on the mesh and to the closest mesh vertex,
//! which is what the geodesic solver starts and ends at.
//!
//! - [`Locator`] - the query entry point
//! - [`SnapResult`] - where a point lands
//! - [`LocatorConfig`] / [`LocateStrategy`] - brute force or AABB tree
//! - [`FaceBvh`] - bounding volume hierarchy over faces
//!
//! # Layer 0 Crate
//!
//! No engine dependencies.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use navmesh_locate::Locator;
//! use navmesh_store::NavMesh;
//! use navmesh_types::{unit_square, Point3};
//!
//! let nav = Arc::new(NavMesh::from_mesh(unit_square()).unwrap());
//! let snap = Locator::new(nav).locate(&Point3::new(2.0, 0.5, 0.0));
//! assert_eq!(snap.surface_point, Point3::new(1.0, 0.5, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bvh;
mod config;
mod locate;

pub use bvh::{FaceBvh, FaceHit};
pub use config::{LocateStrategy, LocatorConfig};
pub use locate::{Locator, SnapResult};
