//! Core geometric types for navigation meshes.
//!
//! This crate provides the foundational types shared by the navmesh crates:
//!
//! - [`Vertex`] - A point on the walkable surface
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! This crate has no rendering or engine dependencies. It can be used in:
//! - CLI tools
//! - Servers
//! - Agents that answer spatial questions about a scene
//!
//! # Units
//!
//! Coordinates are `f64` meters, as exported by Habitat-style navmesh
//! generators.
//!
//! # Coordinate System
//!
//! Right-handed, **Z up**. Walkable surfaces are mostly horizontal but the
//! types make no assumption about orientation (ramps and stairs are fine).
//!
//! # Example
//!
//! ```
//! use navmesh_types::{Vertex, IndexedMesh, Point3, MeshTopology};
//!
//! // A single walkable triangle
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::new(Point3::new(0.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(1.0, 0.0, 0.0)));
//! mesh.vertices.push(Vertex::new(Point3::new(0.5, 1.0, 0.0)));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{unit_square, IndexedMesh};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
