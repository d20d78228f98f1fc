//! Navmesh file I/O.
//!
//! Loads and saves navigation meshes in the plain-text format used by
//! Habitat-style exporters: a `<vertex_count> <face_count>` header followed
//! by one vertex per line and one triangle per line.
//!
//! # Layer 0 Crate
//!
//! No engine dependencies; usable from CLI tools and servers alike.
//!
//! # Example
//!
//! ```
//! use navmesh_io::{parse_navmesh, write_navmesh};
//! use navmesh_types::MeshTopology;
//!
//! let mesh = parse_navmesh("3 1\n0 0 0\n1 0 0\n0 1 0\n0 1 2\n").unwrap();
//! assert_eq!(mesh.face_count(), 1);
//!
//! let mut out = Vec::new();
//! write_navmesh(&mesh, &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("3 1\n"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod text;

pub use error::{IoError, IoResult};
pub use text::{load_navmesh, parse_navmesh, read_navmesh, save_navmesh, write_navmesh};
