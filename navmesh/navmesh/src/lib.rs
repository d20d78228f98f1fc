//! Navigable distance engine for triangle navigation meshes.
//!
//! This umbrella crate re-exports all navmesh-* crates, providing a unified
//! API for answering "how far is it on foot from here to there?" against a
//! walkable surface. All crates are Layer 0 (no engine or rendering
//! dependencies).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use navmesh::prelude::*;
//!
//! // Load and validate the walkable surface
//! let nav = Arc::new(NavMesh::load("scene.navmesh").unwrap());
//!
//! // Ask for the walking distance between two points
//! let service = DistanceQueryService::new(nav);
//! let result = service
//!     .navigable_distance(&Point3::new(0.0, 0.0, 0.0), &Point3::new(4.0, 3.0, 0.0))
//!     .unwrap();
//!
//! println!("{}", result.message());
//! ```
//!
//! # Module Organization
//!
//! ## Foundation
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`
//! - [`io`] - The whitespace-separated navmesh text format
//! - [`store`] - Validated read-only mesh with edge and component topology
//!
//! ## Geometry
//! - [`locate`] - Snapping arbitrary points to the surface and a vertex
//! - [`geodesic`] - Exact surface shortest paths and edge-graph distance fields
//!
//! ## Queries
//! - [`query`] - Distance queries, coordinate extraction, visualization and
//!   the text responder

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `Triangle`, `Aabb`.
pub use navmesh_types as types;

/// Navmesh text format reader and writer.
pub use navmesh_io as io;

/// Validated, read-only navigation mesh.
pub use navmesh_store as store;

/// Nearest-surface and nearest-vertex lookup.
pub use navmesh_locate as locate;

/// Exact geodesic shortest paths.
pub use navmesh_geodesic as geodesic;

/// Distance queries and text front ends.
pub use navmesh_query as query;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for distance queries.
///
/// This module re-exports the most commonly used types and traits.
///
/// # Usage
///
/// ```
/// use navmesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use navmesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Triangle, Vertex};

    // I/O
    pub use navmesh_io::{load_navmesh, save_navmesh};

    // Store
    pub use navmesh_store::NavMesh;

    // Locate
    pub use navmesh_locate::{Locator, SnapResult};

    // Geodesic
    pub use navmesh_geodesic::{GeodesicOutcome, GeodesicPath, GeodesicSolver};

    // Queries
    pub use navmesh_query::{
        CoordinateExtractor, DistanceQueryService, DistanceResult, HtmlVisualizer,
        NavigationResponder, TextCompletion,
    };
}

// =============================================================================
// Tests
// =============================================================================
