//! Distance queries between arbitrary 3D points on a navigation mesh.
//!
//! - [`DistanceQueryService`] - straight-line and navigable distances
//! - [`DistanceResult`] / [`Route`] - query outcomes and their answers
//! - [`CoordinateExtractor`] / [`TextCompletion`] - reading positions out
//!   of natural language through an injected completion backend
//! - [`PathVisualizer`] / [`HtmlVisualizer`] - rendering routes
//! - [`NavigationResponder`] - text in, text out
//!
//! # Layer 0 Crate
//!
//! No engine dependencies. The completion backend and the visualizer are
//! trait objects supplied by the caller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use navmesh_query::{CoordinateExtractor, CompletionError, DistanceQueryService, NavigationResponder, TextCompletion};
//! use navmesh_store::NavMesh;
//! use navmesh_types::unit_square;
//!
//! let nav = Arc::new(NavMesh::from_mesh(unit_square()).unwrap());
//! let service = Arc::new(DistanceQueryService::new(nav));
//!
//! // A stand-in for a chat model
//! let backend: Arc<dyn TextCompletion> = Arc::new(
//!     |_: &str, _: &str| -> Result<String, CompletionError> { Ok("(0,0,0),(1,0,0)".into()) },
//! );
//! let responder = NavigationResponder::new(service, CoordinateExtractor::new(backend));
//!
//! assert_eq!(
//!     responder.actual_distance_from_query("From the door to the lamp?"),
//!     "The distance between specified points is 1.0 meters."
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod error;
mod extract;
mod responder;
mod result;
mod service;
mod visualize;

pub use config::{ExtractionConfig, QueryConfig, ResponderConfig, DEFAULT_EXTRACTION_TIMEOUT};
pub use error::{CompletionError, QueryError, QueryResult, VisualizeError};
pub use extract::{
    parse_positions, CoordinateExtractor, TextCompletion, NO_POSITIONS_SENTINEL,
    POSITIONS_SYSTEM_PROMPT,
};
pub use responder::{visualization_filename, visualization_path, NavigationResponder};
pub use result::{
    distance_message, DistanceResult, Route, EXTRACTION_FAILED_MESSAGE, UNREACHABLE_MESSAGE,
};
pub use service::DistanceQueryService;
pub use visualize::{HtmlVisualizer, Marker, PathVisualizer, VisualizationScene, PLOTLY_CDN};
