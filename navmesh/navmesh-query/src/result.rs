//! Query outcomes and their user-facing text.

use navmesh_geodesic::{GeodesicPath, UnreachableReason};
use navmesh_locate::SnapResult;

/// Answer when the surface offers no path between the points.
pub const UNREACHABLE_MESSAGE: &str =
    "The path between specified objects is not navigable considering obstacles.";

/// Answer when no usable positions could be read from a query.
pub const EXTRACTION_FAILED_MESSAGE: &str = "The query does not contain information about the objects' positions or the positions could not be parsed.";

/// Answer for a known distance in meters.
#[must_use]
pub fn distance_message(distance: f64) -> String {
    format!("The distance between specified points is {distance:?} meters.")
}

/// A navigable connection between two query points.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Geodesic distance between the snapped vertices.
    pub distance: f64,
    /// Surface path between the snapped vertices.
    pub path: GeodesicPath,
    /// Where the start point landed.
    pub start: SnapResult,
    /// Where the goal point landed.
    pub goal: SnapResult,
}

/// Outcome of a navigable distance query.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceResult {
    /// The points are connected on the surface.
    Navigable(Route),
    /// The snapped vertices are not connected.
    Unreachable(UnreachableReason),
    /// No positions could be read from the query.
    ExtractionFailed,
}

impl DistanceResult {
    /// Distance in meters, if navigable.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        match self {
            Self::Navigable(route) => Some(route.distance),
            Self::Unreachable(_) | Self::ExtractionFailed => None,
        }
    }

    /// The route, if navigable.
    #[must_use]
    pub const fn route(&self) -> Option<&Route> {
        match self {
            Self::Navigable(route) => Some(route),
            Self::Unreachable(_) | Self::ExtractionFailed => None,
        }
    }

    /// The one-sentence answer for this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Navigable(route) => distance_message(route.distance),
            Self::Unreachable(_) => UNREACHABLE_MESSAGE.to_string(),
            Self::ExtractionFailed => EXTRACTION_FAILED_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            distance_message(2.5),
            "The distance between specified points is 2.5 meters."
        );
        assert_eq!(
            distance_message(3.0),
            "The distance between specified points is 3.0 meters."
        );
        assert_eq!(
            DistanceResult::Unreachable(UnreachableReason::DisconnectedComponents).message(),
            UNREACHABLE_MESSAGE
        );
        assert_eq!(
            DistanceResult::ExtractionFailed.message(),
            EXTRACTION_FAILED_MESSAGE
        );
    }

    #[test]
    fn non_navigable_has_no_distance() {
        assert!(DistanceResult::ExtractionFailed.distance().is_none());
        assert!(DistanceResult::Unreachable(UnreachableReason::WavefrontExhausted)
            .route()
            .is_none());
    }
}
