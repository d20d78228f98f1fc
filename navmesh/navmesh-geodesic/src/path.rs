//! Solver results.

use navmesh_types::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A shortest path on the mesh surface.
///
/// `points` runs from the source vertex to the target vertex and includes
/// every edge crossing and every vertex the path bends around.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodesicPath {
    /// Polyline from source to target.
    pub points: Vec<Point3<f64>>,
    /// Geodesic distance from source to target.
    pub length: f64,
}

impl GeodesicPath {
    /// Sum of the polyline's segment lengths.
    ///
    /// Matches [`length`](Self::length) up to the solver tolerance.
    #[must_use]
    pub fn polyline_length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// First point of the path.
    #[must_use]
    pub fn start(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    /// Last point of the path.
    #[must_use]
    pub fn end(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }
}

/// Why no path exists between two vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnreachableReason {
    /// The vertices lie in different connected components.
    DisconnectedComponents,
    /// Propagation ran out of events before reaching the target.
    ///
    /// Not an obstacle outcome: within one component every vertex event
    /// offers all its edge neighbours, so the wavefront always reaches the
    /// target. Seeing this means an invariant broke. Treat it like
    /// [`DisconnectedComponents`](Self::DisconnectedComponents).
    WavefrontExhausted,
}

impl std::fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DisconnectedComponents => write!(f, "disconnected components"),
            Self::WavefrontExhausted => write!(f, "wavefront exhausted"),
        }
    }
}

/// Result of a shortest-path query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeodesicOutcome {
    /// The target was reached.
    Reachable(GeodesicPath),
    /// No surface path connects source and target.
    Unreachable(UnreachableReason),
}

impl GeodesicOutcome {
    /// Geodesic distance, if reachable.
    #[must_use]
    pub fn distance(&self) -> Option<f64> {
        match self {
            Self::Reachable(path) => Some(path.length),
            Self::Unreachable(_) => None,
        }
    }

    /// The path, if reachable.
    #[must_use]
    pub const fn path(&self) -> Option<&GeodesicPath> {
        match self {
            Self::Reachable(path) => Some(path),
            Self::Unreachable(_) => None,
        }
    }

    /// Whether the target was reached.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable(_))
    }
}
