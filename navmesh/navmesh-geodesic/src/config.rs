//! Solver configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default absolute tolerance in mesh units (meters).
pub const GEODESIC_EPSILON: f64 = 1e-9;

/// Configuration for [`GeodesicSolver`](crate::GeodesicSolver).
///
/// A single absolute tolerance is used for every comparison the solver
/// makes: window dominance, vertex label improvement, minimal window width
/// and the termination test.
///
/// # Example
///
/// ```
/// use navmesh_geodesic::SolverConfig;
///
/// let config = SolverConfig::default().with_epsilon(1e-7);
/// assert_eq!(config.epsilon, 1e-7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Absolute tolerance in mesh units.
    pub epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: GEODESIC_EPSILON,
        }
    }
}

impl SolverConfig {
    /// Set the tolerance. Non-finite or non-positive values keep the default.
    #[must_use]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = if epsilon.is_finite() && epsilon > 0.0 {
            epsilon
        } else {
            GEODESIC_EPSILON
        };
        self
    }
}
