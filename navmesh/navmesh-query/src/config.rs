//! Configuration for the query service and its front ends.

use std::path::PathBuf;
use std::time::Duration;

use navmesh_geodesic::SolverConfig;
use navmesh_locate::LocatorConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`DistanceQueryService`](crate::DistanceQueryService).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryConfig {
    /// Geodesic solver settings.
    pub solver: SolverConfig,
    /// Nearest-surface locator settings.
    pub locator: LocatorConfig,
}

impl QueryConfig {
    /// Set the solver configuration.
    #[must_use]
    pub const fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Set the locator configuration.
    #[must_use]
    pub const fn with_locator(mut self, locator: LocatorConfig) -> Self {
        self.locator = locator;
        self
    }
}

/// Default time allowed for one completion call.
pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`CoordinateExtractor`](crate::CoordinateExtractor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtractionConfig {
    /// Upper bound on one completion call.
    pub timeout: Duration,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }
}

impl ExtractionConfig {
    /// Set the completion timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Configuration for [`NavigationResponder`](crate::NavigationResponder).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResponderConfig {
    /// Directory for path visualizations; none are written when unset.
    pub vis_dir: Option<PathBuf>,
}

impl ResponderConfig {
    /// Write visualizations into `dir`.
    #[must_use]
    pub fn with_vis_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.vis_dir = Some(dir.into());
        self
    }
}
