//! Locator configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the closest face is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LocateStrategy {
    /// Test every face.
    BruteForce,
    /// Best-first descent of a bounding volume hierarchy.
    #[default]
    AabbTree,
}

/// Configuration for [`Locator`](crate::Locator).
///
/// # Example
///
/// ```
/// use navmesh_locate::{LocateStrategy, LocatorConfig};
///
/// let config = LocatorConfig::default()
///     .with_strategy(LocateStrategy::BruteForce)
///     .with_leaf_size(4);
/// assert_eq!(config.leaf_size, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocatorConfig {
    /// Face search strategy.
    pub strategy: LocateStrategy,
    /// Maximum faces per BVH leaf (ignored for brute force).
    pub leaf_size: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            strategy: LocateStrategy::AabbTree,
            leaf_size: 8,
        }
    }
}

impl LocatorConfig {
    /// Set the face search strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: LocateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the BVH leaf size (clamped to at least 1).
    #[must_use]
    pub const fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = if leaf_size == 0 { 1 } else { leaf_size };
        self
    }
}
