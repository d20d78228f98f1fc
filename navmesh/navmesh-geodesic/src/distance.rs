//! Per-vertex distance fields.

/// Walking distance from a set of sources to every vertex.
///
/// `f64::INFINITY` marks a vertex that cannot be reached, either because it
/// lies on another island or because it was beyond a cutoff.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceField {
    distances: Vec<f64>,
}

impl DistanceField {
    /// Wrap distances indexed by vertex id.
    #[must_use]
    pub const fn from_distances(distances: Vec<f64>) -> Self {
        Self { distances }
    }

    /// Distance to `vertex`; `f64::INFINITY` if unreachable or out of range.
    #[inline]
    #[must_use]
    pub fn distance(&self, vertex: usize) -> f64 {
        self.distances.get(vertex).copied().unwrap_or(f64::INFINITY)
    }

    /// Number of vertices covered.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// True for a field over no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Raw distances by vertex id.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.distances
    }

    /// `(vertex, distance)` pairs in id order, unreachable ones included.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.distances.iter().copied().enumerate()
    }

    /// Vertices reachable within `radius`, in id order.
    pub fn within(&self, radius: f64) -> impl Iterator<Item = usize> + '_ {
        self.iter()
            .filter(move |&(_, d)| d <= radius)
            .map(|(v, _)| v)
    }

    /// Largest finite distance; `f64::NEG_INFINITY` if nothing is reachable.
    #[must_use]
    pub fn max_distance(&self) -> f64 {
        self.distances
            .iter()
            .copied()
            .filter(|d| d.is_finite())
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Vertices with a finite distance.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// Vertices with an infinite distance.
    #[must_use]
    pub fn unreachable_count(&self) -> usize {
        self.len() - self.reachable_count()
    }
}

impl From<Vec<f64>> for DistanceField {
    fn from(distances: Vec<f64>) -> Self {
        Self::from_distances(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_is_unreachable() {
        let field = DistanceField::from(vec![0.0, 2.0]);
        assert_eq!(field.len(), 2);
        assert!(field.distance(9).is_infinite());
        assert!((field.distance(1) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn counts_and_extremes() {
        let field = DistanceField::from(vec![0.0, 4.0, f64::INFINITY, 4.0, 1.5]);
        assert_eq!(field.reachable_count(), 4);
        assert_eq!(field.unreachable_count(), 1);
        assert!((field.max_distance() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn within_radius() {
        let field = DistanceField::from(vec![0.0, 4.0, f64::INFINITY, 1.5]);
        assert_eq!(field.within(2.0).collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(field.within(f64::INFINITY).count(), 4);
    }

    #[test]
    fn nothing_reachable() {
        let field = DistanceField::from(vec![f64::INFINITY; 2]);
        assert!(!field.is_empty());
        assert_eq!(field.reachable_count(), 0);
        assert!(field.max_distance().is_infinite());
    }
}
