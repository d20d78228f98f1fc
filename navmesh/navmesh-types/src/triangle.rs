//! Resolved triangles and point-to-triangle projection.

use crate::Aabb;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One face of a navmesh with its corner positions resolved.
///
/// # Example
///
/// ```
/// use navmesh_types::{Triangle, Point3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert!((tri.area() - 0.5).abs() < 1e-10);
///
/// // A point above the triangle projects straight down
/// let closest = tri.closest_point(&Point3::new(0.25, 0.25, 3.0));
/// assert!((closest - Point3::new(0.25, 0.25, 0.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// Corner 0.
    pub v0: Point3<f64>,
    /// Corner 1.
    pub v1: Point3<f64>,
    /// Corner 2.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Triangle with corners `v0`, `v1`, `v2`.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Twice-area vector `(v1 - v0) x (v2 - v0)`.
    #[inline]
    fn cross(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal following the corner winding, `None` for a sliver.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.cross().try_normalize(f64::EPSILON)
    }

    /// Surface area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.cross().norm()
    }

    /// Mean of the three corners.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// Whether the corners are (numerically) collinear.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal().is_none()
    }

    /// Box around the three corners.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points([self.v0, self.v1, self.v2].iter())
    }

    /// Closest point on the triangle (interior, edges or vertices) to `p`.
    ///
    /// Uses the Voronoi region classification from Ericson,
    /// *Real-Time Collision Detection*, section 5.1.5. Degenerate triangles
    /// fall back to the closest point on their three edges.
    #[must_use]
    pub fn closest_point(&self, p: &Point3<f64>) -> Point3<f64> {
        let (a, b, c) = (self.v0, self.v1, self.v2);
        let ab = b - a;
        let ac = c - a;
        let ap = p - a;

        let d1 = ab.dot(&ap);
        let d2 = ac.dot(&ap);
        if d1 <= 0.0 && d2 <= 0.0 {
            return a;
        }

        let bp = p - b;
        let d3 = ab.dot(&bp);
        let d4 = ac.dot(&bp);
        if d3 >= 0.0 && d4 <= d3 {
            return b;
        }

        let vc = d1.mul_add(d4, -(d3 * d2));
        if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
            let v = d1 / (d1 - d3);
            return Point3::from(a.coords + ab * v);
        }

        let cp = p - c;
        let d5 = ab.dot(&cp);
        let d6 = ac.dot(&cp);
        if d6 >= 0.0 && d5 <= d6 {
            return c;
        }

        let vb = d5.mul_add(d2, -(d1 * d6));
        if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
            let w = d2 / (d2 - d6);
            return Point3::from(a.coords + ac * w);
        }

        let va = d3.mul_add(d6, -(d5 * d4));
        if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
            let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
            return Point3::from(b.coords + (c - b) * w);
        }

        let sum = va + vb + vc;
        if sum.abs() <= f64::MIN_POSITIVE {
            return self.closest_point_on_edges(p);
        }
        let v = vb / sum;
        let w = vc / sum;
        Point3::from(a.coords + ab * v + ac * w)
    }

    fn closest_point_on_edges(&self, p: &Point3<f64>) -> Point3<f64> {
        let candidates = [
            closest_point_on_segment(p, &self.v0, &self.v1),
            closest_point_on_segment(p, &self.v1, &self.v2),
            closest_point_on_segment(p, &self.v2, &self.v0),
        ];
        let mut best = candidates[0];
        let mut best_dist = (best - p).norm_squared();
        for candidate in &candidates[1..] {
            let d = (candidate - p).norm_squared();
            if d < best_dist {
                best = *candidate;
                best_dist = d;
            }
        }
        best
    }
}

/// Closest point on the segment `[a, b]` to `p`.
fn closest_point_on_segment(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f64::MIN_POSITIVE {
        return *a;
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    Point3::from(a.coords + ab * t)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::new(Point3::from(a), Point3::from(b), Point3::from(c))
    }

    fn right_triangle() -> Triangle {
        tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0])
    }

    #[test]
    fn normal_and_area() {
        let tri = right_triangle();
        let n = tri.normal().unwrap();
        assert!((n.z - 1.0).abs() < 1e-10);
        assert!((tri.area() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn degenerate_has_no_normal() {
        let tri = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        assert!(tri.is_degenerate());
        assert!(tri.normal().is_none());
    }

    #[test]
    fn closest_point_interior() {
        let tri = right_triangle();
        let c = tri.closest_point(&Point3::new(0.2, 0.3, -4.0));
        assert!((c - Point3::new(0.2, 0.3, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn closest_point_vertex_regions() {
        let tri = right_triangle();
        assert_eq!(tri.closest_point(&Point3::new(-1.0, -1.0, 0.0)), tri.v0);
        assert_eq!(tri.closest_point(&Point3::new(3.0, -0.5, 1.0)), tri.v1);
        assert_eq!(tri.closest_point(&Point3::new(-0.5, 3.0, 0.0)), tri.v2);
    }

    #[test]
    fn closest_point_edge_regions() {
        let tri = right_triangle();

        let on_ab = tri.closest_point(&Point3::new(0.5, -2.0, 0.0));
        assert!((on_ab - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-12);

        let on_ac = tri.closest_point(&Point3::new(-2.0, 0.5, 0.0));
        assert!((on_ac - Point3::new(0.0, 0.5, 0.0)).norm() < 1e-12);

        let on_bc = tri.closest_point(&Point3::new(1.0, 1.0, 0.0));
        assert!((on_bc - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn closest_point_degenerate_triangle() {
        let tri = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let c = tri.closest_point(&Point3::new(1.5, 1.0, 0.0));
        assert!(c.iter().all(|v| v.is_finite()));
        assert!((c - Point3::new(1.5, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn bounds_cover_vertices() {
        let tri = tri([0.0, 2.0, -1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 3.0]);
        let b = tri.bounds();
        assert_eq!(b.min, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(b.max, Point3::new(1.0, 2.0, 3.0));
    }
}
