//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box, used for mesh extents and the face BVH.
///
/// # Example
///
/// ```
/// use navmesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 3.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 1.0)));
/// assert_eq!(aabb.distance_squared_to(&Point3::new(5.0, 5.0, 5.0)), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box spanned by two opposite corners given in any order.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// The inverted box: contains nothing and is absorbed by [`Aabb::union`].
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box around `points`; empty if there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        points.fold(Self::empty(), |mut aabb, p| {
            aabb.expand_to_include(p);
            aabb
        })
    }

    /// True when some axis has `min > max`.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Edge lengths along x, y and z.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Midpoint of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Axis (0 = x, 1 = y, 2 = z) with the largest extent; x wins ties,
    /// then y.
    #[must_use]
    pub fn longest_axis(&self) -> usize {
        let size = self.size();
        let mut axis = 0;
        for candidate in 1..3 {
            if size[candidate] > size[axis] {
                axis = candidate;
            }
        }
        axis
    }

    /// Whether `point` lies inside or on the boundary.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (0..3).all(|axis| self.min[axis] <= point[axis] && point[axis] <= self.max[axis])
    }

    /// Squared distance from `point` to the box, zero inside.
    ///
    /// This is a lower bound on the squared distance to anything the box
    /// encloses, which makes it the pruning key for nearest-point queries.
    #[must_use]
    pub fn distance_squared_to(&self, point: &Point3<f64>) -> f64 {
        if self.is_empty() {
            return f64::INFINITY;
        }
        let outside = (self.min - point).sup(&(point - self.max)).sup(&Vector3::zeros());
        outside.norm_squared()
    }

    /// Box enclosing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Grow in place so that `point` is inside.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_points() {
        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 5.0, 3.0),
            Point3::new(-2.0, 8.0, 1.0),
        ];

        let aabb = Aabb::from_points(points.iter());
        assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
    }

    #[test]
    fn aabb_empty_is_union_identity() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(Aabb::empty().is_empty());
        assert_eq!(Aabb::empty().union(&a), a);
        assert_eq!(a.union(&Aabb::empty()), a);
    }

    #[test]
    fn aabb_longest_axis() {
        let flat = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 5.0, 0.1));
        assert_eq!(flat.longest_axis(), 1);
        let tall = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 4.0));
        assert_eq!(tall.longest_axis(), 2);
    }

    #[test]
    fn aabb_distance_squared() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.distance_squared_to(&Point3::new(0.5, 0.5, 0.5)), 0.0);
        assert!((aabb.distance_squared_to(&Point3::new(3.0, 0.5, 0.5)) - 4.0).abs() < 1e-12);
        assert!((aabb.distance_squared_to(&Point3::new(2.0, 2.0, 0.5)) - 2.0).abs() < 1e-12);
        assert!(Aabb::empty()
            .distance_squared_to(&Point3::origin())
            .is_infinite());
    }

    #[test]
    fn aabb_corners_in_any_order() {
        let aabb = Aabb::new(Point3::new(10.0, 0.0, 3.0), Point3::new(0.0, 10.0, 0.0));
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(10.0, 10.0, 3.0));
        assert!(aabb.contains(&Point3::new(10.0, 5.0, 0.0)));
        assert!(!aabb.contains(&Point3::new(11.0, 5.0, 1.0)));
        assert_eq!(aabb.center(), Point3::new(5.0, 5.0, 1.5));
    }
}
