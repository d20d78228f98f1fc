//! Windows: edge intervals reached by straight unfolded lines.
//!
//! Every window lives in the 2D frame of its edge. The origin is the edge's
//! first vertex, `+x` runs along the edge, and `+y` points into the face the
//! window propagates into. The pseudo-source sits at `y <= 0`.

use nalgebra::{Point2, Vector2};
use navmesh_types::{Point3, Vector3};

/// Lengths below this are treated as zero.
pub(crate) const DEGENERATE_LENGTH: f64 = 1e-12;

/// Index into the solver's window arena.
pub(crate) type WindowId = u32;

/// An interval `[b0, b1]` of an edge whose distances come from one
/// pseudo-source seen through a chain of unfolded faces.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Window {
    pub edge: u32,
    /// `None` on boundary edges: the window only feeds its endpoints.
    pub into_face: Option<u32>,
    pub b0: f64,
    pub b1: f64,
    /// Unfolded pseudo-source position.
    pub source: Point2<f64>,
    /// Geodesic distance of the pseudo-source.
    pub sigma: f64,
    pub pseudo_source: u32,
    pub parent: Option<WindowId>,
}

impl Window {
    /// Distance to the edge point at `x`.
    #[inline]
    pub fn distance_at(&self, x: f64) -> f64 {
        self.sigma + (Point2::new(x, 0.0) - self.source).norm()
    }

    /// Smallest distance over the interval.
    #[inline]
    pub fn min_distance(&self) -> f64 {
        self.distance_at(self.source.x.max(self.b0).min(self.b1))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.b1 - self.b0
    }

    /// Whether this window's interval contains `other`'s, up to `epsilon`.
    #[inline]
    pub fn covers(&self, other: &Self, epsilon: f64) -> bool {
        self.b0 <= other.b0 + epsilon && self.b1 >= other.b1 - epsilon
    }
}

/// Maps 3D points of a face onto the 2D frame of one of its edges.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeFrame {
    origin: Point3<f64>,
    axis: Vector3<f64>,
}

impl EdgeFrame {
    /// Frame of the edge `from -> to`; `None` for a zero-length edge.
    pub fn new(from: Point3<f64>, to: Point3<f64>) -> Option<Self> {
        let span = to - from;
        let length = span.norm();
        (length >= DEGENERATE_LENGTH).then(|| Self {
            origin: from,
            axis: span / length,
        })
    }

    /// Coordinates of `point` with `y >= 0` (its distance from the edge line).
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        let rel = point - self.origin;
        let x = rel.dot(&self.axis);
        Point2::new(x, (rel - self.axis * x).norm())
    }

    /// The 3D point at `x` along the edge.
    pub fn lift(&self, x: f64) -> Point3<f64> {
        self.origin + self.axis * x
    }
}

/// 2D cross product.
#[inline]
pub(crate) fn cross(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Parameter in `[0, 1]` along `p0 -> p1` where the line from `eye` through
/// `through` crosses it. `None` if the two are parallel.
pub(crate) fn ray_segment_param(
    eye: &Point2<f64>,
    through: &Point2<f64>,
    p0: &Point2<f64>,
    p1: &Point2<f64>,
) -> Option<f64> {
    let ray = through - eye;
    let segment = p1 - p0;
    let denom = cross(&ray, &segment);
    if denom.abs() < DEGENERATE_LENGTH * DEGENERATE_LENGTH {
        return None;
    }
    Some((cross(&(p0 - eye), &ray) / denom).clamp(0.0, 1.0))
}
