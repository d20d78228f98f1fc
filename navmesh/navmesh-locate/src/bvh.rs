//! Bounding volume hierarchy over navmesh faces.
//!
//! Answers nearest-face queries in roughly O(log F) by visiting nodes in
//! order of their box distance and pruning boxes farther than the best
//! candidate.

use navmesh_store::NavMesh;
use navmesh_types::{Aabb, Point3};
use smallvec::SmallVec;

/// Faces with at least this many triangles are split on the rayon pool.
const PARALLEL_THRESHOLD: usize = 4096;

/// BVH node containing either leaf faces or two children.
#[derive(Debug)]
enum BvhNode {
    Leaf {
        bbox: Aabb,
        faces: SmallVec<[u32; 8]>,
    },
    Internal {
        bbox: Aabb,
        left: Box<Self>,
        right: Box<Self>,
    },
}

impl BvhNode {
    const fn bbox(&self) -> &Aabb {
        match self {
            Self::Leaf { bbox, .. } | Self::Internal { bbox, .. } => bbox,
        }
    }
}

/// Closest face found by a nearest query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceHit {
    /// Face index.
    pub face: u32,
    /// Closest point on that face.
    pub point: Point3<f64>,
    /// Squared distance from the query point.
    pub distance_squared: f64,
}

impl FaceHit {
    /// Whether `self` should replace `best`: strictly closer, or equally
    /// close with a lower face index.
    #[inline]
    #[must_use]
    pub fn beats(&self, best: Option<&Self>) -> bool {
        match best {
            None => true,
            Some(b) => {
                self.distance_squared < b.distance_squared
                    || (self.distance_squared == b.distance_squared && self.face < b.face)
            }
        }
    }
}

/// Bounding volume hierarchy over the faces of a [`NavMesh`].
#[derive(Debug)]
pub struct FaceBvh {
    root: Option<BvhNode>,
    face_count: usize,
}

impl FaceBvh {
    /// Build a BVH with at most `max_leaf_size` faces per leaf.
    ///
    /// Large meshes are split in parallel with `rayon::join`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: face indices are u32
    pub fn build(nav: &NavMesh, max_leaf_size: usize) -> Self {
        let boxes: Vec<(u32, Aabb)> = nav
            .faces()
            .iter()
            .enumerate()
            .map(|(i, &[a, b, c])| {
                let bbox = Aabb::from_points(
                    [nav.position(a), nav.position(b), nav.position(c)].iter(),
                );
                (i as u32, bbox)
            })
            .collect();

        if boxes.is_empty() {
            return Self {
                root: None,
                face_count: 0,
            };
        }

        let indices: Vec<usize> = (0..boxes.len()).collect();
        let root = build_recursive(&boxes, indices, max_leaf_size.max(1));
        Self {
            root: Some(root),
            face_count: boxes.len(),
        }
    }

    /// Number of faces indexed by the tree.
    #[must_use]
    pub const fn face_count(&self) -> usize {
        self.face_count
    }

    /// Depth of the deepest leaf (0 for a single leaf).
    #[must_use]
    pub fn depth(&self) -> usize {
        fn walk(node: &BvhNode) -> usize {
            match node {
                BvhNode::Leaf { .. } => 0,
                BvhNode::Internal { left, right, .. } => 1 + walk(left).max(walk(right)),
            }
        }
        self.root.as_ref().map_or(0, walk)
    }

    /// Closest face to `point`, with ties broken by lowest face index.
    ///
    /// Returns `None` only for an empty tree.
    #[must_use]
    pub fn nearest(&self, nav: &NavMesh, point: &Point3<f64>) -> Option<FaceHit> {
        let root = self.root.as_ref()?;
        let mut best: Option<FaceHit> = None;
        let mut stack: Vec<(&BvhNode, f64)> = vec![(root, root.bbox().distance_squared_to(point))];

        while let Some((node, box_d2)) = stack.pop() {
            // Equal distance is still visited so that lower face indices can win ties.
            if best.is_some_and(|b| box_d2 > b.distance_squared) {
                continue;
            }
            match node {
                BvhNode::Leaf { faces, .. } => {
                    for &face in faces {
                        let Ok(tri) = nav.triangle(face as usize) else {
                            continue;
                        };
                        let closest = tri.closest_point(point);
                        let hit = FaceHit {
                            face,
                            point: closest,
                            distance_squared: (closest - point).norm_squared(),
                        };
                        if hit.beats(best.as_ref()) {
                            best = Some(hit);
                        }
                    }
                }
                BvhNode::Internal { left, right, .. } => {
                    let dl = left.bbox().distance_squared_to(point);
                    let dr = right.bbox().distance_squared_to(point);
                    // Push the farther child first so the nearer one is popped next.
                    if dl <= dr {
                        stack.push((right, dr));
                        stack.push((left, dl));
                    } else {
                        stack.push((left, dl));
                        stack.push((right, dr));
                    }
                }
            }
        }
        best
    }
}

fn build_recursive(boxes: &[(u32, Aabb)], indices: Vec<usize>, max_leaf_size: usize) -> BvhNode {
    let bbox = indices
        .iter()
        .fold(Aabb::empty(), |acc, &i| acc.union(&boxes[i].1));

    if indices.len() <= max_leaf_size {
        return BvhNode::Leaf {
            bbox,
            faces: indices.iter().map(|&i| boxes[i].0).collect(),
        };
    }

    // Split at the median centroid along the longest axis
    let axis = bbox.longest_axis();
    let mut sorted = indices;
    sorted.sort_by(|&a, &b| {
        let ca = boxes[a].1.center()[axis];
        let cb = boxes[b].1.center()[axis];
        ca.total_cmp(&cb).then(a.cmp(&b))
    });
    let right_indices = sorted.split_off(sorted.len() / 2);
    let left_indices = sorted;

    let (left, right) = if left_indices.len() + right_indices.len() >= PARALLEL_THRESHOLD {
        rayon::join(
            || build_recursive(boxes, left_indices, max_leaf_size),
            || build_recursive(boxes, right_indices, max_leaf_size),
        )
    } else {
        (
            build_recursive(boxes, left_indices, max_leaf_size),
            build_recursive(boxes, right_indices, max_leaf_size),
        )
    };

    BvhNode::Internal {
        bbox,
        left: Box::new(left),
        right: Box::new(right),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use navmesh_types::{IndexedMesh, Vertex};

    /// An `n` x `n` grid of unit squares on the XY plane.
    fn grid(n: u32) -> NavMesh {
        let mut mesh = IndexedMesh::new();
        for y in 0..=n {
            for x in 0..=n {
                mesh.vertices
                    .push(Vertex::from_coords(f64::from(x), f64::from(y), 0.0));
            }
        }
        let row = n + 1;
        for y in 0..n {
            for x in 0..n {
                let v = y * row + x;
                mesh.faces.push([v, v + 1, v + row + 1]);
                mesh.faces.push([v, v + row + 1, v + row]);
            }
        }
        NavMesh::from_mesh(mesh).unwrap()
    }

    #[test]
    fn tree_indexes_every_face() {
        let nav = grid(8);
        let bvh = FaceBvh::build(&nav, 4);
        assert_eq!(bvh.face_count(), 128);
        assert!(bvh.depth() >= 5);
    }

    #[test]
    fn nearest_inside_cell() {
        let nav = grid(4);
        let bvh = FaceBvh::build(&nav, 2);
        let hit = bvh.nearest(&nav, &Point3::new(2.75, 1.25, 0.5)).unwrap();
        // Cell (2, 1) lower-right triangle
        assert_eq!(hit.face, 2 * (4 + 2));
        assert!((hit.point - Point3::new(2.75, 1.25, 0.0)).norm() < 1e-12);
        assert!((hit.distance_squared - 0.25).abs() < 1e-12);
    }

    #[test]
    fn matches_linear_scan_on_shared_corner() {
        let nav = grid(2);
        let bvh = FaceBvh::build(&nav, 1);
        // The corner (1, 1) is shared by six faces.
        let p = Point3::new(1.0, 1.0, 2.0);

        let mut expected: Option<FaceHit> = None;
        for face in 0..nav.face_count() {
            let closest = nav.triangle(face).unwrap().closest_point(&p);
            let hit = FaceHit {
                face: u32::try_from(face).unwrap(),
                point: closest,
                distance_squared: (closest - p).norm_squared(),
            };
            if hit.beats(expected.as_ref()) {
                expected = Some(hit);
            }
        }

        assert_eq!(bvh.nearest(&nav, &p), expected);
        assert!((expected.unwrap().distance_squared - 4.0).abs() < 1e-12);
    }

    #[test]
    fn far_point_still_hits() {
        let nav = grid(3);
        let bvh = FaceBvh::build(&nav, 4);
        let hit = bvh.nearest(&nav, &Point3::new(-1.0e6, 5.0e5, 1.0e3)).unwrap();
        assert!(hit.distance_squared.is_finite());
        assert_eq!(hit.point, Point3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn beats_orders_by_distance_then_face() {
        let a = FaceHit {
            face: 3,
            point: Point3::origin(),
            distance_squared: 1.0,
        };
        let b = FaceHit { face: 1, ..a };
        let c = FaceHit {
            face: 7,
            distance_squared: 0.5,
            ..a
        };
        assert!(a.beats(None));
        assert!(b.beats(Some(&a)));
        assert!(!a.beats(Some(&b)));
        assert!(c.beats(Some(&b)));
    }
}
