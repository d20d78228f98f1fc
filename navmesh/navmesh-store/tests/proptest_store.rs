//! Property-based tests for navmesh topology.
//!
//! Run with: cargo test -p navmesh-store -- proptest

use navmesh_store::NavMesh;
use navmesh_types::{IndexedMesh, Vertex};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_vertex() -> impl Strategy<Value = Vertex> {
    prop::array::uniform3(-50.0..50.0f64).prop_map(Vertex::from)
}

/// Random meshes whose faces never repeat a corner.
fn arb_mesh(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = IndexedMesh> {
    (3..=max_vertices).prop_flat_map(move |num_vertices| {
        let vertices = prop::collection::vec(arb_vertex(), num_vertices);
        vertices.prop_flat_map(move |verts| {
            #[allow(clippy::cast_possible_truncation)]
            let n = verts.len() as u32;
            let face = prop::array::uniform3(0..n)
                .prop_filter("distinct corners", |[a, b, c]| a != b && b != c && a != c);
            prop::collection::vec(face, 1..=max_faces).prop_map(move |faces| IndexedMesh {
                vertices: verts.clone(),
                faces,
            })
        })
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_edge_face_incidence_matches_face_count(mesh in arb_mesh(20, 30)) {
        let face_count = mesh.faces.len();
        let nav = NavMesh::from_mesh(mesh).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let incidences: usize = nav.edges().iter().map(|e| e.faces.len()).sum();
        prop_assert_eq!(incidences, 3 * face_count);
    }

    #[test]
    fn proptest_neighbors_are_symmetric_and_sorted(mesh in arb_mesh(20, 30)) {
        let nav = NavMesh::from_mesh(mesh).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for v in 0..nav.vertex_count() as u32 {
            let ns = nav.neighbors(v);
            prop_assert!(ns.windows(2).all(|w| w[0] < w[1]));
            for &n in ns {
                prop_assert!(nav.neighbors(n).contains(&v));
                prop_assert!(nav.same_component(v as usize, n as usize).unwrap_or(false));
            }
        }
    }

    #[test]
    fn proptest_face_corners_share_a_component(mesh in arb_mesh(25, 20)) {
        let nav = NavMesh::from_mesh(mesh).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for &[a, b, c] in nav.faces() {
            let ca = nav.component_of(a as usize).map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(Some(ca), nav.component_of(b as usize).ok());
            prop_assert_eq!(Some(ca), nav.component_of(c as usize).ok());
        }
        prop_assert!(nav.component_count() <= nav.vertex_count());
    }
}
