//! Benchmarks for nearest-surface queries.
//!
//! Run with: cargo bench -p navmesh-locate

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use navmesh_locate::{LocateStrategy, Locator, LocatorConfig};
use navmesh_store::NavMesh;
use navmesh_types::{IndexedMesh, Point3, Vertex};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Gently rolling `n` x `n` floor, 0.25 m cells.
fn create_floor(n: u32) -> NavMesh {
    let mut mesh = IndexedMesh::new();
    for y in 0..=n {
        for x in 0..=n {
            let (fx, fy) = (f64::from(x) * 0.25, f64::from(y) * 0.25);
            let z = 0.05 * (fx * 0.7).sin() * (fy * 0.3).cos();
            mesh.vertices.push(Vertex::from_coords(fx, fy, z));
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
    NavMesh::from_mesh(mesh).expect("floor mesh is valid")
}

fn query_points(count: u32, extent: f64) -> Vec<Point3<f64>> {
    (0..count)
        .map(|i| {
            let t = f64::from(i) / f64::from(count);
            Point3::new(
                extent * (t * 7.3).fract(),
                extent * (t * 3.1).fract(),
                1.5 * (t * 11.0).sin(),
            )
        })
        .collect()
}

// =============================================================================
// Locate Benchmarks
// =============================================================================

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for n in [32u32, 128] {
        let nav = Arc::new(create_floor(n));
        let points = query_points(64, f64::from(n) * 0.25);
        group.throughput(Throughput::Elements(points.len() as u64));

        for strategy in [LocateStrategy::BruteForce, LocateStrategy::AabbTree] {
            let locator = Locator::with_config(
                Arc::clone(&nav),
                LocatorConfig::default().with_strategy(strategy),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), nav.face_count()),
                &points,
                |b, points| {
                    b.iter(|| {
                        for p in points {
                            black_box(locator.locate(black_box(p)));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let nav = Arc::new(create_floor(256));
    c.bench_function("build_bvh_131k_faces", |b| {
        b.iter(|| Locator::new(black_box(Arc::clone(&nav))));
    });
}

criterion_group!(benches, bench_locate, bench_build);
criterion_main!(benches);
