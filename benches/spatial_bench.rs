//! Spatial index benchmarks.
//!
//! Measures:
//! - Build time (insert + sort over a synthetic point grid)
//! - Query latency across traversal depths (pruning/scan trade-off)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geocurve::{BBox, Location, SpatialIndex};

/// Generate points spread across a region around a center.
fn generate_points(count: usize, center_lng: f64, center_lat: f64, spread_deg: f64) -> Vec<Location> {
    let side = (count as f64).sqrt().ceil() as usize;
    let step = spread_deg / side as f64;

    (0..count)
        .map(|i| {
            let row = i / side;
            let col = i % side;
            Location::new(
                center_lng - spread_deg / 2.0 + col as f64 * step,
                center_lat - spread_deg / 2.0 + row as f64 * step,
            )
        })
        .collect()
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");

    for count in [1_000, 10_000, 100_000] {
        let points = generate_points(count, 2.3522, 48.8566, 10.0);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("insert_sort", count), &points, |b, points| {
            b.iter(|| {
                let mut index = SpatialIndex::for_earth(16).unwrap();
                for &location in points {
                    index.insert(location);
                }
                index.sort();
                black_box(index.count())
            })
        });
    }

    group.finish();
}

fn bench_query_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_depth");

    let mut index = SpatialIndex::for_earth(16).unwrap();
    for location in generate_points(100_000, 2.3522, 48.8566, 10.0) {
        index.insert(location);
    }
    index.sort();

    // A city-sized window inside the point cloud.
    let query = BBox::from_bounds([2.0, 48.5], [2.7, 49.2]).unwrap();

    for depth in [4, 8, 10, 12] {
        group.bench_with_input(BenchmarkId::new("query", depth), &depth, |b, &depth| {
            b.iter(|| black_box(index.query(&query, depth)).len())
        });
    }

    group.finish();
}

fn bench_query_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_radius");

    let mut index = SpatialIndex::for_earth(16).unwrap();
    for location in generate_points(100_000, 2.3522, 48.8566, 10.0) {
        index.insert(location);
    }
    index.sort();

    let center = Location::new(2.3522, 48.8566);

    for radius_km in [5.0, 50.0] {
        group.bench_with_input(
            BenchmarkId::new("radius_km", radius_km as u64),
            &radius_km,
            |b, &radius_km| {
                b.iter(|| black_box(index.query_radius(&center, radius_km * 1_000.0, 10)).len())
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_index, bench_query_depth, bench_query_radius);
criterion_main!(benches);
