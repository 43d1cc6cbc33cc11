//! Benchmarks for the resource query engine.
//!
//! The finder re-runs the query on every keystroke, so a query over a
//! realistic city-sized catalog has to stay well under a frame.

use criterion::{criterion_group, criterion_main, Criterion};
use mindbridge_core::types::{Coordinate, ResourceId};
use mindbridge_discovery::{CategoryFilter, QueryFilter, ResourceCatalog, ResourceQueryEngine};

/// Replicate the seed catalog `copies` times, spreading entries across the city.
fn large_catalog(copies: u32) -> ResourceCatalog {
    let seed = ResourceCatalog::seed();
    let mut resources = Vec::new();
    for copy in 0..copies {
        for (i, base) in seed.iter().enumerate() {
            let mut r = base.clone();
            r.id = ResourceId(copy * 10 + i as u32);
            r.coordinate.latitude += (copy % 20) as f64 * 0.005;
            r.coordinate.longitude -= (copy / 20) as f64 * 0.005;
            resources.push(r);
        }
    }
    ResourceCatalog::from_resources(resources).expect("benchmark catalog is valid")
}

fn bench_query(c: &mut Criterion) {
    let engine = ResourceQueryEngine::new(large_catalog(250));
    let origin = Coordinate::DOWNTOWN_TORONTO;

    c.bench_function("query_all_unfiltered_1000", |b| {
        let filter = QueryFilter::new(origin);
        b.iter(|| engine.query(&filter))
    });

    c.bench_function("query_text_and_nearby_1000", |b| {
        let filter = QueryFilter::new(origin)
            .with_search("therapy")
            .with_category(CategoryFilter::Nearby);
        b.iter(|| engine.query(&filter))
    });

    c.bench_function("query_immediate_1000", |b| {
        let filter = QueryFilter::new(origin).with_category(CategoryFilter::Immediate);
        b.iter(|| engine.query(&filter))
    });
}

criterion_group!(benches, bench_query);
criterion_main!(benches);
