//! Benchmarks for the gallery engine's per-frame work.
//!
//! Run with: cargo bench -p mortar-gallery

use std::hint::black_box;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use mortar_gallery::{GalleryItem, MasonryConfig, MasonryEngine};

// =============================================================================
// Test Data
// =============================================================================

const FRAME: Duration = Duration::from_millis(16);

fn items(count: usize) -> Vec<GalleryItem> {
    (0..count)
        .map(|i| GalleryItem::new(format!("photo-{i}"), format!("https://cdn.test/{i}.jpg")))
        .collect()
}

/// Engine with every item revealed and placed.
fn revealed_engine(count: usize) -> MasonryEngine {
    let config = MasonryConfig::default().batches(count.max(1), 12);
    let mut engine = MasonryEngine::new(config).unwrap();
    engine.set_container_width(1204.0);
    engine.set_items(items(count));
    engine.update();
    engine
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_resize_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/resize_update");

    for count in [18, 200, 2000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            let mut engine = revealed_engine(count);
            let mut wide = false;
            b.iter(|| {
                wide = !wide;
                engine.set_container_width(if wide { 1600.0 } else { 1204.0 });
                black_box(engine.update())
            })
        });
    }

    group.finish();
}

fn bench_frame_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/tick");

    for count in [18, 200, 2000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter_batched(
                || revealed_engine(count),
                |mut engine| black_box(engine.tick(FRAME)),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_placed_items(c: &mut Criterion) {
    let engine = revealed_engine(200);
    c.bench_function("engine/placed_items/200", |b| {
        b.iter(|| black_box(engine.placed_items().len()))
    });
}

criterion_group!(
    benches,
    bench_resize_pass,
    bench_frame_tick,
    bench_placed_items
);
criterion_main!(benches);
