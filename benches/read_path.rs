use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use snapkit::cache::TimedCache;
use snapkit::snapshot::SwapSnapshot;
use snapkit::traits::source_fn;

fn bench_fresh_snapshot_read(c: &mut Criterion) {
    c.bench_function("fresh_snapshot_read", |b| {
        let cache = TimedCache::new(
            source_fn(|| Ok(SwapSnapshot::new(100, 500, 400))),
            Duration::from_secs(3600),
        );
        let _ = cache.snapshot();
        b.iter(|| cache.snapshot())
    });
}

fn bench_field_projection(c: &mut Criterion) {
    c.bench_function("field_projection", |b| {
        let cache = TimedCache::new(
            source_fn(|| Ok(SwapSnapshot::new(100, 500, 400))),
            Duration::from_secs(3600),
        );
        let _ = cache.snapshot();
        b.iter(|| cache.field("used"))
    });
}

criterion_group!(benches, bench_fresh_snapshot_read, bench_field_projection);
criterion_main!(benches);
