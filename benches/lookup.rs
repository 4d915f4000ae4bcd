use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::net::IpAddr;
use std::time::Duration;

use bancached::cache::BanCache;

// Benchmarks the request-path predicate against a populated cache. This is
// the call made once per inbound request, so it dominates the crate's
// performance budget.

fn lookup_benchmark(c: &mut Criterion) {
    let cache = BanCache::new();
    for a in 0..40u32 {
        for b in 0..250u32 {
            cache
                .ban(&format!("10.{a}.{b}.1"), Duration::from_secs(3600), None)
                .unwrap();
        }
    }

    let hit: IpAddr = "10.20.100.1".parse().unwrap();
    let miss: IpAddr = "192.0.2.1".parse().unwrap();

    let mut group = c.benchmark_group("is_banned");
    group.throughput(Throughput::Elements(1));

    group.bench_function("hit", |b| b.iter(|| cache.is_banned(std::hint::black_box(&hit))));
    group.bench_function("miss", |b| b.iter(|| cache.is_banned(std::hint::black_box(&miss))));

    group.finish();
}

criterion_group!(benches, lookup_benchmark);
criterion_main!(benches);
