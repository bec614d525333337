//! Hex encoding benchmarks
//!
//! Run with: cargo bench --bench hexlify

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sslutil::hexlify::{hexlify, hexlify_into};
use sslutil::tls::classify;

fn bench_hexlify(c: &mut Criterion) {
    let mut group = c.benchmark_group("hexlify");

    // session id, sha256 digest, a small ticket
    for size in [16usize, 32, 4096] {
        let binary: Vec<u8> = (0..size).map(|i| i as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("alloc", size), &binary, |b, binary| {
            b.iter(|| hexlify(black_box(binary)))
        });

        group.bench_with_input(BenchmarkId::new("reuse_buffer", size), &binary, |b, binary| {
            let mut out = String::new();
            b.iter(|| {
                hexlify_into(black_box(binary), &mut out);
            })
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify", |b| {
        b.iter(|| classify(black_box(true), black_box(false)))
    });
}

criterion_group!(benches, bench_hexlify, bench_classify);
criterion_main!(benches);
