//! Ledger Benchmarks
//!
//! Measures classification, allocation, reachability, and full
//! collection cycles. Run with: `cargo bench`

use alloc_ledger::{Ledger, LedgerConfig, SizeClassModel};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let model = SizeClassModel::new(&LedgerConfig::default());

    for &payload in &[0usize, 16, 100, 4096] {
        group.bench_function(format!("payload_{}", payload), |b| {
            b.iter(|| black_box(model.classify(black_box(payload)).unwrap()))
        });
    }

    group.finish();
}

fn bench_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("allocation");

    for &payload in &[16usize, 64, 256] {
        group.throughput(Throughput::Bytes(payload as u64));
        group.bench_function(format!("create_{}", payload), |b| {
            b.iter_with_setup(Ledger::with_defaults, |mut ledger| {
                for _ in 0..1_000 {
                    black_box(ledger.create(payload, false).unwrap());
                }
            })
        });
    }

    group.finish();
}

fn bench_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");

    // Linked chain of rooted-head objects: marking dominates
    group.bench_function("mark_chain_1000", |b| {
        b.iter_with_setup(
            || {
                let mut ledger = Ledger::with_defaults();
                let mut prev = ledger.create(16, true).unwrap();
                for _ in 0..999 {
                    let next = ledger.create(16, false).unwrap();
                    ledger.set_references(prev, &[next]).unwrap();
                    prev = next;
                }
                ledger
            },
            |mut ledger| {
                black_box(ledger.collect().unwrap());
            },
        )
    });

    // All-garbage heap: sweeping dominates
    group.bench_function("sweep_garbage_1000", |b| {
        b.iter_with_setup(
            || {
                let mut ledger = Ledger::with_defaults();
                for _ in 0..1_000 {
                    ledger.create(16, false).unwrap();
                }
                ledger
            },
            |mut ledger| {
                black_box(ledger.collect().unwrap());
            },
        )
    });

    group.finish();
}

criterion_group!(benches, bench_classify, bench_allocation, bench_collection);
criterion_main!(benches);
