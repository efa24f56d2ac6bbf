//! Rating-map optimizer benchmarks.
//!
//! Measures the O(K·n²) table fill across dataset sizes and compares the
//! sequential fill with the rayon-backed one.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};

use rust_quantization::quantization::prelude::*;

fn credit_set(n: usize, seed: u64) -> ObservationSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| {
            let score: f64 = rng.random_range(300.0..850.0);
            let p_default = 1.0 / (1.0 + ((score - 600.0) / 40.0).exp());
            Observation::new(score.round(), rng.random_bool(p_default))
        })
        .collect();
    ObservationSet::from_unsorted(rows).unwrap()
}

// =============================================================================
// Dataset Size
// =============================================================================

fn bench_dataset_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimizer/dataset_size/k5");

    for &n in &[250usize, 1_000, 2_500] {
        let set = credit_set(n, 42);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("sequential", n), &set, |b, set| {
            b.iter(|| black_box(optimize(black_box(set), 5).unwrap()));
        });
    }

    group.finish();
}

// =============================================================================
// Thread Scaling
// =============================================================================

fn bench_thread_scaling(c: &mut Criterion) {
    let n = 2_500;
    let set = credit_set(n, 7);

    let mut group = c.benchmark_group("optimizer/thread_scaling/n2500_k8");
    group.throughput(Throughput::Elements(n as u64));

    for &n_threads in &[1usize, 2, 4, 8] {
        let opts = QuantizeOptions::new(8)
            .unwrap()
            .with_parallelism(Parallelism::from_threads(n_threads));
        group.bench_with_input(BenchmarkId::new("threads", n_threads), &set, |b, set| {
            b.iter(|| black_box(optimize_with(black_box(set), &opts).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dataset_size, bench_thread_scaling);
criterion_main!(benches);
