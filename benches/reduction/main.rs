use std::time::Duration;

use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::BatchSize;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use matmax::partition::Partition;
use matmax::reduce;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

pub fn sequential_max_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_max");
    group
        .noise_threshold(0.05)
        .measurement_time(Duration::from_secs(10));
    for num_elements in [1_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(num_elements as u64));
        group.bench_function(BenchmarkId::from_parameter(num_elements), |b| {
            b.iter_batched(
                || setup_elements(num_elements),
                |elements| reduce::max_element(&elements),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

pub fn partition_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    group.noise_threshold(0.05);
    for num_ranks in [4, 64, 1024] {
        group.bench_function(BenchmarkId::from_parameter(num_ranks), |b| {
            b.iter(|| Partition::new(black_box(1_000_000), num_ranks))
        });
    }
    group.finish();
}

#[cfg(not(feature = "mpi"))]
pub fn distributed_max_benchmark(c: &mut Criterion) {
    use matmax::max::run_local_distributed_max;

    let num_elements = 100_000;
    let dimensions = [100, 1_000];
    let mut group = c.benchmark_group("distributed_max");
    group
        .noise_threshold(0.05)
        .measurement_time(Duration::from_secs(20))
        .sample_size(10);
    for num_ranks in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements(num_elements as u64));
        group.bench_function(BenchmarkId::from_parameter(num_ranks), |b| {
            b.iter_batched(
                || setup_elements(num_elements),
                |elements| run_local_distributed_max(num_ranks, &dimensions, &elements),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn setup_elements(num_elements: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(1338);
    (0..num_elements)
        .map(|_| rng.gen_range(-1.0e5..1.0e5))
        .collect()
}

#[cfg(not(feature = "mpi"))]
criterion_group!(
    benches,
    sequential_max_benchmark,
    partition_benchmark,
    distributed_max_benchmark
);
#[cfg(feature = "mpi")]
criterion_group!(benches, sequential_max_benchmark, partition_benchmark);
criterion_main!(benches);
