use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashforge::hash::{md4_digest, Algorithm, HashFunction};

fn bench_md4(c: &mut Criterion) {
    let mut group = c.benchmark_group("md4");
    for size in [64usize, 1024, 16 * 1024, 1024 * 1024] {
        let data = vec![0xa5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| md4_digest(black_box(data)))
        });
    }
    group.finish();
}

fn bench_router(c: &mut Criterion) {
    let data = vec![0x5au8; 16 * 1024];
    let mut group = c.benchmark_group("router");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for algorithm in Algorithm::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm.name()),
            &data,
            |b, data| b.iter(|| algorithm.digest(black_box(data))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_md4, bench_router);
criterion_main!(benches);
