use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hashforge::attack::forge;
use hashforge::hash::md4_digest;

fn bench_forge(c: &mut Criterion) {
    let secret = vec![0x42u8; 4096];
    let digest = hex::encode(md4_digest(&secret));

    let mut group = c.benchmark_group("length_extension");
    for suffix_len in [16usize, 1024, 64 * 1024] {
        let suffix = vec![b'x'; suffix_len];
        group.bench_with_input(
            BenchmarkId::from_parameter(suffix_len),
            &suffix,
            |b, suffix| {
                b.iter(|| forge(black_box(&digest), secret.len() as i64, black_box(suffix)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_forge);
criterion_main!(benches);
