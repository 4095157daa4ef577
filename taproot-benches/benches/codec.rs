//! Delta codec benchmarks: encoding against a rooted tree and decoding
//! every vector back.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use taproot_benches::{error::BenchSetupError, params::CodecBenchParams, workload::Workload};
use taproot_core::StorageMatrix;

const SEED: u64 = 7;

const SHAPES: &[(usize, usize)] = &[(200, 64), (200, 512), (1_000, 64)];

fn codec_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("codec");
    group.sample_size(30);

    for &(vector_count, dimension) in SHAPES {
        let workload = Workload::generate(SEED, vector_count, dimension)?;
        let tree = workload.rooted_tree()?;
        let vectors = workload.vectors().as_slice();
        let params = CodecBenchParams {
            vector_count,
            dimension,
        };

        group.bench_with_input(
            BenchmarkId::new("encode", params),
            &(vectors, &tree),
            |b, &(vectors, tree)| {
                b.iter(|| StorageMatrix::from_tree(vectors, tree));
            },
        );

        let matrix = StorageMatrix::from_tree(vectors, &tree)?;
        group.bench_with_input(BenchmarkId::new("decode_all", params), &matrix, |b, matrix| {
            b.iter(|| matrix.reconstruct_all());
        });
    }

    group.finish();
    Ok(())
}

fn codec(c: &mut Criterion) {
    if let Err(err) = codec_impl(c) {
        panic!("codec benchmark setup failed: {err}");
    }
}

criterion_group!(benches, codec);
criterion_main!(benches);
