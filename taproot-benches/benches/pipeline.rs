//! End-to-end compression benchmarks, including similarity graph
//! generation, which dominates for large vector counts.
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
use taproot_core::{TaprootBuilder, hamming_edges};

const SEED: u64 = 11;

const SHAPES: &[(usize, usize)] = &[(100, 128), (400, 128)];

fn pipeline_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(10);
    let taproot = TaprootBuilder::new().build()?;

    for &(vector_count, dimension) in SHAPES {
        let workload = Workload::generate(SEED, vector_count, dimension)?;
        let params = CodecBenchParams {
            vector_count,
            dimension,
        };

        group.bench_with_input(
            BenchmarkId::new("hamming_edges", params),
            workload.vectors(),
            |b, vectors| {
                b.iter(|| hamming_edges(vectors));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("compress", params),
            workload.vectors(),
            |b, vectors| {
                b.iter(|| taproot.compress(vectors));
            },
        );
    }

    group.finish();
    Ok(())
}

fn pipeline(c: &mut Criterion) {
    if let Err(err) = pipeline_impl(c) {
        panic!("pipeline benchmark setup failed: {err}");
    }
}

criterion_group!(benches, pipeline);
criterion_main!(benches);
