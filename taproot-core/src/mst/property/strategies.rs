//! Strategy builders for MST property-based tests.
//!
//! Every generator produces a connected graph: a random spanning path is laid
//! down first (or, for Hamming graphs, the graph is complete) and extra edges
//! are added on top.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::{Edge, hamming_edges};

use super::types::{MstFixture, WeightDistribution};

/// Minimum node count for generated graphs.
const MIN_NODES: usize = 2;
/// Maximum node count for most generated graphs.
const MAX_NODES: usize = 48;
/// Maximum node count for dense and Hamming graphs.
const DENSE_MAX_NODES: usize = 24;

/// Generates MST fixtures covering every weight distribution.
pub(super) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (any::<WeightDistribution>(), any::<u64>()).prop_map(|(distribution, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(distribution, &mut rng)
    })
}

/// Generates a fixture for a specific weight distribution.
pub(super) fn generate_fixture(distribution: WeightDistribution, rng: &mut SmallRng) -> MstFixture {
    let (node_count, edges) = match distribution {
        WeightDistribution::Unique => {
            let n = rng.gen_range(MIN_NODES..=MAX_NODES);
            probabilistic_graph(rng, n, (0.1, 0.5), |r| r.gen_range(0.1_f32..100.0))
        }
        WeightDistribution::ManyIdentical => {
            let n = rng.gen_range(MIN_NODES..=MAX_NODES);
            let pool_size = rng.gen_range(1..=3);
            let pool: Vec<f32> = (0..pool_size)
                .map(|_| f32::from(rng.gen_range(1_u8..=10)))
                .collect();
            probabilistic_graph(rng, n, (0.2, 0.6), move |r| pool[r.gen_range(0..pool.len())])
        }
        WeightDistribution::Sparse => generate_sparse(rng),
        WeightDistribution::Dense => {
            let n = rng.gen_range(MIN_NODES..=DENSE_MAX_NODES);
            probabilistic_graph(rng, n, (0.7, 0.95), |r| r.gen_range(0.1_f32..100.0))
        }
        WeightDistribution::Hamming => generate_hamming(rng),
    };
    let start = rng.gen_range(0..node_count);
    MstFixture {
        node_count,
        edges,
        distribution,
        start,
    }
}

/// Lays down a random spanning path over `node_count` nodes.
fn spanning_path(
    rng: &mut SmallRng,
    node_count: usize,
    weight: &mut impl FnMut(&mut SmallRng) -> f32,
) -> Vec<Edge> {
    let mut order: Vec<usize> = (0..node_count).collect();
    order.shuffle(rng);
    order
        .windows(2)
        .map(|pair| Edge::new(pair[0], pair[1], weight(rng)))
        .collect()
}

/// Adds each remaining pair with a probability sampled from `prob_range`.
fn probabilistic_graph(
    rng: &mut SmallRng,
    node_count: usize,
    prob_range: (f64, f64),
    mut weight: impl FnMut(&mut SmallRng) -> f32,
) -> (usize, Vec<Edge>) {
    let mut edges = spanning_path(rng, node_count, &mut weight);
    let probability: f64 = rng.gen_range(prob_range.0..=prob_range.1);
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            if rng.gen_bool(probability) {
                edges.push(Edge::new(i, j, weight(rng)));
            }
        }
    }
    (node_count, edges)
}

fn generate_sparse(rng: &mut SmallRng) -> (usize, Vec<Edge>) {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let mut weight = |r: &mut SmallRng| r.gen_range(0.1_f32..100.0);
    let mut edges = spanning_path(rng, node_count, &mut weight);
    let extra = rng.gen_range(node_count / 2..=node_count);
    for _ in 0..extra {
        let i = rng.gen_range(0..node_count);
        let j = rng.gen_range(0..node_count);
        if i != j {
            edges.push(Edge::new(i, j, weight(rng)));
        }
    }
    (node_count, edges)
}

/// Complete graph over random bit vectors, weighted by Hamming distance.
/// Duplicate vectors yield zero-weight edges.
fn generate_hamming(rng: &mut SmallRng) -> (usize, Vec<Edge>) {
    let node_count = rng.gen_range(MIN_NODES..=DENSE_MAX_NODES);
    let dimension = rng.gen_range(1..=12);
    let vectors: Vec<Vec<u8>> = (0..node_count)
        .map(|_| (0..dimension).map(|_| u8::from(rng.gen_bool(0.5))).collect())
        .collect();
    let edges = hamming_edges(&vectors).expect("generated vectors share one dimension");
    (node_count, edges)
}
