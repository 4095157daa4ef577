//! Property 2: structural invariants of every produced tree.
//!
//! - **Edge count**: exactly `n - 1` edges.
//! - **Acyclicity**: union-find never sees an edge inside one component.
//! - **Provenance**: each tree edge is an input edge (either direction,
//!   same weight).
//! - **Orientation**: Prim edges run from an already visited node to a
//!   new one, starting at the requested start node.

use std::collections::HashSet;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{Edge, MstAlgorithm, MstOptions, minimum_spanning_tree};

use super::helpers::find_root;
use super::types::MstFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &MstFixture) -> TestCaseResult {
    let input: HashSet<(usize, usize, u32)> = fixture
        .edges
        .iter()
        .flat_map(|edge| [key(edge), key(&edge.reversed())])
        .collect();

    for options in fixture.engine_matrix() {
        let tree = minimum_spanning_tree(fixture.node_count, &fixture.edges, options).map_err(
            |err| TestCaseError::fail(format!("{options:?} failed: {err} ({})", fixture.describe())),
        )?;
        let edges = tree.edges();

        let expected = fixture.node_count - 1;
        if edges.len() != expected {
            return Err(fail(
                fixture,
                options,
                &format!("edge count {}, expected {expected}", edges.len()),
            ));
        }
        validate_provenance(fixture, options, edges, &input)?;
        validate_acyclicity(fixture, options, edges)?;
        if options.algorithm != MstAlgorithm::Kruskal {
            validate_orientation(fixture, options, edges)?;
        }
    }
    Ok(())
}

fn key(edge: &Edge) -> (usize, usize, u32) {
    (edge.source(), edge.target(), edge.weight().to_bits())
}

fn fail(fixture: &MstFixture, options: MstOptions, message: &str) -> TestCaseError {
    TestCaseError::fail(format!("{options:?}: {message} ({})", fixture.describe()))
}

fn validate_provenance(
    fixture: &MstFixture,
    options: MstOptions,
    edges: &[Edge],
    input: &HashSet<(usize, usize, u32)>,
) -> TestCaseResult {
    for (i, edge) in edges.iter().enumerate() {
        if edge.source() == edge.target() {
            return Err(fail(fixture, options, &format!("edge {i}: self-loop on {}", edge.source())));
        }
        if !input.contains(&key(edge)) {
            return Err(fail(fixture, options, &format!("edge {i}: {edge} is not an input edge")));
        }
    }
    Ok(())
}

fn validate_acyclicity(fixture: &MstFixture, options: MstOptions, edges: &[Edge]) -> TestCaseResult {
    let mut parent: Vec<usize> = (0..fixture.node_count).collect();
    for (i, edge) in edges.iter().enumerate() {
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left == right {
            return Err(fail(fixture, options, &format!("edge {i}: {edge} creates a cycle")));
        }
        parent[right] = left;
    }
    Ok(())
}

fn validate_orientation(fixture: &MstFixture, options: MstOptions, edges: &[Edge]) -> TestCaseResult {
    let mut visited = vec![false; fixture.node_count];
    visited[fixture.start] = true;
    for (i, edge) in edges.iter().enumerate() {
        if !visited[edge.source()] || visited[edge.target()] {
            return Err(fail(
                fixture,
                options,
                &format!("edge {i}: {edge} does not grow the visited set"),
            ));
        }
        visited[edge.target()] = true;
    }
    Ok(())
}
