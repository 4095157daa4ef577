//! Property 1: cost equivalence with the Borůvka oracle.
//!
//! Every engine and tie-break combination must produce a tree with the
//! oracle's total weight and `n - 1` edges. The shallow tie-break may pick
//! different edges but never a different cost.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::minimum_spanning_tree;

use super::helpers::costs_match;
use super::oracle::boruvka;
use super::types::MstFixture;

/// Runs the oracle equivalence property for the given fixture.
pub(super) fn run_oracle_equivalence_property(fixture: &MstFixture) -> TestCaseResult {
    let oracle = boruvka(fixture.node_count, &fixture.edges);
    if oracle.component_count != 1 {
        return Err(TestCaseError::fail(format!(
            "generator produced {} components ({})",
            oracle.component_count,
            fixture.describe(),
        )));
    }

    for options in fixture.engine_matrix() {
        let tree = minimum_spanning_tree(fixture.node_count, &fixture.edges, options).map_err(
            |err| TestCaseError::fail(format!("{options:?} failed: {err} ({})", fixture.describe())),
        )?;

        if !costs_match(tree.cost(), oracle.total_weight) {
            return Err(TestCaseError::fail(format!(
                "cost mismatch: {options:?}={}, oracle={} ({})",
                tree.cost(),
                oracle.total_weight,
                fixture.describe(),
            )));
        }

        if tree.edges().len() != oracle.edge_count {
            return Err(TestCaseError::fail(format!(
                "edge count mismatch: {options:?}={}, oracle={} ({})",
                tree.edges().len(),
                oracle.edge_count,
                fixture.describe(),
            )));
        }
    }

    Ok(())
}
