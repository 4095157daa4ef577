//! Property-based tests for the MST engines.
//!
//! Every engine and tie-break combination is checked against an
//! independent Borůvka oracle for total cost, then the produced trees are
//! checked for structural invariants: `n - 1` edges, acyclicity, edges drawn
//! from the input, and (for the Prim engines) an orientation rooted at the
//! start node.

mod equivalence;
mod helpers;
mod oracle;
mod strategies;
mod structural;
mod types;
