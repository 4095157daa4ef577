//! Benchmark support crate for taproot.
//!
//! Provides seeded vector workloads and parameter labels for the criterion
//! benchmarks of the similarity graph, the MST engines and the delta codec.

pub mod error;
pub mod params;
pub mod workload;
