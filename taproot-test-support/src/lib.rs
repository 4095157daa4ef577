//! Shared test utilities used across taproot crates.
//!
//! - [`proptest_profile`] reads the environment overrides that tune property
//!   suites in CI.
//! - [`tracing`] captures spans and events so instrumentation can be
//!   asserted.
//! - [`fixtures`] generates seeded vector families and reference graphs.

pub mod fixtures;
pub mod proptest_profile;
pub mod tracing;
