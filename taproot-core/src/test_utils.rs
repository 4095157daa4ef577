//! Shared test utilities for `taproot-core`.

use proptest::test_runner::Config as ProptestConfig;
use taproot_test_support::proptest_profile::ProptestRunProfile;

/// Builds a proptest configuration from the shared run profile so every
/// property suite honours `PROGTEST_CASES` and `TAPROOT_PBT_FORK`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}
