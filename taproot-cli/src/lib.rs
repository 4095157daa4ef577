//! Support library for the taproot CLI binary.
//!
//! Exposes the command and logging modules so doctests and tests can drive
//! the compression command without spawning a subprocess.

pub mod cli;
pub mod logging;
