//! Support library for the `perco` binary.
//!
//! Exposes the command pipeline and logging set-up so doctests and
//! integration tests can drive them without spawning a subprocess.

pub mod cli;
pub mod logging;
