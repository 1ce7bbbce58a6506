//! Benchmark setup error type.

use perco_core::LatticeError;

/// Errors that may occur while preparing a benchmark lattice.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Structure validation, generation or infection failed.
    #[error("lattice setup failed: {0}")]
    Lattice(#[from] LatticeError),
}
