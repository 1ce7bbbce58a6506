//! Benchmark parameter types.

use std::fmt;

use perco_core::{Lattice, StructureConfig, Topology};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Seed used for every infection in the benchmarks.
pub const SEED: u64 = 42;

/// Parameters for a square lattice of one topology.
#[derive(Clone, Copy, Debug)]
pub struct LatticeBenchParams {
    /// Topology to generate.
    pub topology: Topology,
    /// Width and height of the lattice.
    pub side: usize,
}

impl LatticeBenchParams {
    /// Returns the structure config described by these parameters.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Lattice`] when `side` is zero.
    pub fn config(&self) -> Result<StructureConfig, BenchSetupError> {
        Ok(StructureConfig::new(self.side, self.side, self.topology)?)
    }

    /// Generates the lattice and infects it with `probability` using a
    /// generator seeded from [`SEED`].
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Lattice`] when the config is invalid or
    /// `probability` lies outside `[0, 1]`.
    pub fn infected(&self, probability: f64) -> Result<Lattice, BenchSetupError> {
        let mut lattice = Lattice::generated(self.config()?)?;
        let mut rng = SmallRng::seed_from_u64(SEED);
        lattice.infect(probability, &mut rng)?;
        Ok(lattice)
    }
}

impl fmt::Display for LatticeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/n={}", self.topology.name(), self.side)
    }
}
