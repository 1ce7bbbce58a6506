//! Benchmark support crate for perco.
//!
//! Provides parameter types and setup helpers used by the Criterion
//! benchmarks for lattice generation and cluster discovery.

pub mod error;
pub mod params;
