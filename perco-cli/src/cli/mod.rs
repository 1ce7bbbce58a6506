//! Command-line interface for generating, infecting and inspecting lattices.
//!
//! `simulate` builds a lattice from a topology and dimensions, infects it with
//! a given probability and optionally saves a snapshot. `inspect` loads a
//! saved snapshot. Both report cluster statistics and the percolation result.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, InspectCommand, SimulateCommand, TopologyArg,
    render_summary, run_cli,
};
