//! Command implementations and argument parsing for the perco CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use perco_core::{BaseTopology, Lattice, LatticeError, StructureConfigBuilder, Topology};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_DIMENSION: usize = 100;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "perco", about = "Simulate site percolation on regular lattices.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a lattice, infect it and report its clusters.
    Simulate(SimulateCommand),
    /// Load a saved snapshot and report its clusters.
    Inspect(InspectCommand),
}

/// Options accepted by the `simulate` command.
#[derive(Debug, Args, Clone)]
pub struct SimulateCommand {
    /// Lattice topology.
    #[arg(long, value_enum, default_value_t = TopologyArg::Rectangle)]
    pub topology: TopologyArg,

    /// Nodes per dense row.
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub width: usize,

    /// Number of rows.
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    pub height: usize,

    /// Tag the first and last node of every row as left and right boundaries.
    #[arg(long)]
    pub side_boundaries: bool,

    /// Probability in `[0, 1]` that a node becomes infected.
    #[arg(long)]
    pub probability: f64,

    /// Seed for the random source; drawn from the OS when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Save the infected lattice as a snapshot at this path.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Options accepted by the `inspect` command.
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Path to a saved snapshot.
    pub path: PathBuf,
}

/// Topologies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopologyArg {
    /// Square grid.
    Rectangle,
    /// Square grid with one diagonal per cell.
    Triangle,
    /// Corner-sharing triangles.
    Kagome,
    /// Square grid with rows closed into rings.
    Cylinder,
    /// Triangular grid with rows closed into rings.
    CylinderTriangle,
    /// Kagome lattice with rows closed into rings.
    CylinderKagome,
}

impl From<TopologyArg> for Topology {
    fn from(value: TopologyArg) -> Self {
        match value {
            TopologyArg::Rectangle => Self::Rectangular,
            TopologyArg::Triangle => Self::Triangular,
            TopologyArg::Kagome => Self::Kagome,
            TopologyArg::Cylinder => Self::Cylindrical {
                base: BaseTopology::Rectangular,
            },
            TopologyArg::CylinderTriangle => Self::Cylindrical {
                base: BaseTopology::Triangular,
            },
            TopologyArg::CylinderKagome => Self::Cylindrical {
                base: BaseTopology::Kagome,
            },
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A snapshot file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Lattice construction, infection or persistence failed.
    #[error(transparent)]
    Core(#[from] LatticeError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Where the lattice came from: `generated` or the snapshot path.
    pub origin: String,
    /// Topology token and dimensions, e.g. `Rectangle 5x5`.
    pub structure: String,
    /// Number of nodes in the lattice.
    pub nodes: usize,
    /// Number of infected nodes.
    pub infected: usize,
    /// Probability used for infection; absent for loaded snapshots.
    pub probability: Option<f64>,
    /// Cluster sizes in ascending order.
    pub cluster_sizes: Vec<usize>,
    /// Number of clusters touching every boundary.
    pub percolating: usize,
    /// Snapshot written by `simulate --output`.
    pub saved: Option<PathBuf>,
}

impl ExecutionSummary {
    /// Returns the size of the largest cluster, or zero without clusters.
    #[must_use]
    pub fn largest_cluster(&self) -> usize {
        self.cluster_sizes.last().copied().unwrap_or(0)
    }

    /// Returns whether any cluster percolates.
    #[must_use]
    pub fn percolates(&self) -> bool {
        self.percolating > 0
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the structure is invalid, the probability is out
/// of range, or a snapshot cannot be read or written.
///
/// # Examples
/// ```
/// use perco_cli::cli::{Cli, Command, SimulateCommand, TopologyArg, run_cli};
///
/// let cli = Cli {
///     command: Command::Simulate(SimulateCommand {
///         topology: TopologyArg::Rectangle,
///         width: 4,
///         height: 3,
///         side_boundaries: false,
///         probability: 1.0,
///         seed: Some(7),
///         output: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.cluster_sizes, vec![12]);
/// assert!(summary.percolates());
/// # Ok::<(), perco_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Simulate(simulate) => {
            Span::current().record("command", field::display("simulate"));
            run_simulate(simulate)
        }
        Command::Inspect(inspect) => {
            Span::current().record("command", field::display("inspect"));
            run_inspect(&inspect)
        }
    }
}

#[instrument(
    name = "cli.simulate",
    err,
    skip(command),
    fields(structure = field::Empty, probability = command.probability, seed = field::Empty),
)]
pub(super) fn run_simulate(command: SimulateCommand) -> Result<ExecutionSummary, CliError> {
    let SimulateCommand {
        topology,
        width,
        height,
        side_boundaries,
        probability,
        seed,
        output,
    } = command;
    let config = StructureConfigBuilder::new()
        .with_width(width)
        .with_height(height)
        .with_topology(topology.into())
        .with_side_boundaries(side_boundaries)
        .build()?;

    let span = Span::current();
    span.record("structure", field::display(&config));
    if let Some(seed) = seed {
        span.record("seed", seed);
    }

    let mut lattice = Lattice::generated(config)?;
    let mut rng = seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
    lattice.infect(probability, &mut rng)?;
    if let Some(path) = &output {
        lattice.save_to_path(path)?;
    }

    let summary = summarise("generated".to_owned(), &mut lattice, output)?;
    info!(
        structure = summary.structure.as_str(),
        clusters = summary.cluster_sizes.len(),
        percolating = summary.percolating,
        "simulation completed"
    );
    Ok(summary)
}

#[instrument(name = "cli.inspect", err, skip(command), fields(path = field::Empty))]
pub(super) fn run_inspect(command: &InspectCommand) -> Result<ExecutionSummary, CliError> {
    let path = command.path.as_path();
    Span::current().record("path", field::display(path.display()));
    let origin = path.display().to_string();
    let reader = open_snapshot(path)?;
    let mut lattice = Lattice::load(reader, &origin)?;

    let summary = summarise(origin, &mut lattice, None)?;
    info!(
        structure = summary.structure.as_str(),
        clusters = summary.cluster_sizes.len(),
        percolating = summary.percolating,
        "inspection completed"
    );
    Ok(summary)
}

pub(super) fn open_snapshot(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn summarise(
    origin: String,
    lattice: &mut Lattice,
    saved: Option<PathBuf>,
) -> Result<ExecutionSummary, CliError> {
    lattice.has_percolation_cluster()?;
    let percolating = lattice.percolation_clusters()?.len();
    let probability = Some(lattice.infect_probability()).filter(|p| !p.is_nan());
    Ok(ExecutionSummary {
        origin,
        structure: lattice
            .config()
            .map_or_else(|| "custom".to_owned(), ToString::to_string),
        nodes: lattice.len(),
        infected: lattice.infected_nodes().count(),
        probability,
        cluster_sizes: lattice.clusters().iter().map(|cluster| cluster.size()).collect(),
        percolating,
        saved,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// use perco_cli::cli::{ExecutionSummary, render_summary};
///
/// let summary = ExecutionSummary {
///     origin: "generated".into(),
///     structure: "Rectangle 2x1".into(),
///     nodes: 2,
///     infected: 1,
///     probability: Some(0.5),
///     cluster_sizes: vec![1],
///     percolating: 1,
///     saved: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8_lossy(&buffer).contains("percolates: yes"));
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "origin: {}", summary.origin)?;
    writeln!(writer, "structure: {}", summary.structure)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "infected: {}", summary.infected)?;
    if let Some(probability) = summary.probability {
        writeln!(writer, "probability: {probability}")?;
    }
    writeln!(writer, "clusters: {}", summary.cluster_sizes.len())?;
    writeln!(writer, "largest cluster: {}", summary.largest_cluster())?;
    writeln!(
        writer,
        "percolates: {} ({} clusters)",
        if summary.percolates() { "yes" } else { "no" },
        summary.percolating
    )?;
    if let Some(path) = &summary.saved {
        writeln!(writer, "saved: {}", path.display())?;
    }
    for (index, size) in summary.cluster_sizes.iter().enumerate() {
        writeln!(writer, "{index}\t{size}")?;
    }
    Ok(())
}
