//! Lattice orchestration: generation, infection, clustering and the
//! percolation test.

use std::sync::Arc;

use rand::Rng;
use tracing::{Span, debug, field, info, instrument, warn};

use crate::{
    BoundarySet, Cluster, LatticeError, Node, NodeGraph, NodeId, NodeSource, NodeSourceError,
    Result, Row, StructureConfig,
};

/// Minimum margin by which the infection probability must exceed a uniform
/// draw for a node to become infected. A draw equal to the probability leaves
/// the node healthy.
pub const INFECTION_TOLERANCE: f64 = 1e-7;

/// Graph of nodes together with its infection state and discovered clusters.
///
/// Infection and clustering are never observed out of sync: every operation
/// that changes infection flags re-runs cluster discovery before returning.
///
/// # Examples
/// ```
/// use perco_core::{Lattice, StructureConfig, Topology};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let config = StructureConfig::new(6, 6, Topology::Rectangular)?;
/// let mut lattice = Lattice::generated(config)?;
/// let mut rng = SmallRng::seed_from_u64(7);
///
/// lattice.infect(1.0, &mut rng)?;
/// assert_eq!(lattice.clusters().len(), 1);
/// assert!(lattice.has_percolation_cluster()?);
/// # Ok::<(), perco_core::LatticeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Lattice {
    graph: NodeGraph,
    rows: Vec<Row>,
    config: Option<StructureConfig>,
    boundaries: BoundarySet,
    infect_probability: f64,
    clusters: Vec<Cluster>,
    percolating: Option<Vec<usize>>,
}

impl Default for Lattice {
    fn default() -> Self {
        Self::new()
    }
}

impl Lattice {
    /// Creates an empty lattice that has not been generated yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: NodeGraph::new(),
            rows: Vec::new(),
            config: None,
            boundaries: BoundarySet::new(),
            infect_probability: f64::NAN,
            clusters: Vec::new(),
            percolating: None,
        }
    }

    /// Creates a lattice and generates the structure described by `config`.
    ///
    /// # Errors
    /// Propagates generation failures from [`Lattice::generate`].
    pub fn generated(config: StructureConfig) -> Result<Self> {
        let mut lattice = Self::new();
        lattice.generate(config)?;
        Ok(lattice)
    }

    /// Builds a lattice around the nodes produced by an external reader,
    /// bypassing the topology generators. The lattice has no rows and no
    /// structure config.
    ///
    /// # Errors
    /// Returns [`LatticeError::Source`] when the source fails or yields no
    /// nodes.
    ///
    /// # Examples
    /// ```
    /// use perco_core::{BoundaryId, GraphBuilder, Lattice};
    ///
    /// let mut builder = GraphBuilder::new("pair");
    /// let a = builder.add_node("a");
    /// let b = builder.add_node("b");
    /// builder.link(a, b)?;
    /// builder.tag(a, BoundaryId::TOP)?;
    ///
    /// let lattice = Lattice::from_source(&builder)?;
    /// assert_eq!(lattice.len(), 2);
    /// assert!(lattice.rows().is_empty());
    /// assert_eq!(lattice.boundary_count(), 1);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_source<S: NodeSource + ?Sized>(source: &S) -> Result<Self> {
        let wrap = |error: NodeSourceError| LatticeError::Source {
            source_name: Arc::from(source.name()),
            error,
        };
        let graph = source.read().map_err(wrap)?;
        if graph.is_empty() {
            return Err(wrap(NodeSourceError::EmptyGraph));
        }
        debug!(source = source.name(), nodes = graph.len(), "loaded node source");
        let mut lattice = Self::new();
        lattice.boundaries = graph.boundary_ids();
        lattice.graph = graph;
        lattice.reset();
        Ok(lattice)
    }

    /// Replaces the structure with the one described by `config`.
    ///
    /// When `config` equals the structure already held, the rebuild is
    /// skipped. Infection, clusters and auxiliary flags are reset either way.
    ///
    /// # Errors
    /// Generators only link nodes they allocated, so failures indicate an
    /// internal inconsistency reported as [`LatticeError::UnknownNode`] or
    /// [`LatticeError::RowIndexOutOfBounds`].
    #[instrument(
        name = "lattice.generate",
        err,
        skip(self),
        fields(
            topology = %config.topology_token(),
            width = config.width().get(),
            height = config.height().get(),
            skipped = field::Empty,
        ),
    )]
    pub fn generate(&mut self, config: StructureConfig) -> Result<()> {
        if self.config == Some(config) {
            Span::current().record("skipped", true);
            debug!("structure unchanged, skipping regeneration");
            #[cfg(feature = "metrics")]
            metrics::counter!("lattice_generation_skips").increment(1);
            self.reset();
            return Ok(());
        }

        let (graph, rows) = config.build()?.into_parts();
        Span::current().record("skipped", false);
        self.boundaries = graph.boundary_ids();
        self.graph = graph;
        self.rows = rows;
        self.config = Some(config);
        self.reset();
        info!(
            nodes = self.graph.len(),
            boundaries = self.boundaries.len(),
            "lattice generated"
        );
        #[cfg(feature = "metrics")]
        metrics::counter!("lattice_generations").increment(1);
        Ok(())
    }

    /// Infects every node independently with probability `probability` and
    /// re-runs cluster discovery. Returns the number of clusters found.
    ///
    /// A node becomes infected when `probability - u` exceeds
    /// [`INFECTION_TOLERANCE`] for its uniform draw `u` from `[0, 1)`.
    ///
    /// # Errors
    /// Returns [`LatticeError::InvalidProbability`] when `probability` is not
    /// within `[0, 1]`.
    #[instrument(
        name = "lattice.infect",
        err,
        skip(self, rng),
        fields(nodes = self.graph.len(), infected = field::Empty),
    )]
    pub fn infect<R: Rng>(&mut self, probability: f64, rng: &mut R) -> Result<usize> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(LatticeError::InvalidProbability { got: probability });
        }
        for node in self.graph.iter_mut() {
            let draw: f64 = rng.r#gen();
            node.set_infected(probability - draw > INFECTION_TOLERANCE);
        }
        self.infect_probability = probability;
        Span::current().record("infected", self.infected_nodes().count());
        self.find_clusters()
    }

    /// Sets the infection flags from `pattern`, one entry per node in
    /// generation order, and re-runs cluster discovery. Returns the number of
    /// clusters found.
    ///
    /// # Errors
    /// Returns [`LatticeError::PatternLengthMismatch`] when `pattern` does not
    /// have exactly one entry per node. No flag changes in that case.
    ///
    /// # Examples
    /// ```
    /// use perco_core::{Lattice, StructureConfig, Topology};
    ///
    /// let mut lattice = Lattice::generated(StructureConfig::new(3, 1, Topology::Rectangular)?)?;
    /// assert_eq!(lattice.apply_infection(&[true, false, true])?, 2);
    /// # Ok::<(), perco_core::LatticeError>(())
    /// ```
    pub fn apply_infection(&mut self, pattern: &[bool]) -> Result<usize> {
        if pattern.len() != self.graph.len() {
            return Err(LatticeError::PatternLengthMismatch {
                expected: self.graph.len(),
                got: pattern.len(),
            });
        }
        for (node, &infected) in self.graph.iter_mut().zip(pattern) {
            node.set_infected(infected);
        }
        self.find_clusters()
    }

    /// Partitions the infected nodes into clusters, replacing any previous
    /// result. Clusters are ordered by ascending size; clusters of equal size
    /// keep the order of their seeds. Returns the number of clusters.
    ///
    /// # Errors
    /// Cluster growth only follows adjacency inside this lattice, so failures
    /// indicate an internal inconsistency.
    #[instrument(
        name = "lattice.find_clusters",
        err,
        skip(self),
        fields(nodes = self.graph.len(), clusters = field::Empty),
    )]
    pub fn find_clusters(&mut self) -> Result<usize> {
        self.reset_clusters();
        let mut clusters = Vec::new();
        for index in 0..self.graph.len() {
            let id = NodeId::new(index);
            let node = self.graph.get(id)?;
            if node.is_infected() && !node.is_in_cluster() {
                clusters.push(Cluster::grow(&mut self.graph, id)?);
            }
        }
        clusters.sort_by_key(Cluster::size);
        self.clusters = clusters;

        let count = self.clusters.len();
        Span::current().record("clusters", count);
        #[cfg(feature = "metrics")]
        {
            metrics::counter!("lattice_clusters_found").increment(count as u64);
            if let Some(largest) = self.clusters.last() {
                metrics::histogram!("lattice_largest_cluster_size").record(largest.size() as f64);
            }
        }
        Ok(count)
    }

    /// Drops the cluster list and the percolation result and marks every node
    /// as unclustered.
    pub fn reset_clusters(&mut self) {
        self.clusters.clear();
        self.percolating = None;
        for node in self.graph.iter_mut() {
            node.clear_cluster();
        }
    }

    /// Clears the visited flag on every node.
    pub fn reset_visited(&mut self) {
        for node in self.graph.iter_mut() {
            node.set_visited(false);
        }
        debug!(nodes = self.graph.len(), "visited flags cleared");
    }

    /// Clears the infection flag on every node, which also empties the
    /// cluster list.
    pub fn reset_infected(&mut self) {
        for node in self.graph.iter_mut() {
            node.set_infected(false);
        }
        self.clusters.clear();
        self.percolating = None;
        self.infect_probability = f64::NAN;
        debug!(nodes = self.graph.len(), "infection cleared");
    }

    /// Clears clusters, visited flags and infection.
    pub fn reset(&mut self) {
        self.reset_clusters();
        self.reset_visited();
        self.reset_infected();
    }

    /// Runs the percolation test: a cluster percolates when the boundaries it
    /// touches are exactly the boundaries present in the lattice. Members of
    /// percolating clusters are marked, and the result is cached for
    /// [`Lattice::percolation_clusters`].
    ///
    /// # Errors
    /// Returns [`LatticeError::NoBoundaries`] when no node carries a boundary
    /// id.
    #[instrument(
        name = "lattice.percolation",
        err,
        skip(self),
        fields(
            clusters = self.clusters.len(),
            boundaries = self.boundaries.len(),
            percolating = field::Empty,
        ),
    )]
    pub fn has_percolation_cluster(&mut self) -> Result<bool> {
        if self.boundaries.is_empty() {
            warn!("percolation queried on a lattice without boundaries");
            return Err(LatticeError::NoBoundaries);
        }

        let mut percolating = Vec::new();
        for (index, cluster) in self.clusters.iter().enumerate() {
            if !cluster.percolates(&self.boundaries) {
                continue;
            }
            for &member in cluster.members() {
                self.graph.get_mut(member)?.set_in_percolation_cluster(true)?;
            }
            percolating.push(index);
        }

        let found = !percolating.is_empty();
        Span::current().record("percolating", percolating.len());
        self.percolating = Some(percolating);
        Ok(found)
    }

    /// Returns the clusters found by the last percolation test.
    ///
    /// # Errors
    /// Returns [`LatticeError::PercolationNotChecked`] when
    /// [`Lattice::has_percolation_cluster`] has not run since clusters were
    /// last discovered.
    pub fn percolation_clusters(&self) -> Result<Vec<&Cluster>> {
        let indices = self
            .percolating
            .as_ref()
            .ok_or(LatticeError::PercolationNotChecked)?;
        Ok(indices
            .iter()
            .filter_map(|&index| self.clusters.get(index))
            .collect())
    }

    /// Returns the clusters found by the last discovery, ascending by size.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Iterates every node in generation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.iter()
    }

    /// Iterates the infected nodes in generation order.
    pub fn infected_nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.iter().filter(|node| node.is_infected())
    }

    /// Returns the node behind `id`, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.graph.node(id)
    }

    /// Returns the underlying node arena.
    #[must_use]
    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    /// Returns the generated rows. Lattices built from a node source have none.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the structure config, if the lattice was generated.
    #[must_use]
    pub fn config(&self) -> Option<&StructureConfig> {
        self.config.as_ref()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Returns whether the lattice holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Returns every boundary id present in the lattice.
    #[must_use]
    pub fn boundaries(&self) -> &BoundarySet {
        &self.boundaries
    }

    /// Returns the number of distinct boundary ids.
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.boundaries.len()
    }

    /// Returns the probability used by the last [`Lattice::infect`] call, or
    /// `NaN` when infection has not run since the last reset.
    #[must_use]
    pub fn infect_probability(&self) -> f64 {
        self.infect_probability
    }
}

/// Lattices compare equal when they share a structure config, row sizes and
/// the infection flag of every node.
impl PartialEq for Lattice {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.graph.len() == other.graph.len()
            && self.rows.iter().map(Row::len).eq(other.rows.iter().map(Row::len))
            && self
                .graph
                .iter()
                .map(Node::is_infected)
                .eq(other.graph.iter().map(Node::is_infected))
    }
}
