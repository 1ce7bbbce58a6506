//! Lattice vertices and their state flags.
//!
//! Nodes live in a [`crate::NodeGraph`] arena and refer to each other through
//! [`NodeId`] handles, so adjacency never implies ownership.

use std::{cmp::Ordering, fmt, hash::Hash};

use crate::{BoundaryId, LatticeError, Result};

/// Stable handle of a node inside its owning graph.
///
/// Ids are assigned densely in creation order, starting at zero for every
/// freshly generated lattice.
///
/// # Examples
/// ```
/// use perco_core::NodeId;
///
/// let id = NodeId::new(3);
/// assert_eq!(id.index(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates a handle from a raw arena index.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// Returns the arena index behind this handle.
    #[rustfmt::skip]
    #[must_use]
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Substance held by a node during fluid displacement.
///
/// The core only stores this value; it is reset to [`Substance::Empty`]
/// whenever the node stops being infected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Substance {
    /// The node holds nothing.
    #[default]
    Empty,
    /// The displaced substance.
    A,
    /// The displacing substance.
    B,
}

/// Graph vertex carrying infection, clustering and boundary state.
///
/// The state flags cascade: clearing `infected` clears `in_cluster` and the
/// substance, and clearing `in_cluster` clears `in_percolation_cluster`.
/// Equality, ordering and hashing use the id only.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    infected: bool,
    in_cluster: bool,
    in_percolation_cluster: bool,
    visited: bool,
    boundary: Option<BoundaryId>,
    substance: Substance,
    displace_probability: f64,
    label: String,
    neighbours: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            infected: false,
            in_cluster: false,
            in_percolation_cluster: false,
            visited: false,
            boundary: None,
            substance: Substance::Empty,
            displace_probability: 0.0,
            label: String::new(),
            neighbours: Vec::new(),
        }
    }

    /// Returns the node's handle.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns whether the node is infected.
    #[must_use]
    pub fn is_infected(&self) -> bool {
        self.infected
    }

    /// Returns whether the node belongs to a cluster.
    #[must_use]
    pub fn is_in_cluster(&self) -> bool {
        self.in_cluster
    }

    /// Returns whether the node belongs to a percolating cluster.
    #[must_use]
    pub fn is_in_percolation_cluster(&self) -> bool {
        self.in_percolation_cluster
    }

    /// Returns the auxiliary visited flag.
    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Returns the boundary tag, if any.
    #[must_use]
    pub fn boundary(&self) -> Option<BoundaryId> {
        self.boundary
    }

    /// Returns the substance currently held.
    #[must_use]
    pub fn substance(&self) -> Substance {
        self.substance
    }

    /// Returns the displacement probability.
    #[must_use]
    pub fn displace_probability(&self) -> f64 {
        self.displace_probability
    }

    /// Returns the diagnostic label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the adjacent nodes in link order.
    #[must_use]
    pub fn neighbours(&self) -> &[NodeId] {
        &self.neighbours
    }

    /// Returns the number of adjacent nodes.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.neighbours.len()
    }

    /// Sets the infection flag. Clearing it also removes the node from its
    /// cluster and empties its substance.
    pub fn set_infected(&mut self, infected: bool) {
        self.infected = infected;
        if !infected {
            self.clear_cluster();
            self.substance = Substance::Empty;
        }
    }

    /// Sets cluster membership.
    ///
    /// # Errors
    /// Returns [`LatticeError::NodeNotInfected`] when joining a cluster while
    /// uninfected.
    pub fn set_in_cluster(&mut self, in_cluster: bool) -> Result<()> {
        if in_cluster && !self.infected {
            return Err(LatticeError::NodeNotInfected { node: self.id });
        }
        if in_cluster {
            self.in_cluster = true;
        } else {
            self.clear_cluster();
        }
        Ok(())
    }

    /// Sets percolating-cluster membership.
    ///
    /// # Errors
    /// Returns [`LatticeError::NodeNotClustered`] when marking a node that is
    /// not in any cluster.
    pub fn set_in_percolation_cluster(&mut self, in_percolation_cluster: bool) -> Result<()> {
        if in_percolation_cluster && !self.in_cluster {
            return Err(LatticeError::NodeNotClustered { node: self.id });
        }
        self.in_percolation_cluster = in_percolation_cluster;
        Ok(())
    }

    /// Sets the auxiliary visited flag.
    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    /// Sets or clears the boundary tag.
    pub fn set_boundary(&mut self, boundary: Option<BoundaryId>) {
        self.boundary = boundary;
    }

    /// Sets the held substance.
    pub fn set_substance(&mut self, substance: Substance) {
        self.substance = substance;
    }

    /// Sets the displacement probability.
    pub fn set_displace_probability(&mut self, probability: f64) {
        self.displace_probability = probability;
    }

    /// Sets the diagnostic label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Adds `other` to the adjacency list unless it is already present.
    pub(crate) fn link_to(&mut self, other: NodeId) {
        if !self.neighbours.contains(&other) {
            self.neighbours.push(other);
        }
    }

    pub(crate) fn clear_cluster(&mut self) {
        self.in_cluster = false;
        self.in_percolation_cluster = false;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
