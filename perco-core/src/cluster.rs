//! Connected components of infected nodes.
//!
//! A cluster is grown breadth-first by scanning its own member list while it
//! is being extended, so the list doubles as the traversal queue and keeps
//! discovery order.

use crate::{BoundarySet, LatticeError, NodeGraph, NodeId, Result};

/// Maximal connected set of infected nodes and the boundaries it touches.
///
/// Equality is structural: two clusters are equal when they hold the same
/// members in the same order and touch the same boundaries.
///
/// # Examples
/// ```
/// use perco_core::{BoundaryId, Cluster, NodeGraph};
///
/// let mut graph = NodeGraph::new();
/// let a = graph.add_node();
/// let b = graph.add_node();
/// graph.link(a, b)?;
/// graph.tag(b, BoundaryId::BOTTOM)?;
/// for id in [a, b] {
///     graph.get_mut(id)?.set_infected(true);
/// }
///
/// let cluster = Cluster::grow(&mut graph, a)?;
/// assert_eq!(cluster.members(), [a, b]);
/// assert!(cluster.touched_boundaries().contains(&BoundaryId::BOTTOM));
/// # Ok::<(), perco_core::LatticeError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cluster {
    members: Vec<NodeId>,
    touched: BoundarySet,
}

impl Cluster {
    /// Collects every infected node reachable from `seed` through infected
    /// nodes, marking each one as clustered.
    ///
    /// # Errors
    /// Returns [`LatticeError::UnknownNode`] when `seed` is not in `graph`,
    /// [`LatticeError::NodeNotInfected`] when it is not infected and
    /// [`LatticeError::NodeAlreadyClustered`] when it already belongs to a
    /// cluster. The graph is untouched in all three cases.
    pub fn grow(graph: &mut NodeGraph, seed: NodeId) -> Result<Self> {
        let node = graph.get(seed)?;
        if !node.is_infected() {
            return Err(LatticeError::NodeNotInfected { node: seed });
        }
        if node.is_in_cluster() {
            return Err(LatticeError::NodeAlreadyClustered { node: seed });
        }

        let mut cluster = Self::default();
        cluster.admit(graph, seed)?;

        let mut cursor = 0;
        while let Some(&current) = cluster.members.get(cursor) {
            cursor += 1;
            let mut slot = 0;
            while let Some(&neighbour) = graph.get(current)?.neighbours().get(slot) {
                slot += 1;
                let candidate = graph.get(neighbour)?;
                if candidate.is_infected() && !candidate.is_in_cluster() {
                    cluster.admit(graph, neighbour)?;
                }
            }
        }
        Ok(cluster)
    }

    fn admit(&mut self, graph: &mut NodeGraph, id: NodeId) -> Result<()> {
        let node = graph.get_mut(id)?;
        node.set_in_cluster(true)?;
        if let Some(boundary) = node.boundary() {
            self.touched.insert(boundary);
        }
        self.members.push(id);
        Ok(())
    }

    /// Returns the number of member nodes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Returns the members in discovery order, starting with the seed.
    #[must_use]
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    /// Returns whether `id` is a member.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    /// Returns the boundary ids carried by at least one member.
    #[must_use]
    pub fn touched_boundaries(&self) -> &BoundarySet {
        &self.touched
    }

    /// Returns whether the cluster touches exactly the boundaries in `all`.
    #[must_use]
    pub fn percolates(&self, all: &BoundarySet) -> bool {
        self.touched == *all
    }
}
