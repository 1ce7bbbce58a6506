//! Rows of nodes created together by a topology generator.

use crate::{LatticeError, NodeGraph, NodeId, Result};

/// Fixed-length, ordered line of nodes.
///
/// A row stores handles into the [`NodeGraph`] that allocated its nodes.
///
/// # Examples
/// ```
/// use perco_core::{NodeGraph, Row};
///
/// let mut graph = NodeGraph::new();
/// let row = Row::new(&mut graph, 3);
/// row.chain_link(&mut graph)?;
/// assert_eq!(row.len(), 3);
/// assert_eq!(graph.get(row.get(1)?)?.degree(), 2);
/// # Ok::<(), perco_core::LatticeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    nodes: Vec<NodeId>,
}

impl Row {
    /// Allocates `size` fresh nodes in `graph` and groups them into a row.
    pub fn new(graph: &mut NodeGraph, size: usize) -> Self {
        let nodes = (0..size).map(|_| graph.add_node()).collect();
        Self { nodes }
    }

    /// Links every node to its immediate successor. The row is not closed
    /// into a ring.
    ///
    /// # Errors
    /// Returns [`LatticeError::UnknownNode`] when the row does not belong to
    /// `graph`.
    pub fn chain_link(&self, graph: &mut NodeGraph) -> Result<()> {
        for pair in self.nodes.windows(2) {
            if let [left, right] = *pair {
                graph.link(left, right)?;
            }
        }
        Ok(())
    }

    /// Returns the number of nodes in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the row holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `index`.
    ///
    /// # Errors
    /// Returns [`LatticeError::RowIndexOutOfBounds`] outside `[0, len)`.
    pub fn get(&self, index: usize) -> Result<NodeId> {
        self.nodes
            .get(index)
            .copied()
            .ok_or(LatticeError::RowIndexOutOfBounds {
                index,
                len: self.nodes.len(),
            })
    }

    /// Returns the node with the lowest index, if the row is not empty.
    #[must_use]
    pub fn leftmost(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    /// Returns the node with the highest index, if the row is not empty.
    #[must_use]
    pub fn rightmost(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Returns the node handles in order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Iterates the node handles in order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}
