//! Seam for building lattices from externally produced node graphs.

use crate::{BoundaryId, NodeGraph, NodeId, NodeSourceError};

/// Producer of an already linked and boundary-tagged node graph.
///
/// Readers for external formats implement this trait so that
/// [`crate::Lattice::from_source`] can wrap their output without going
/// through a topology generator.
///
/// # Examples
/// ```
/// use perco_core::{Lattice, NodeGraph, NodeSource, NodeSourceError};
///
/// struct Isolated(usize);
///
/// impl NodeSource for Isolated {
///     fn name(&self) -> &str { "isolated" }
///     fn read(&self) -> Result<NodeGraph, NodeSourceError> {
///         let mut graph = NodeGraph::new();
///         for _ in 0..self.0 {
///             graph.add_node();
///         }
///         Ok(graph)
///     }
/// }
///
/// let lattice = Lattice::from_source(&Isolated(3))?;
/// assert_eq!(lattice.len(), 3);
/// # Ok::<(), perco_core::LatticeError>(())
/// ```
pub trait NodeSource {
    /// Returns a human-readable name used in error reports.
    fn name(&self) -> &str;

    /// Produces the node graph.
    ///
    /// # Errors
    /// Implementations return a [`NodeSourceError`] describing why the graph
    /// could not be produced.
    fn read(&self) -> Result<NodeGraph, NodeSourceError>;
}

/// In-memory [`NodeSource`] assembled node by node.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    name: String,
    graph: NodeGraph,
}

impl GraphBuilder {
    /// Creates an empty builder reporting `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: NodeGraph::new(),
        }
    }

    /// Adds a node carrying `label` and returns its handle.
    pub fn add_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = self.graph.add_node();
        if let Ok(node) = self.graph.get_mut(id) {
            node.set_label(label);
        }
        id
    }

    /// Links `a` and `b` in both directions.
    ///
    /// # Errors
    /// Returns [`NodeSourceError::UnknownNode`] when either handle was not
    /// produced by this builder.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> Result<&mut Self, NodeSourceError> {
        self.ensure(a)?;
        self.ensure(b)?;
        self.graph
            .link(a, b)
            .map_err(|_| NodeSourceError::UnknownNode { node: a })?;
        Ok(self)
    }

    /// Tags `id` with `boundary`.
    ///
    /// # Errors
    /// Returns [`NodeSourceError::UnknownNode`] when `id` was not produced by
    /// this builder.
    pub fn tag(&mut self, id: NodeId, boundary: BoundaryId) -> Result<&mut Self, NodeSourceError> {
        self.ensure(id)?;
        self.graph
            .tag(id, boundary)
            .map_err(|_| NodeSourceError::UnknownNode { node: id })?;
        Ok(self)
    }

    /// Returns the number of nodes added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Returns whether no node has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    fn ensure(&self, id: NodeId) -> Result<(), NodeSourceError> {
        match self.graph.node(id) {
            Some(_) => Ok(()),
            None => Err(NodeSourceError::UnknownNode { node: id }),
        }
    }
}

impl NodeSource for GraphBuilder {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<NodeGraph, NodeSourceError> {
        Ok(self.graph.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lattice, LatticeError, NodeSourceErrorCode};

    #[test]
    fn labels_and_tags_are_kept() {
        let mut builder = GraphBuilder::new("labelled");
        let a = builder.add_node("inlet");
        let b = builder.add_node("outlet");
        builder
            .link(a, b)
            .and_then(|builder| builder.tag(b, BoundaryId::BOTTOM))
            .expect("handles are known");

        let graph = builder.read().expect("read succeeds");
        let outlet = graph.get(b).expect("node exists");
        assert_eq!(outlet.label(), "outlet");
        assert_eq!(outlet.boundary(), Some(BoundaryId::BOTTOM));
        assert_eq!(outlet.neighbours(), [a]);
    }

    #[test]
    fn unknown_handles_are_rejected() {
        let mut builder = GraphBuilder::new("sparse");
        let a = builder.add_node("only");
        let err = builder
            .link(a, NodeId::new(4))
            .expect_err("handle is unknown");
        assert_eq!(err, NodeSourceError::UnknownNode { node: NodeId::new(4) });
    }

    #[test]
    fn empty_builder_cannot_back_a_lattice() {
        let builder = GraphBuilder::new("empty");
        assert!(builder.is_empty());
        let err = Lattice::from_source(&builder).expect_err("empty graph");
        assert_eq!(err.source_code(), Some(NodeSourceErrorCode::EmptyGraph));
        let LatticeError::Source { source_name, .. } = err else {
            panic!("expected source error");
        };
        assert_eq!(&*source_name, "empty");
    }
}
