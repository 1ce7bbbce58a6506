//! Dense node arena shared by generators, node sources and lattices.
//!
//! The arena is also the id allocator: a node's [`NodeId`] is its index, so a
//! freshly built graph always numbers its nodes from zero in creation order.

use crate::{BoundaryId, BoundarySet, LatticeError, Node, NodeId, Result};

/// Arena of [`Node`]s addressed by [`NodeId`].
///
/// # Examples
/// ```
/// use perco_core::NodeGraph;
///
/// let mut graph = NodeGraph::new();
/// let a = graph.add_node();
/// let b = graph.add_node();
/// graph.link(a, b)?;
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.get(a)?.neighbours(), [b]);
/// # Ok::<(), perco_core::LatticeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Allocates a fresh node and returns its handle.
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(id));
        id
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node behind `id`, if it exists.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Returns the node behind `id`.
    ///
    /// # Errors
    /// Returns [`LatticeError::UnknownNode`] when `id` is not part of the graph.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.node(id).ok_or(LatticeError::UnknownNode { node: id })
    }

    /// Returns mutable access to the node behind `id`.
    ///
    /// # Errors
    /// Returns [`LatticeError::UnknownNode`] when `id` is not part of the graph.
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or(LatticeError::UnknownNode { node: id })
    }

    /// Links `a` and `b` in both directions. Both handles are checked before
    /// either adjacency list changes. Linking a node to itself is a no-op.
    ///
    /// # Errors
    /// Returns [`LatticeError::UnknownNode`] when either handle is unknown.
    pub fn link(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        self.get(a)?;
        self.get(b)?;
        if a == b {
            return Ok(());
        }
        self.get_mut(a)?.link_to(b);
        self.get_mut(b)?.link_to(a);
        Ok(())
    }

    /// Tags `id` with `boundary`, replacing any previous tag.
    ///
    /// # Errors
    /// Returns [`LatticeError::UnknownNode`] when `id` is unknown.
    pub fn tag(&mut self, id: NodeId, boundary: BoundaryId) -> Result<()> {
        self.get_mut(id)?.set_boundary(Some(boundary));
        Ok(())
    }

    /// Iterates every node in id order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Node> {
        self.nodes.iter_mut()
    }

    /// Collects every boundary id carried by at least one node.
    #[must_use]
    pub fn boundary_ids(&self) -> BoundarySet {
        self.nodes.iter().filter_map(Node::boundary).collect()
    }
}

impl<'a> IntoIterator for &'a NodeGraph {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
