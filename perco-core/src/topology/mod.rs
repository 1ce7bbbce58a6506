//! Topology generators for regular lattices.
//!
//! Each topology is a pure function from `(width, height)` to a fresh
//! [`NodeGraph`] plus the [`Row`]s that partition it. Nodes are always
//! allocated row by row, so node ids follow row-major generation order.
//! All base topologies tag the first row with [`BoundaryId::TOP`] and the last
//! row with [`BoundaryId::BOTTOM`]; with a single row the bottom tag wins.

mod cylindrical;
mod kagome;
mod rectangular;
mod triangular;

use std::{fmt, num::NonZeroUsize, str::FromStr};

use thiserror::Error;
use tracing::debug;

use crate::{BoundaryId, NodeGraph, Result, Row};

/// Topologies that can serve as the base of a cylindrical lattice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BaseTopology {
    /// Square grid.
    #[default]
    Rectangular,
    /// Square grid with one diagonal per cell.
    Triangular,
    /// Corner-sharing triangles.
    Kagome,
}

impl BaseTopology {
    fn generate(self, width: usize, height: usize) -> Result<GeneratedLattice> {
        match self {
            Self::Rectangular => rectangular::generate(width, height),
            Self::Triangular => triangular::generate(width, height),
            Self::Kagome => kagome::generate(width, height),
        }
    }
}

/// Rule deciding which nodes of a regular lattice are adjacent.
///
/// # Examples
/// ```
/// use perco_core::{BaseTopology, Topology};
///
/// let topology: Topology = "Cylinder-Kagome".parse()?;
/// assert_eq!(topology, Topology::Cylindrical { base: BaseTopology::Kagome });
/// assert_eq!(Topology::Rectangular.name(), "Rectangle");
/// # Ok::<(), perco_core::ParseTopologyError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Square grid: node `i` of row `r` links to node `i` of row `r + 1`.
    #[default]
    Rectangular,
    /// Rectangular links plus the diagonal from node `i` of row `r` to node
    /// `i + 1` of row `r + 1`.
    Triangular,
    /// Dense rows alternating with sparse rows in a period-4 cycle.
    Kagome,
    /// A base topology whose rows are closed into rings.
    Cylindrical {
        /// Topology generated before the rows are wrapped.
        base: BaseTopology,
    },
}

impl Topology {
    /// Returns the persistence token naming this topology.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rectangular => "Rectangle",
            Self::Triangular => "Triangle",
            Self::Kagome => "Kagome",
            Self::Cylindrical {
                base: BaseTopology::Rectangular,
            } => "Cylinder",
            Self::Cylindrical {
                base: BaseTopology::Triangular,
            } => "Cylinder-Triangle",
            Self::Cylindrical {
                base: BaseTopology::Kagome,
            } => "Cylinder-Kagome",
        }
    }

    /// Builds the rows of a `width` × `height` lattice of this topology.
    ///
    /// # Errors
    /// Generation only links nodes it has just allocated, so an error here
    /// signals an internal inconsistency surfaced as
    /// [`crate::LatticeError::UnknownNode`] or
    /// [`crate::LatticeError::RowIndexOutOfBounds`].
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroUsize;
    /// use perco_core::Topology;
    ///
    /// let width = NonZeroUsize::new(4).expect("non-zero");
    /// let height = NonZeroUsize::new(3).expect("non-zero");
    /// let lattice = Topology::Rectangular.generate(width, height)?;
    /// assert_eq!(lattice.rows().len(), 3);
    /// assert_eq!(lattice.graph().len(), 12);
    /// # Ok::<(), perco_core::LatticeError>(())
    /// ```
    pub fn generate(self, width: NonZeroUsize, height: NonZeroUsize) -> Result<GeneratedLattice> {
        debug!(
            topology = self.name(),
            width = width.get(),
            height = height.get(),
            "generating lattice"
        );
        match self {
            Self::Rectangular => rectangular::generate(width.get(), height.get()),
            Self::Triangular => triangular::generate(width.get(), height.get()),
            Self::Kagome => kagome::generate(width.get(), height.get()),
            Self::Cylindrical { base } => cylindrical::generate(base, width.get(), height.get()),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a token does not name a [`Topology`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown topology `{token}`")]
pub struct ParseTopologyError {
    /// The rejected token.
    pub token: String,
}

impl FromStr for Topology {
    type Err = ParseTopologyError;

    fn from_str(token: &str) -> core::result::Result<Self, Self::Err> {
        let topology = match token {
            "Rectangle" => Self::Rectangular,
            "Triangle" => Self::Triangular,
            "Kagome" => Self::Kagome,
            "Cylinder" => Self::Cylindrical {
                base: BaseTopology::Rectangular,
            },
            "Cylinder-Triangle" => Self::Cylindrical {
                base: BaseTopology::Triangular,
            },
            "Cylinder-Kagome" => Self::Cylindrical {
                base: BaseTopology::Kagome,
            },
            other => {
                return Err(ParseTopologyError {
                    token: other.to_owned(),
                });
            }
        };
        Ok(topology)
    }
}

/// Nodes and rows produced by a topology generator.
#[derive(Debug, Clone)]
pub struct GeneratedLattice {
    graph: NodeGraph,
    rows: Vec<Row>,
}

impl GeneratedLattice {
    /// Returns the node arena.
    #[must_use]
    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    /// Returns the rows in generation order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Splits the result into its arena and rows.
    #[must_use]
    pub fn into_parts(self) -> (NodeGraph, Vec<Row>) {
        (self.graph, self.rows)
    }

    /// Tags every row's leftmost node with [`BoundaryId::LEFT`] and rightmost
    /// node with [`BoundaryId::RIGHT`]. Corner nodes lose their top or bottom
    /// tag, and a single-node row ends up tagged right.
    ///
    /// # Errors
    /// Propagates [`crate::LatticeError::UnknownNode`] if a row does not belong
    /// to the arena.
    pub fn tag_sides(&mut self) -> Result<()> {
        for row in &self.rows {
            if let Some(left) = row.leftmost() {
                self.graph.tag(left, BoundaryId::LEFT)?;
            }
            if let Some(right) = row.rightmost() {
                self.graph.tag(right, BoundaryId::RIGHT)?;
            }
        }
        Ok(())
    }
}

/// Links node `i` of `upper` to node `i` of `lower` for every shared index.
fn link_straight(graph: &mut NodeGraph, upper: &Row, lower: &Row) -> Result<()> {
    for (a, b) in upper.iter().zip(lower.iter()) {
        graph.link(a, b)?;
    }
    Ok(())
}

fn tag_top_bottom(graph: &mut NodeGraph, rows: &[Row]) -> Result<()> {
    if let Some(first) = rows.first() {
        for id in first.iter() {
            graph.tag(id, BoundaryId::TOP)?;
        }
    }
    if let Some(last) = rows.last() {
        for id in last.iter() {
            graph.tag(id, BoundaryId::BOTTOM)?;
        }
    }
    Ok(())
}
