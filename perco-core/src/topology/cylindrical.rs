//! Cylinder generator: closes every row of a base topology into a ring.

use crate::Result;

use super::{BaseTopology, GeneratedLattice};

/// Generates `base` and links each row's leftmost node to its rightmost node.
/// Boundary tags are inherited from the base topology.
pub(super) fn generate(base: BaseTopology, width: usize, height: usize) -> Result<GeneratedLattice> {
    let mut lattice = base.generate(width, height)?;
    let GeneratedLattice { graph, rows } = &mut lattice;
    for row in rows.iter() {
        if let (Some(left), Some(right)) = (row.leftmost(), row.rightmost()) {
            graph.link(left, right)?;
        }
    }
    Ok(lattice)
}
