//! Triangulated grid generator.

use crate::Result;

use super::{GeneratedLattice, rectangular};

/// Builds a rectangular lattice and adds the diagonal from node `i` of row
/// `r` to node `i + 1` of row `r + 1`.
pub(super) fn generate(width: usize, height: usize) -> Result<GeneratedLattice> {
    let mut lattice = rectangular::generate(width, height)?;
    let GeneratedLattice { graph, rows } = &mut lattice;
    for pair in rows.windows(2) {
        let [upper, lower] = pair else {
            continue;
        };
        for (a, b) in upper.iter().zip(lower.iter().skip(1)) {
            graph.link(a, b)?;
        }
    }
    Ok(lattice)
}
