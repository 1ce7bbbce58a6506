use std::num::NonZeroUsize;

use perco_core::{GeneratedLattice, Lattice, NodeId, StructureConfig, Topology};

/// Generates `width` × `height` nodes of `topology`.
#[must_use]
pub fn generate(topology: Topology, width: usize, height: usize) -> GeneratedLattice {
    topology
        .generate(
            NonZeroUsize::new(width).expect("width is positive"),
            NonZeroUsize::new(height).expect("height is positive"),
        )
        .expect("generation succeeds")
}

/// Returns the sorted neighbour indices of node `index`.
#[must_use]
pub fn neighbours(lattice: &GeneratedLattice, index: usize) -> Vec<usize> {
    let node = lattice
        .graph()
        .get(NodeId::new(index))
        .expect("node exists");
    let mut ids: Vec<_> = node.neighbours().iter().map(|id| id.index()).collect();
    ids.sort_unstable();
    ids
}

/// Builds a generated lattice without infection.
#[must_use]
pub fn lattice(topology: Topology, width: usize, height: usize) -> Lattice {
    let config = StructureConfig::new(width, height, topology).expect("valid config");
    Lattice::generated(config).expect("generation succeeds")
}
