//! Square grid generator.

use crate::{NodeGraph, Result, Row};

use super::{GeneratedLattice, link_straight, tag_top_bottom};

/// Builds `height` chain-linked rows of `width` nodes, linking node `i` of each
/// row to node `i` of the next.
pub(super) fn generate(width: usize, height: usize) -> Result<GeneratedLattice> {
    let mut graph = NodeGraph::new();
    let mut rows: Vec<Row> = Vec::new();

    let first = Row::new(&mut graph, width);
    first.chain_link(&mut graph)?;
    rows.push(first);

    for _ in 1..height {
        let row = Row::new(&mut graph, width);
        if let Some(previous) = rows.last() {
            link_straight(&mut graph, previous, &row)?;
        }
        row.chain_link(&mut graph)?;
        rows.push(row);
    }

    tag_top_bottom(&mut graph, &rows)?;
    Ok(GeneratedLattice { graph, rows })
}
