//! Kagome lattice generator.
//!
//! Rows repeat with period four after the first dense row:
//!
//! | row % 4 | kind   | size            | links to the previous row          |
//! |---------|--------|-----------------|------------------------------------|
//! | 1       | sparse | `⌊W/2⌋`         | node `i` → `2i`, `2i + 1`          |
//! | 2       | dense  | `W`             | node `i` → `i / 2`                 |
//! | 3       | sparse | `⌊(W − 1)/2⌋`   | node `i` → `2i + 1`, `2i + 2`      |
//! | 0       | dense  | `W`             | node `i ≥ 1` → `(i − 1) / 2`       |
//!
//! Dense rows are chain-linked. Every sparse node closes one triangle with
//! the dense row above and one with the dense row below, and the shift
//! between rows 1 and 3 makes the triangles share corners.

use tracing::debug;

use crate::{NodeGraph, Result, Row};

use super::{GeneratedLattice, tag_top_bottom};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sparse,
    Dense,
    SparseShifted,
    DenseShifted,
}

impl Phase {
    const fn of(row: usize) -> Self {
        match row % 4 {
            1 => Self::Sparse,
            2 => Self::Dense,
            3 => Self::SparseShifted,
            _ => Self::DenseShifted,
        }
    }
}

pub(super) fn generate(width: usize, height: usize) -> Result<GeneratedLattice> {
    let mut graph = NodeGraph::new();
    let mut rows: Vec<Row> = Vec::new();

    let first = Row::new(&mut graph, width);
    first.chain_link(&mut graph)?;
    rows.push(first);

    for index in 1..height {
        let Some(previous) = rows.last() else {
            break;
        };
        let phase = Phase::of(index);
        let row = match phase {
            Phase::Sparse => sparse_row(&mut graph, previous, width / 2, 0)?,
            Phase::Dense => dense_row(&mut graph, previous, width, 0)?,
            Phase::SparseShifted => {
                sparse_row(&mut graph, previous, width.saturating_sub(1) / 2, 1)?
            }
            Phase::DenseShifted => dense_row(&mut graph, previous, width, 1)?,
        };
        debug!(row = index, ?phase, nodes = row.len(), "generated kagome row");
        rows.push(row);
    }

    tag_top_bottom(&mut graph, &rows)?;
    Ok(GeneratedLattice { graph, rows })
}

/// Each node of the new row links to two adjacent nodes of the dense row
/// above, starting at `offset`.
fn sparse_row(graph: &mut NodeGraph, previous: &Row, size: usize, offset: usize) -> Result<Row> {
    let row = Row::new(graph, size);
    for (i, node) in row.iter().enumerate() {
        let left = previous.get(2 * i + offset)?;
        let right = previous.get(2 * i + 1 + offset)?;
        graph.link(node, left)?;
        graph.link(node, right)?;
    }
    Ok(row)
}

/// Nodes from `skip` onwards link in pairs to the sparse row above; nodes past
/// the end of the sparse row stay unlinked upwards.
fn dense_row(graph: &mut NodeGraph, previous: &Row, width: usize, skip: usize) -> Result<Row> {
    let row = Row::new(graph, width);
    row.chain_link(graph)?;
    for (i, node) in row.iter().enumerate().skip(skip) {
        if let Some(&above) = previous.nodes().get((i - skip) / 2) {
            graph.link(node, above)?;
        }
    }
    Ok(row)
}
