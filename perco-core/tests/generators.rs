//! Adjacency and boundary tagging of the topology generators.

mod common;

use common::{generate, neighbours};
use perco_core::{BaseTopology, BoundaryId, Row, Topology};
use rstest::rstest;

const CYLINDER: Topology = Topology::Cylindrical {
    base: BaseTopology::Rectangular,
};

#[rstest]
#[case(1, 1)]
#[case(5, 3)]
#[case(4, 7)]
fn rectangular_rows_are_full_width(#[case] width: usize, #[case] height: usize) {
    let lattice = generate(Topology::Rectangular, width, height);
    assert_eq!(lattice.graph().len(), width * height);
    assert_eq!(lattice.rows().len(), height);
    assert!(lattice.rows().iter().all(|row| row.len() == width));
}

#[test]
fn rectangular_degrees_depend_on_position() {
    let (width, height) = (5, 4);
    let lattice = generate(Topology::Rectangular, width, height);
    for (r, row) in lattice.rows().iter().enumerate() {
        for (c, id) in row.iter().enumerate() {
            let vertical_edge = r == 0 || r == height - 1;
            let horizontal_edge = c == 0 || c == width - 1;
            let expected = match (vertical_edge, horizontal_edge) {
                (true, true) => 2,
                (true, false) | (false, true) => 3,
                (false, false) => 4,
            };
            let degree = lattice.graph().get(id).expect("node exists").degree();
            assert_eq!(degree, expected, "node {id} at ({r}, {c})");
        }
    }
}

#[rstest]
#[case(0, &[1, 2, 3])]
#[case(1, &[0, 3])]
#[case(2, &[0, 3])]
#[case(3, &[0, 1, 2])]
fn triangular_2x2_adds_one_diagonal(#[case] node: usize, #[case] expected: &[usize]) {
    let lattice = generate(Topology::Triangular, 2, 2);
    assert_eq!(neighbours(&lattice, node), expected);
}

#[rstest]
#[case(0, &[1, 3, 4])]
#[case(1, &[0, 2, 4, 5])]
#[case(2, &[1, 5])]
#[case(3, &[0, 4, 6, 7])]
#[case(4, &[0, 1, 3, 5, 7, 8])]
#[case(8, &[4, 5, 7])]
fn triangular_3x3_neighbourhoods(#[case] node: usize, #[case] expected: &[usize]) {
    let lattice = generate(Topology::Triangular, 3, 3);
    assert_eq!(neighbours(&lattice, node), expected);
}

#[rstest]
#[case(0, &[1, 4, 5])]
#[case(4, &[0, 3, 9])]
#[case(5, &[0, 6, 9, 10])]
#[case(9, &[4, 5, 8, 14])]
#[case(10, &[5, 11, 14])]
#[case(14, &[9, 10, 13])]
fn cylinder_rows_are_rings(#[case] node: usize, #[case] expected: &[usize]) {
    let lattice = generate(CYLINDER, 5, 3);
    assert_eq!(lattice.graph().len(), 15);
    assert_eq!(neighbours(&lattice, node), expected);
}

#[test]
fn cylinder_of_width_one_has_no_self_links() {
    let lattice = generate(CYLINDER, 1, 3);
    assert_eq!(neighbours(&lattice, 1), [0, 2]);
}

#[test]
fn cylinder_keeps_its_base_topology() {
    let lattice = generate(
        Topology::Cylindrical {
            base: BaseTopology::Triangular,
        },
        3,
        2,
    );
    assert_eq!(neighbours(&lattice, 0), [1, 2, 3, 4]);
    assert_eq!(neighbours(&lattice, 2), [0, 1, 5]);
}

#[rstest]
#[case(0, &[1, 3])]
#[case(1, &[0, 2, 3])]
#[case(2, &[1])]
#[case(3, &[0, 1, 4, 5])]
#[case(4, &[3, 5])]
#[case(5, &[3, 4, 6, 7])]
#[case(6, &[5, 7])]
#[case(7, &[5, 6, 9, 10])]
#[case(8, &[9])]
#[case(9, &[7, 8, 10])]
#[case(10, &[7, 9])]
fn kagome_3x5_neighbourhoods(#[case] node: usize, #[case] expected: &[usize]) {
    let lattice = generate(Topology::Kagome, 3, 5);
    assert_eq!(neighbours(&lattice, node), expected);
}

#[rstest]
#[case(0, &[1, 5])]
#[case(2, &[1, 3, 6])]
#[case(6, &[2, 3, 9, 10])]
#[case(8, &[5, 7, 9, 12])]
#[case(11, &[10, 13])]
#[case(12, &[8, 9, 15, 16])]
#[case(13, &[10, 11, 17, 18])]
#[case(14, &[15])]
#[case(18, &[13, 17])]
fn kagome_5x5_neighbourhoods(#[case] node: usize, #[case] expected: &[usize]) {
    let lattice = generate(Topology::Kagome, 5, 5);
    assert_eq!(lattice.graph().len(), 19);
    assert_eq!(neighbours(&lattice, node), expected);
}

#[rstest]
#[case(7, &[4, 6, 8, 10])]
#[case(10, &[7, 8, 12, 13])]
#[case(11, &[12, 15])]
#[case(13, &[10, 12, 14, 16])]
#[case(15, &[11, 12])]
#[case(16, &[13, 14])]
fn kagome_4x6_wraps_into_a_second_period(#[case] node: usize, #[case] expected: &[usize]) {
    let lattice = generate(Topology::Kagome, 4, 6);
    let sizes: Vec<_> = lattice.rows().iter().map(Row::len).collect();
    assert_eq!(sizes, [4, 2, 4, 1, 4, 2]);
    assert_eq!(neighbours(&lattice, node), expected);
}

#[rstest]
#[case(Topology::Rectangular, 4, 3)]
#[case(Topology::Triangular, 3, 4)]
#[case(Topology::Kagome, 5, 5)]
#[case(CYLINDER, 4, 2)]
fn only_first_and_last_rows_are_tagged(
    #[case] topology: Topology,
    #[case] width: usize,
    #[case] height: usize,
) {
    let lattice = generate(topology, width, height);
    let rows = lattice.rows();
    let last = rows.len() - 1;
    for (index, row) in rows.iter().enumerate() {
        let expected = match index {
            0 => Some(BoundaryId::TOP),
            i if i == last => Some(BoundaryId::BOTTOM),
            _ => None,
        };
        for id in row.iter() {
            let node = lattice.graph().get(id).expect("node exists");
            assert_eq!(node.boundary(), expected, "node {id} in row {index}");
        }
    }
}

#[test]
fn side_boundaries_tag_row_ends() {
    let mut lattice = generate(Topology::Kagome, 4, 3);
    lattice.tag_sides().expect("rows belong to the graph");

    let tags: Vec<_> = lattice
        .rows()
        .iter()
        .map(|row| {
            let left = row.leftmost().expect("row is not empty");
            let right = row.rightmost().expect("row is not empty");
            let graph = lattice.graph();
            (
                graph.get(left).expect("node exists").boundary(),
                graph.get(right).expect("node exists").boundary(),
            )
        })
        .collect();
    let sides = (Some(BoundaryId::LEFT), Some(BoundaryId::RIGHT));
    assert_eq!(tags, [sides, sides, sides]);
    let ids: Vec<_> = lattice.graph().boundary_ids().into_iter().collect();
    assert_eq!(
        ids,
        [
            BoundaryId::TOP,
            BoundaryId::BOTTOM,
            BoundaryId::LEFT,
            BoundaryId::RIGHT
        ]
    );
}
