//! Property tests for clustering, percolation and snapshot round trips over
//! random lattices.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};

use crate::test_utils::suite_proptest_config;
use crate::{BaseTopology, BoundaryId, Lattice, Node, StructureConfig, Topology};

fn topology_strategy() -> impl Strategy<Value = Topology> {
    prop_oneof![
        Just(Topology::Rectangular),
        Just(Topology::Triangular),
        Just(Topology::Kagome),
        Just(Topology::Cylindrical {
            base: BaseTopology::Rectangular
        }),
        Just(Topology::Cylindrical {
            base: BaseTopology::Triangular
        }),
        Just(Topology::Cylindrical {
            base: BaseTopology::Kagome
        }),
    ]
}

fn config_strategy() -> impl Strategy<Value = StructureConfig> {
    (1usize..=12, 1usize..=12, topology_strategy(), any::<bool>()).prop_map(
        |(width, height, topology, sides)| {
            StructureConfig::new(width, height, topology)
                .expect("strategy yields positive dimensions")
                .with_side_boundaries(sides)
        },
    )
}

fn infected(config: StructureConfig, probability: f64, seed: u64) -> Lattice {
    let mut lattice = Lattice::generated(config).expect("generation succeeds");
    let mut rng = SmallRng::seed_from_u64(seed);
    lattice
        .infect(probability, &mut rng)
        .expect("probability is in range");
    lattice
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn clusters_partition_infected_nodes(
        config in config_strategy(),
        probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let lattice = infected(config, probability, seed);

        let mut owners = vec![0usize; lattice.len()];
        for cluster in lattice.clusters() {
            for member in cluster.members() {
                owners[member.index()] += 1;
            }
        }
        for node in lattice.nodes() {
            let expected = usize::from(node.is_infected());
            prop_assert_eq!(owners[node.id().index()], expected);
            prop_assert_eq!(node.is_in_cluster(), node.is_infected());
        }
        let total: usize = lattice.clusters().iter().map(|cluster| cluster.size()).sum();
        prop_assert_eq!(total, lattice.infected_nodes().count());
    }

    #[test]
    fn clusters_are_sorted_by_size(
        config in config_strategy(),
        probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let lattice = infected(config, probability, seed);
        let sizes: Vec<_> = lattice.clusters().iter().map(|cluster| cluster.size()).collect();
        prop_assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn percolating_clusters_touch_every_boundary(
        config in config_strategy(),
        probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut lattice = infected(config, probability, seed);
        let found = lattice.has_percolation_cluster().expect("generated lattices have boundaries");
        let all = lattice.boundaries().clone();
        let percolating = lattice.percolation_clusters().expect("percolation was checked");

        prop_assert_eq!(found, !percolating.is_empty());
        let expected = lattice
            .clusters()
            .iter()
            .filter(|cluster| cluster.touched_boundaries() == &all)
            .count();
        prop_assert_eq!(percolating.len(), expected);
        for node in lattice.nodes() {
            let member = percolating.iter().any(|cluster| cluster.contains(node.id()));
            prop_assert_eq!(node.is_in_percolation_cluster(), member);
        }
    }

    #[test]
    fn rectangular_percolation_spans_top_to_bottom(
        width in 1usize..=10,
        height in 2usize..=10,
        probability in 0.3f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = StructureConfig::new(width, height, Topology::Rectangular)
            .expect("positive dimensions");
        let mut lattice = infected(config, probability, seed);
        lattice.has_percolation_cluster().expect("boundaries exist");
        for cluster in lattice.percolation_clusters().expect("percolation was checked") {
            let boundaries: Vec<_> = cluster
                .members()
                .iter()
                .filter_map(|&id| lattice.node(id).and_then(Node::boundary))
                .collect();
            prop_assert!(boundaries.contains(&BoundaryId::TOP));
            prop_assert!(boundaries.contains(&BoundaryId::BOTTOM));
        }
    }

    #[test]
    fn snapshots_round_trip_infection(
        config in config_strategy(),
        probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let lattice = infected(config, probability, seed);
        let mut buffer = Vec::new();
        lattice.save(&mut buffer, "buffer").expect("save succeeds");

        let restored = Lattice::load(buffer.as_slice(), "buffer").expect("load succeeds");
        prop_assert_eq!(restored.config(), lattice.config());
        let before: Vec<_> = lattice.nodes().map(Node::is_infected).collect();
        let after: Vec<_> = restored.nodes().map(Node::is_infected).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(restored.clusters(), lattice.clusters());
    }
}
