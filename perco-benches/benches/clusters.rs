//! Infection, cluster discovery and percolation benchmarks.
//!
//! Generation happens once per parameter set; the measured loops re-run
//! infection or cluster discovery on the same lattice.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
#![expect(
    clippy::shadow_reuse,
    reason = "Criterion bench_with_input closures rebind parameter names"
)]
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use perco_benches::{
    error::BenchSetupError,
    params::{LatticeBenchParams, SEED},
};
use perco_core::Topology;

const SIDES: &[usize] = &[64, 256];

/// Square-lattice site percolation threshold, rounded.
const THRESHOLD: f64 = 0.593;

/// Probabilities below, near and above [`THRESHOLD`].
const PROBABILITIES: &[f64] = &[0.4, THRESHOLD, 0.8];

fn find_clusters_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("find_clusters");
    group.sample_size(20);

    for &side in SIDES {
        for &probability in PROBABILITIES {
            let params = LatticeBenchParams {
                topology: Topology::Rectangular,
                side,
            };
            let mut lattice = params.infected(probability)?;
            lattice.has_percolation_cluster()?;
            group.bench_with_input(
                BenchmarkId::new(params.to_string(), probability),
                &probability,
                |b, _| {
                    b.iter(|| {
                        black_box(lattice.find_clusters().ok());
                        black_box(lattice.has_percolation_cluster().ok());
                    });
                },
            );
        }
    }

    group.finish();
    Ok(())
}

fn infect_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("infect");
    group.sample_size(20);

    for &topology in &[Topology::Rectangular, Topology::Kagome] {
        let params = LatticeBenchParams { topology, side: 256 };
        let mut lattice = params.infected(0.0)?;
        let mut rng = SmallRng::seed_from_u64(SEED);
        lattice.infect(THRESHOLD, &mut rng)?;
        group.bench_with_input(BenchmarkId::from_parameter(params), &THRESHOLD, |b, &probability| {
            b.iter(|| black_box(lattice.infect(probability, &mut rng).ok()));
        });
    }

    group.finish();
    Ok(())
}

fn find_clusters(c: &mut Criterion) {
    if let Err(err) = find_clusters_impl(c) {
        panic!("find_clusters benchmark setup failed: {err}");
    }
}

fn infect(c: &mut Criterion) {
    if let Err(err) = infect_impl(c) {
        panic!("infect benchmark setup failed: {err}");
    }
}

criterion_group!(benches, find_clusters, infect);
criterion_main!(benches);
