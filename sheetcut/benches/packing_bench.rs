use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use itertools::Itertools;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};
use sheetcut::entities::{CuttingParameters, Material, Piece};
use sheetcut::packing::{Orchestrator, SplitRule};
use sheetcut::util::OptimizerConfig;
use std::hint::black_box;

criterion_main!(benches);
criterion_group!(benches, split_rule_bench, demand_size_bench);

const DEMAND_SIZES: [usize; 3] = [50, 200, 800];

fn create_demand(n_pieces: usize, seed: u64) -> Vec<Piece> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n_pieces)
        .map(|i| {
            Piece::new(
                format!("p{i}"),
                "PB18",
                rng.random_range(50..1200),
                rng.random_range(50..800),
            )
            .with_rotation(rng.random_bool(0.7))
        })
        .collect_vec()
}

fn catalog() -> Vec<Material> {
    vec![Material::new("PB18", 2800, 2070)]
}

fn params() -> CuttingParameters {
    CuttingParameters {
        kerf: 4,
        top_trim: 10,
        bottom_trim: 10,
        left_trim: 10,
        right_trim: 10,
    }
}

/// Time to pack a fixed demand of 200 pieces with every split rule
fn split_rule_bench(c: &mut Criterion) {
    let pieces = create_demand(200, 0);
    let (catalog, params) = (catalog(), params());

    let mut group = c.benchmark_group("split_rule_200");
    for split_rule in SplitRule::ALL {
        let orchestrator = Orchestrator::new(OptimizerConfig {
            split_rule,
            ..Default::default()
        });
        group.bench_function(BenchmarkId::from_parameter(format!("{split_rule:?}")), |b| {
            b.iter(|| black_box(orchestrator.solve(&pieces, &catalog, &params)))
        });
    }
    group.finish();
}

/// Scaling of the default orchestrator with the number of demanded pieces
fn demand_size_bench(c: &mut Criterion) {
    let (catalog, params) = (catalog(), params());
    let orchestrator = Orchestrator::default();

    let mut group = c.benchmark_group("demand_size");
    for n in DEMAND_SIZES {
        let pieces = create_demand(n, 1);
        group.throughput(criterion::Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| black_box(orchestrator.solve(&pieces, &catalog, &params)))
        });
    }
    group.finish();
}
