mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use forest_scatter::prelude::{
    ClusterField, ClusterSettings, Evaluator, ExclusionZone, PlacementRules, PositionSampling,
    UniformRandomSampling,
};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

const CENTER_COUNTS: [usize; 4] = [0, 8, 32, 128];
const CANDIDATES: usize = 10_000;

fn evaluator_cluster_benches(c: &mut Criterion) {
    let terrain = common::hills_terrain();
    let mut group = c.benchmark_group("evaluator/clusters");
    group.throughput(common::elements_throughput(CANDIDATES));

    let mut rng = StdRng::seed_from_u64(0xE7A1);
    let candidates: Vec<Vec2> = UniformRandomSampling::new(CANDIDATES)
        .generate(Vec2::new(1000.0, 1000.0).into(), &mut rng)
        .into_iter()
        .map(Vec2::from)
        .collect();

    for &centers in &CENTER_COUNTS {
        let rules = PlacementRules::default()
            .with_clusters(ClusterSettings::new(centers, 80.0))
            .with_exclusion_zones((0..16).map(|i| {
                ExclusionZone::new(Vec3::new(60.0 * i as f32, 0.0, 500.0), 12.0)
            }));
        let field = ClusterField::new(
            (0..centers)
                .map(|i| Vec3::new((i * 37 % 1000) as f32, 300.0, (i * 91 % 1000) as f32))
                .collect(),
            80.0,
            1.5,
        );
        let evaluator = Evaluator::new(&terrain, &rules, &field);

        group.bench_with_input(BenchmarkId::from_parameter(centers), &centers, |b, _| {
            b.iter(|| {
                let allowed = candidates
                    .iter()
                    .filter(|&&p| evaluator.evaluate(p).allowed())
                    .count();
                black_box(allowed);
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = evaluator_cluster_benches
}
criterion_main!(benches);
