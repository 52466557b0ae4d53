mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use forest_scatter::prelude::{
    run_plan, Category, ClusterSettings, HeightPreference, KindRegistry, Plan, PlacementRules,
    RunConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const COUNTS: [usize; 3] = [1_000, 5_000, 20_000];
const PASSES: [u32; 2] = [1, 3];

fn registry() -> KindRegistry {
    KindRegistry::new()
        .with_kinds(Category::Tree, ["pine", "oak", "birch", "spruce"])
        .with_kinds(Category::Bush, ["fern", "holly"])
}

fn scatter_plan_benches(c: &mut Criterion) {
    let terrain = common::hills_terrain();
    let rules = PlacementRules::default()
        .with_clusters(ClusterSettings::new(24, 90.0).with_min_weight(0.15))
        .with_height_preference(HeightPreference::new(0.45, 0.3));

    for &passes in &PASSES {
        let mut group = c.benchmark_group(format!("scatter/run_plan/passes_{passes}"));
        let config = RunConfig::new()
            .with_spawn_multiplier(1.5)
            .with_pass_count(passes);

        for &count in &COUNTS {
            let plan = Plan::from_registry(&registry(), count, count);
            group.throughput(common::elements_throughput(
                config.draws_per_pass(count) * 2 * passes as usize,
            ));

            let mut rng = StdRng::seed_from_u64(0x5CA7_u64 ^ count as u64 ^ passes as u64);
            group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
                b.iter(|| {
                    let result = run_plan(&plan, &config, &rules, &terrain, &mut rng, None);
                    black_box(result.placements.len());
                });
            });
        }

        group.finish();
    }
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = scatter_plan_benches
}
criterion_main!(benches);
