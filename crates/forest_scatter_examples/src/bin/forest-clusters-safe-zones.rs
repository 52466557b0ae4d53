use forest_scatter::prelude::*;
use forest_scatter_examples::{
    hills_terrain, init_tracing, render_run_result_to_png, KindStyle, RenderConfig,
};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let terrain = hills_terrain(Vec3::new(1000.0, 120.0, 1000.0))?;
    let kinds = KindRegistry::new()
        .with_kinds(Category::Tree, ["pine", "oak"])
        .with_kinds(Category::Bush, ["hazel", "fern"]);

    // A camp in the middle plus a path of small zones running east.
    let camp = ExclusionZone::new(Vec3::new(500.0, 0.0, 500.0), 70.0);
    let path = (1..10)
        .map(|i| ExclusionZone::new(Vec3::new(500.0 + i as f32 * 50.0, 0.0, 500.0), 18.0));
    let zones: Vec<ExclusionZone> = std::iter::once(camp).chain(path).collect();

    let rules = PlacementRules::new()
        .with_height_band(0.15, 0.85)
        .with_max_slope(30.0)
        .with_clusters(
            ClusterSettings::new(12, 90.0)
                .with_edge_falloff(1.5)
                .with_min_weight(0.05),
        )
        .with_height_preference(HeightPreference::new(0.45, 0.3))
        .with_exclusion_zones(zones.clone())
        .with_distance_culling(DistanceCulling::new(Vec3::new(500.0, 60.0, 500.0), 480.0));

    let config = ForestConfig::new()
        .with_counts(2000, 3000)
        .with_rules(rules)
        .with_run(RunConfig::new().with_spawn_multiplier(1.5).with_pass_count(2));
    config.validate()?;

    let mut sink = VecSink::only([ScatterEventKind::PassFinished, ScatterEventKind::Warning]);
    let mut rng = StdRng::seed_from_u64(7);
    let plan = config.plan(&kinds);
    let result =
        run_plan_with_events(&plan, &config.run, &config.rules, &terrain, &mut rng, &mut sink);

    for event in sink.as_slice() {
        match event {
            ScatterEvent::PassFinished {
                layer_index,
                pass,
                evaluated,
                placed,
            } => info!("layer {layer_index} pass {pass}: {placed}/{evaluated} placed"),
            ScatterEvent::Warning { .. } => info!("{event:?}"),
            _ => {}
        }
    }
    for rejection in [
        Rejection::HeightBand,
        Rejection::Slope,
        Rejection::Distance,
        Rejection::ExclusionZone,
        Rejection::WeightRoll,
    ] {
        info!("rejected by {rejection}: {}", result.rejections.get(rejection));
    }

    let mut rc = RenderConfig::for_terrain((1000, 1000), &terrain)
        .with_background([90, 140, 90])
        .with_terrain_shading(&terrain)
        .with_exclusion_zones(zones);
    rc.set_kind_style("pine", KindStyle::Circle { color: [20, 70, 30], radius: 3 });
    rc.set_kind_style("oak", KindStyle::Circle { color: [60, 100, 20], radius: 4 });
    rc.set_kind_style("hazel", KindStyle::Square { color: [150, 110, 60], half: 1 });
    rc.set_kind_style("fern", KindStyle::Square { color: [120, 200, 80], half: 1 });

    render_run_result_to_png(&result, &rc, "forest-clusters-safe-zones.png")?;
    Ok(())
}
