use std::sync::Arc;

use forest_scatter::prelude::*;
use forest_scatter_examples::{
    hills_terrain, init_tracing, render_run_result_to_png, KindStyle, RenderConfig,
};
use glam::Vec3;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let terrain = Arc::new(hills_terrain(Vec3::new(1000.0, 120.0, 1000.0))?);
    let kinds = KindRegistry::new()
        .with_kinds(Category::Tree, ["pine", "birch"])
        .with_kinds(Category::Bush, ["fern"]);

    // Defaults: height band 0.2..0.8, max slope 35 degrees, no clusters.
    let config = ForestConfig::new().with_counts(1500, 2500).with_seed(2025);
    let mut generator =
        ForestGenerator::new(config, kinds, InMemoryScene::new()).with_terrain(terrain.clone());
    let result = generator.generate()?;

    let mut rc = RenderConfig::for_terrain((1000, 1000), terrain.as_ref())
        .with_background([90, 140, 90])
        .with_terrain_shading(terrain.as_ref());
    rc.set_kind_style("pine", KindStyle::Circle { color: [20, 70, 30], radius: 3 });
    rc.set_kind_style("birch", KindStyle::Circle { color: [225, 225, 200], radius: 3 });
    rc.set_kind_style("fern", KindStyle::Square { color: [120, 200, 80], half: 1 });

    render_run_result_to_png(&result, &rc, "forest-basic.png")?;
    Ok(())
}
