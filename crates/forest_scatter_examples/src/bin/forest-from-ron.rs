use std::sync::Arc;

use forest_scatter::prelude::*;
use forest_scatter_examples::{
    hills_terrain, init_tracing, load_preset, render_run_result_to_png, RenderConfig,
};
use glam::Vec3;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let path = std::env::args().nth(1).unwrap_or_else(|| {
        format!("{}/assets/forest.ron", env!("CARGO_MANIFEST_DIR"))
    });
    let preset = load_preset(&path)?;
    let terrain = Arc::new(hills_terrain(Vec3::new(1000.0, 120.0, 1000.0))?);

    let mut generator = ForestGenerator::new(
        preset.forest.clone(),
        preset.registry(),
        InMemoryScene::new(),
    )
    .with_terrain(terrain.clone());

    let first = generator.generate()?;
    // Rebuilding releases the previous objects before scattering again.
    let rebuilt = generator.rebuild()?;
    info!(
        "first run: {} objects, rebuild: {} objects, scene holds {}",
        first.placements.len(),
        rebuilt.placements.len(),
        generator.scene().child_count()
    );

    let rc = RenderConfig::for_terrain((800, 800), terrain.as_ref())
        .with_background([90, 140, 90])
        .with_terrain_shading(terrain.as_ref())
        .with_exclusion_zones(preset.forest.rules.exclusion_zones.iter().cloned());
    render_run_result_to_png(&rebuilt, &rc, "forest-from-ron.png")?;
    Ok(())
}
