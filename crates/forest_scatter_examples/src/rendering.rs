use std::collections::HashMap;
use std::path::Path;

use forest_scatter::prelude::*;
use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// How placements of one kind are drawn.
#[derive(Clone, Debug)]
pub enum KindStyle {
    Circle { color: [u8; 3], radius: i32 },
    Square { color: [u8; 3], half: i32 },
}

/// Top-down rendering of a terrain footprint.
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// World-space XZ origin of the rendered area.
    pub origin: Vec2,
    /// World-space XZ size of the rendered area.
    pub extent: Vec2,
    pub background: [u8; 3],
    pub kind_styles: HashMap<String, KindStyle>,
    pub default_style: KindStyle,
    pub exclusion_zones: Vec<ExclusionZone>,
    pub zone_color: [u8; 3],
    pub cluster_color: [u8; 3],
    shading: Option<Vec<u8>>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), extent: Vec2) -> Self {
        Self {
            image_size,
            origin: Vec2::ZERO,
            extent,
            background: [30, 30, 30],
            kind_styles: HashMap::new(),
            default_style: KindStyle::Circle {
                color: [230, 230, 230],
                radius: 2,
            },
            exclusion_zones: Vec::new(),
            zone_color: [220, 70, 60],
            cluster_color: [250, 210, 60],
            shading: None,
        }
    }

    /// Render area matching the footprint of `terrain`.
    pub fn for_terrain(image_size: (u32, u32), terrain: &dyn TerrainSurface) -> Self {
        let origin = terrain.origin();
        let mut config = Self::new(image_size, terrain.footprint());
        config.origin = Vec2::new(origin.x, origin.z);
        config
    }

    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }

    pub fn with_exclusion_zones(mut self, zones: impl IntoIterator<Item = ExclusionZone>) -> Self {
        self.exclusion_zones.extend(zones);
        self
    }

    /// Shades the background by normalized terrain height.
    pub fn with_terrain_shading(mut self, terrain: &dyn TerrainSurface) -> Self {
        let (w, h) = self.image_size;
        let mut shading = Vec::with_capacity((w * h) as usize);
        for py in 0..h {
            for px in 0..w {
                let u = (px as f32 + 0.5) / w as f32;
                let v = (py as f32 + 0.5) / h as f32;
                let level = terrain.height(u, v) / terrain.size().y.max(f32::EPSILON);
                shading.push((40.0 + level.clamp(0.0, 1.0) * 140.0) as u8);
            }
        }
        self.shading = Some(shading);
        self
    }

    pub fn set_kind_style(&mut self, kind_id: impl Into<String>, style: KindStyle) {
        self.kind_styles.insert(kind_id.into(), style);
    }

    fn to_pixel(&self, world: Vec3) -> (i32, i32) {
        let local = (Vec2::new(world.x, world.z) - self.origin) / self.extent;
        (
            (local.x * self.image_size.0 as f32) as i32,
            (local.y * self.image_size.1 as f32) as i32,
        )
    }

    fn world_to_pixels(&self, distance: f32) -> f32 {
        distance / self.extent.x * self.image_size.0 as f32
    }
}

/// Draws placements, cluster centers and exclusion zones and writes a PNG.
pub fn render_run_result_to_png(
    result: &RunResult,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));

    if let Some(shading) = &config.shading {
        for (i, pixel) in img.pixels_mut().enumerate() {
            let l = u16::from(shading[i]);
            let tint = |c: u8| ((u16::from(c) * l) / 160).min(255) as u8;
            *pixel = Rgb(config.background.map(tint));
        }
    }

    for zone in &config.exclusion_zones {
        let (cx, cy) = config.to_pixel(zone.center);
        draw_ring(&mut img, cx, cy, config.world_to_pixels(zone.radius), config.zone_color);
    }

    for placement in &result.placements {
        let style = config
            .kind_styles
            .get(&placement.kind_id)
            .unwrap_or(&config.default_style);
        let (x, y) = config.to_pixel(placement.position);
        match *style {
            KindStyle::Circle { color, radius } => draw_disk(&mut img, x, y, radius, color),
            KindStyle::Square { color, half } => draw_square(&mut img, x, y, half, color),
        }
    }

    for center in &result.cluster_centers {
        let (x, y) = config.to_pixel(*center);
        draw_cross(&mut img, x, y, 6, config.cluster_color);
    }

    let path = path.as_ref();
    img.save(path)?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn draw_disk(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

fn draw_square(img: &mut RgbImage, cx: i32, cy: i32, half: i32, color: [u8; 3]) {
    for dy in -half..=half {
        for dx in -half..=half {
            put(img, cx + dx, cy + dy, color);
        }
    }
}

fn draw_cross(img: &mut RgbImage, cx: i32, cy: i32, arm: i32, color: [u8; 3]) {
    for d in -arm..=arm {
        put(img, cx + d, cy, color);
        put(img, cx, cy + d, color);
    }
}

fn draw_ring(img: &mut RgbImage, cx: i32, cy: i32, radius: f32, color: [u8; 3]) {
    let steps = (radius * 8.0).max(16.0) as i32;
    for i in 0..steps {
        let a = i as f32 / steps as f32 * std::f32::consts::TAU;
        put(
            img,
            cx + (a.cos() * radius) as i32,
            cy + (a.sin() * radius) as i32,
            color,
        );
    }
}
