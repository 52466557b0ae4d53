use forest_scatter::prelude::*;
use glam::{Vec2, Vec3};

/// Rolling hills with a valley running diagonally across the map.
pub fn hills_terrain(size: Vec3) -> Result<HeightmapTerrain> {
    HeightmapTerrain::from_fn(257, 257, size, |u, v| {
        let hills = 0.22 * (u * 9.0).sin() * (v * 6.5).cos() + 0.08 * ((u + v) * 21.0).sin();
        let valley = 0.25 * (-((u - v) * 3.0).powi(2)).exp();
        0.55 + hills - valley
    })
}

/// Navigation surface covering every terrain point not steeper than `max_slope`.
pub struct SlopeLimitedNavSurface<'a> {
    pub terrain: &'a dyn TerrainSurface,
    pub max_slope: f32,
}

impl SlopeLimitedNavSurface<'_> {
    /// Projects a footprint-clamped world point onto the terrain surface.
    pub fn project(&self, p: Vec3) -> Vec3 {
        let origin = self.terrain.origin();
        let footprint = self.terrain.footprint();
        let local = Vec2::new(p.x - origin.x, p.z - origin.z).clamp(Vec2::ZERO, footprint);
        let uv = local / footprint;
        origin + Vec3::new(local.x, self.terrain.height(uv.x, uv.y), local.y)
    }

    pub fn is_walkable(&self, p: Vec3) -> bool {
        let origin = self.terrain.origin();
        let uv = Vec2::new(p.x - origin.x, p.z - origin.z) / self.terrain.footprint();
        uv.cmpge(Vec2::ZERO).all()
            && uv.cmple(Vec2::ONE).all()
            && self.terrain.slope(uv.x, uv.y) <= self.max_slope
    }
}

impl NavSurface for SlopeLimitedNavSurface<'_> {
    fn sample_position(&self, target: Vec3, max_distance: f32) -> Option<Vec3> {
        let projected = self.project(target);
        (projected.distance(target) <= max_distance && self.is_walkable(projected))
            .then_some(projected)
    }
}
