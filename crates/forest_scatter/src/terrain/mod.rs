//! Terrain surfaces queried by the scatter pipeline.
//!
//! The sampler never owns terrain data. It reads heights and steepness through
//! [`TerrainSurface`], which a host engine implements over its own storage.
//! [`FlatTerrain`] and [`HeightmapTerrain`] cover tests, demos and headless use.
use glam::{Vec2, Vec3};

pub mod heightmap;

pub use heightmap::HeightmapTerrain;

/// Read-only height/slope query surface over normalized coordinates `u, v ∈ [0, 1]`.
pub trait TerrainSurface: Send + Sync {
    /// Height in world units above [`TerrainSurface::origin`] at `(u, v)`.
    fn height(&self, u: f32, v: f32) -> f32;

    /// Local steepness in degrees at `(u, v)`.
    fn slope(&self, u: f32, v: f32) -> f32;

    /// Physical size `(width, height scale, depth)`. All components are strictly positive.
    fn size(&self) -> Vec3;

    /// World-space position of the terrain's `(0, 0)` corner.
    fn origin(&self) -> Vec3;

    /// Horizontal footprint `(width, depth)` in world units.
    fn footprint(&self) -> Vec2 {
        let size = self.size();
        Vec2::new(size.x, size.z)
    }
}

/// Maps a footprint position `(x, z)` to normalized `(u, v)` coordinates.
#[inline]
pub fn normalized(terrain: &dyn TerrainSurface, footprint: Vec2) -> Vec2 {
    footprint / terrain.footprint()
}

/// Terrain with a constant normalized height and a constant reported slope.
#[derive(Debug, Clone)]
pub struct FlatTerrain {
    /// Physical size `(width, height scale, depth)`.
    pub size: Vec3,
    /// World-space corner position.
    pub origin: Vec3,
    /// Normalized height in [0, 1] reported everywhere.
    pub height01: f32,
    /// Slope in degrees reported everywhere.
    pub slope: f32,
}

impl FlatTerrain {
    pub fn new(size: Vec3, height01: f32) -> Self {
        Self {
            size,
            origin: Vec3::ZERO,
            height01,
            slope: 0.0,
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_slope(mut self, slope: f32) -> Self {
        self.slope = slope;
        self
    }
}

impl TerrainSurface for FlatTerrain {
    fn height(&self, _u: f32, _v: f32) -> f32 {
        self.height01 * self.size.y
    }

    fn slope(&self, _u: f32, _v: f32) -> f32 {
        self.slope
    }

    fn size(&self) -> Vec3 {
        self.size
    }

    fn origin(&self) -> Vec3 {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_terrain_scales_height_by_size() {
        let terrain = FlatTerrain::new(Vec3::new(100.0, 40.0, 100.0), 0.5);
        assert_eq!(terrain.height(0.1, 0.9), 20.0);
        assert_eq!(terrain.slope(0.3, 0.3), 0.0);
    }

    #[test]
    fn normalized_divides_by_footprint() {
        let terrain = FlatTerrain::new(Vec3::new(200.0, 1.0, 50.0), 0.0);
        let uv = normalized(&terrain, Vec2::new(50.0, 25.0));
        assert_eq!(uv, Vec2::new(0.25, 0.5));
    }
}
