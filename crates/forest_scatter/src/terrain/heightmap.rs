//! Grid-backed terrain with bilinear height interpolation.
use glam::{Vec2, Vec3};

use crate::error::{Error, Result};
use crate::terrain::TerrainSurface;

/// Heightmap terrain storing normalized heights in [0, 1] on a row-major grid.
///
/// Row `z` holds `width` samples; sample `(0, 0)` sits at the terrain origin and
/// sample `(width - 1, depth - 1)` at the far corner.
#[derive(Clone, Debug)]
pub struct HeightmapTerrain {
    width: usize,
    depth: usize,
    heights: Vec<f32>,
    size: Vec3,
    origin: Vec3,
}

impl HeightmapTerrain {
    /// Creates a heightmap from `width × depth` normalized samples.
    pub fn try_new(width: usize, depth: usize, heights: Vec<f32>, size: Vec3) -> Result<Self> {
        if width < 2 || depth < 2 {
            return Err(Error::InvalidTerrain(format!(
                "heightmap resolution must be at least 2x2, got {width}x{depth}"
            )));
        }
        if heights.len() != width * depth {
            return Err(Error::InvalidTerrain(format!(
                "expected {} height samples, got {}",
                width * depth,
                heights.len()
            )));
        }
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(Error::InvalidTerrain(
                "terrain size must be finite and > 0 in all components".into(),
            ));
        }

        Ok(Self {
            width,
            depth,
            heights,
            size,
            origin: Vec3::ZERO,
        })
    }

    /// Creates a heightmap by sampling `f(u, v)` at every grid vertex.
    pub fn from_fn(
        width: usize,
        depth: usize,
        size: Vec3,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Self> {
        let du = 1.0 / (width.max(2) - 1) as f32;
        let dv = 1.0 / (depth.max(2) - 1) as f32;
        let mut heights = Vec::with_capacity(width * depth);
        for iz in 0..depth {
            for ix in 0..width {
                heights.push(f(ix as f32 * du, iz as f32 * dv).clamp(0.0, 1.0));
            }
        }
        Self::try_new(width, depth, heights, size)
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    /// Grid resolution as `(width, depth)` samples.
    pub fn resolution(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// Raw normalized sample at grid indices, clamped to the grid.
    pub fn get(&self, ix: usize, iz: usize) -> f32 {
        let ix = ix.min(self.width - 1);
        let iz = iz.min(self.depth - 1);
        self.heights[iz * self.width + ix]
    }

    /// Bilinearly interpolated normalized height at `(u, v)`.
    pub fn sample01(&self, u: f32, v: f32) -> f32 {
        let fx = u.clamp(0.0, 1.0) * (self.width - 1) as f32;
        let fz = v.clamp(0.0, 1.0) * (self.depth - 1) as f32;
        let x0 = fx.floor() as usize;
        let z0 = fz.floor() as usize;
        let tx = fx - x0 as f32;
        let tz = fz - z0 as f32;

        let h00 = self.get(x0, z0);
        let h10 = self.get(x0 + 1, z0);
        let h01 = self.get(x0, z0 + 1);
        let h11 = self.get(x0 + 1, z0 + 1);

        let near = h00 + (h10 - h00) * tx;
        let far = h01 + (h11 - h01) * tx;
        near + (far - near) * tz
    }

    /// World-space height gradient `(dh/dx, dh/dz)` by central differences,
    /// one-sided at the terrain edges.
    fn gradient(&self, u: f32, v: f32) -> Vec2 {
        let du = 1.0 / (self.width - 1) as f32;
        let dv = 1.0 / (self.depth - 1) as f32;

        let u0 = (u - du).max(0.0);
        let u1 = (u + du).min(1.0);
        let v0 = (v - dv).max(0.0);
        let v1 = (v + dv).min(1.0);

        let gx = (self.sample01(u1, v) - self.sample01(u0, v)) * self.size.y
            / ((u1 - u0) * self.size.x);
        let gz = (self.sample01(u, v1) - self.sample01(u, v0)) * self.size.y
            / ((v1 - v0) * self.size.z);
        Vec2::new(gx, gz)
    }
}

impl TerrainSurface for HeightmapTerrain {
    fn height(&self, u: f32, v: f32) -> f32 {
        self.sample01(u, v) * self.size.y
    }

    fn slope(&self, u: f32, v: f32) -> f32 {
        self.gradient(u.clamp(0.0, 1.0), v.clamp(0.0, 1.0))
            .length()
            .atan()
            .to_degrees()
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

    fn ramp() -> HeightmapTerrain {
        // Rises by the full height scale across the width: 45 degrees for a cube.
        HeightmapTerrain::from_fn(11, 11, Vec3::splat(100.0), |u, _| u).expect("valid ramp")
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            HeightmapTerrain::try_new(1, 4, vec![0.0; 4], Vec3::ONE),
            Err(Error::InvalidTerrain(_))
        ));
        assert!(matches!(
            HeightmapTerrain::try_new(2, 2, vec![0.0; 3], Vec3::ONE),
            Err(Error::InvalidTerrain(_))
        ));
        assert!(matches!(
            HeightmapTerrain::try_new(2, 2, vec![0.0; 4], Vec3::new(1.0, 0.0, 1.0)),
            Err(Error::InvalidTerrain(_))
        ));
    }

    #[test]
    fn bilinear_interpolation_is_exact_on_linear_surface() {
        let terrain = ramp();
        assert!((terrain.height(0.25, 0.7) - 25.0).abs() < 1e-3);
        assert!((terrain.height(0.0, 0.0)).abs() < 1e-6);
        assert!((terrain.height(1.0, 1.0) - 100.0).abs() < 1e-3);
    }

    #[test]
    fn interpolates_between_grid_vertices() {
        let terrain =
            HeightmapTerrain::try_new(2, 2, vec![0.0, 1.0, 0.0, 1.0], Vec3::new(10.0, 2.0, 10.0))
                .expect("valid grid");
        assert!((terrain.sample01(0.5, 0.5) - 0.5).abs() < 1e-6);
        assert!((terrain.height(0.5, 0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn slope_of_ramp_is_forty_five_degrees_including_edges() {
        let terrain = ramp();
        for (u, v) in [(0.5, 0.5), (0.0, 0.2), (1.0, 0.9)] {
            let slope = terrain.slope(u, v);
            assert!((slope - 45.0).abs() < 0.1, "slope at ({u}, {v}) was {slope}");
        }
    }

    #[test]
    fn flat_heightmap_has_zero_slope() {
        let terrain =
            HeightmapTerrain::from_fn(8, 8, Vec3::new(50.0, 10.0, 50.0), |_, _| 0.3).unwrap();
        assert_eq!(terrain.slope(0.4, 0.6), 0.0);
        assert!((terrain.height(0.4, 0.6) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn origin_is_reported_unchanged() {
        let origin = Vec3::new(-10.0, 5.0, 3.0);
        let terrain = ramp().with_origin(origin);
        assert_eq!(terrain.origin(), origin);
        assert_eq!(terrain.resolution(), (11, 11));
    }
}
