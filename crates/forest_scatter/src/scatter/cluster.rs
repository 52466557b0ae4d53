//! Cluster density field and cluster-center generation.
//!
//! Centers are produced fresh for every run by [`generate_cluster_centers`]; the
//! resulting [`ClusterField`] is an immutable value the evaluator reads from.
use glam::{Vec2, Vec3};
use rand::RngCore;
use tracing::{debug, warn};

use crate::sampling::rand01;
use crate::scatter::evaluator::passes_terrain_filter;
use crate::scatter::rules::{ClusterSettings, HeightPreference, PlacementRules};
use crate::terrain::TerrainSurface;

/// Density field built from world-space cluster centers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterField {
    /// World-space cluster centers.
    pub centers: Vec<Vec3>,
    /// Radius beyond which a center contributes nothing.
    pub radius: f32,
    /// Exponent applied to the linear falloff.
    pub falloff: f32,
}

impl ClusterField {
    pub fn new(centers: Vec<Vec3>, radius: f32, falloff: f32) -> Self {
        Self {
            centers,
            radius,
            falloff,
        }
    }

    /// Builds a field from generated centers and the settings that produced them.
    pub fn from_settings(centers: Vec<Vec3>, settings: &ClusterSettings) -> Self {
        Self::new(centers, settings.radius, settings.edge_falloff)
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Density weight in [0, 1] at world position `p`.
    ///
    /// `max over centers of (1 - clamp01(d / radius))^falloff`, and exactly zero at
    /// or beyond `radius` from every center.
    pub fn weight(&self, p: Vec3) -> f32 {
        if !(self.radius > 0.0) {
            return 0.0;
        }

        self.centers
            .iter()
            .map(|center| {
                let d = center.distance(p);
                if d >= self.radius {
                    0.0
                } else {
                    (1.0 - (d / self.radius).clamp(0.0, 1.0)).powf(self.falloff)
                }
            })
            .fold(0.0f32, f32::max)
    }
}

/// Height preference term `1 - clamp01(|h - center| / range)`.
#[inline]
pub fn height_preference_weight(height01: f32, preference: &HeightPreference) -> f32 {
    1.0 - ((height01 - preference.center).abs() / preference.range).clamp(0.0, 1.0)
}

/// Outcome of cluster-center generation.
#[derive(Clone, Debug, Default)]
pub struct ClusterCenters {
    /// Accepted centers in generation order.
    pub centers: Vec<Vec3>,
    /// Number of centers asked for.
    pub requested: usize,
    /// Draws spent, accepted or not.
    pub attempts: usize,
}

impl ClusterCenters {
    /// Returns `true` if every requested center was found.
    pub fn is_complete(&self) -> bool {
        self.centers.len() >= self.requested
    }
}

/// Draws uniform footprint points and keeps those passing the height/slope filter
/// until `settings.count` centers are found or `settings.max_attempts()` draws are spent.
///
/// Exclusion zones and weights are not consulted. Running out of attempts is not an
/// error: the shortfall is logged and whatever was found is returned.
pub fn generate_cluster_centers<R: RngCore>(
    terrain: &dyn TerrainSurface,
    rules: &PlacementRules,
    settings: &ClusterSettings,
    rng: &mut R,
) -> ClusterCenters {
    let requested = settings.count;
    let max_attempts = settings.max_attempts();
    let footprint = terrain.footprint();
    let origin = terrain.origin();

    let mut centers = Vec::with_capacity(requested);
    let mut attempts = 0;
    while centers.len() < requested && attempts < max_attempts {
        attempts += 1;
        let p = Vec2::new(rand01(rng) * footprint.x, rand01(rng) * footprint.y);
        let uv = p / footprint;
        if !passes_terrain_filter(terrain, rules, uv) {
            continue;
        }
        let height = terrain.height(uv.x, uv.y);
        centers.push(origin + Vec3::new(p.x, height, p.y));
    }

    if centers.len() < requested {
        warn!(
            "Found {} of {} cluster centers after {} attempts.",
            centers.len(),
            requested,
            attempts
        );
    } else {
        debug!(
            "Generated {} cluster centers in {} attempts.",
            centers.len(),
            attempts
        );
    }

    ClusterCenters {
        centers,
        requested,
        attempts,
    }
}
