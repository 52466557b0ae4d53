//! Acceptance rules applied to every candidate of a run.
//!
//! [`PlacementRules`] gathers the height band, slope limit, optional density field
//! ([`ClusterSettings`]), optional [`HeightPreference`], exclusion zones and
//! distance culling. Rules are plain data; evaluation lives in
//! [`crate::scatter::evaluator`].
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A disk on the horizontal plane where placement is always rejected.
///
/// Used for safe zones around points of interest and for path corridors.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExclusionZone {
    /// World-space center. Only `x` and `z` take part in the containment test.
    pub center: Vec3,
    /// Radius in world units.
    pub radius: f32,
}

impl ExclusionZone {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns `true` if `p` lies inside the zone or on its boundary.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        let dx = p.x - self.center.x;
        let dz = p.z - self.center.z;
        dx * dx + dz * dz <= self.radius * self.radius
    }
}

/// Rejects candidates farther than `max_distance` from `viewer`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceCulling {
    pub viewer: Vec3,
    pub max_distance: f32,
}

impl DistanceCulling {
    pub fn new(viewer: Vec3, max_distance: f32) -> Self {
        Self {
            viewer,
            max_distance,
        }
    }

    #[inline]
    pub fn is_within(&self, p: Vec3) -> bool {
        p.distance_squared(self.viewer) <= self.max_distance * self.max_distance
    }
}

/// Density field settings: how cluster centers are generated and how they weight candidates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterSettings {
    /// Number of cluster centers to generate per run.
    pub count: usize,
    /// Radius in world units beyond which a center contributes nothing.
    pub radius: f32,
    /// Exponent applied to the linear falloff `1 - d / radius`.
    pub edge_falloff: f32,
    /// Floor applied to the computed weight before the accept/reject draw.
    pub min_weight: f32,
    /// Draws allowed per requested center before generation gives up.
    pub attempts_per_center: usize,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            count: 8,
            radius: 60.0,
            edge_falloff: 1.5,
            min_weight: 0.1,
            attempts_per_center: 20,
        }
    }
}

impl ClusterSettings {
    pub fn new(count: usize, radius: f32) -> Self {
        Self {
            count,
            radius,
            ..Default::default()
        }
    }

    pub fn with_edge_falloff(mut self, edge_falloff: f32) -> Self {
        self.edge_falloff = edge_falloff;
        self
    }

    pub fn with_min_weight(mut self, min_weight: f32) -> Self {
        self.min_weight = min_weight;
        self
    }

    pub fn with_attempts_per_center(mut self, attempts: usize) -> Self {
        self.attempts_per_center = attempts;
        self
    }

    /// Upper bound on draws made while generating centers.
    pub fn max_attempts(&self) -> usize {
        self.count.saturating_mul(self.attempts_per_center)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius >= 0.0) || !self.radius.is_finite() {
            return Err(Error::InvalidConfig(
                "cluster radius must be finite and >= 0".into(),
            ));
        }
        if !(self.edge_falloff >= 0.0) || !self.edge_falloff.is_finite() {
            return Err(Error::InvalidConfig(
                "cluster edge_falloff must be finite and >= 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_weight) {
            return Err(Error::InvalidConfig(
                "cluster min_weight must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Extra weight term favouring a normalized elevation.
///
/// The term is `1 - clamp01(|h - center| / range)`. It is combined with the
/// cluster weight as `cluster * cluster_factor + preference * height_factor`
/// and clamped afterwards, so the sum may saturate at 1.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct HeightPreference {
    /// Preferred normalized height.
    pub center: f32,
    /// Normalized distance from `center` at which the term reaches zero.
    pub range: f32,
    /// Factor applied to the cluster weight when blending.
    pub cluster_factor: f32,
    /// Factor applied to the height term when blending.
    pub height_factor: f32,
}

impl Default for HeightPreference {
    fn default() -> Self {
        Self {
            center: 0.5,
            range: 0.3,
            cluster_factor: 0.7,
            height_factor: 0.7,
        }
    }
}

impl HeightPreference {
    pub fn new(center: f32, range: f32) -> Self {
        Self {
            center,
            range,
            ..Default::default()
        }
    }

    pub fn with_factors(mut self, cluster_factor: f32, height_factor: f32) -> Self {
        self.cluster_factor = cluster_factor;
        self.height_factor = height_factor;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.range > 0.0) {
            return Err(Error::InvalidConfig(
                "height preference range must be > 0".into(),
            ));
        }
        if !self.cluster_factor.is_finite() || !self.height_factor.is_finite() {
            return Err(Error::InvalidConfig(
                "height preference factors must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Full set of acceptance rules for a run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRules {
    /// Lower bound of the normalized elevation band.
    pub min_height: f32,
    /// Upper bound of the normalized elevation band.
    pub max_height: f32,
    /// Maximum slope in degrees.
    pub max_slope: f32,
    /// Density field; `None` gives every passing candidate full weight.
    pub clusters: Option<ClusterSettings>,
    /// Optional elevation preference blended into the weight.
    pub height_preference: Option<HeightPreference>,
    /// Safe zones and path corridors.
    pub exclusion_zones: Vec<ExclusionZone>,
    /// Optional viewer distance limit.
    pub distance_culling: Option<DistanceCulling>,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            min_height: 0.2,
            max_height: 0.8,
            max_slope: 35.0,
            clusters: None,
            height_preference: None,
            exclusion_zones: Vec::new(),
            distance_culling: None,
        }
    }
}

impl PlacementRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the normalized elevation band.
    pub fn with_height_band(mut self, min_height: f32, max_height: f32) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }

    /// Sets the maximum slope in degrees.
    pub fn with_max_slope(mut self, max_slope: f32) -> Self {
        self.max_slope = max_slope;
        self
    }

    pub fn with_clusters(mut self, clusters: ClusterSettings) -> Self {
        self.clusters = Some(clusters);
        self
    }

    pub fn with_height_preference(mut self, preference: HeightPreference) -> Self {
        self.height_preference = Some(preference);
        self
    }

    /// Adds a single exclusion zone.
    pub fn with_exclusion_zone(mut self, zone: ExclusionZone) -> Self {
        self.exclusion_zones.push(zone);
        self
    }

    /// Adds several exclusion zones.
    pub fn with_exclusion_zones(mut self, zones: impl IntoIterator<Item = ExclusionZone>) -> Self {
        self.exclusion_zones.extend(zones);
        self
    }

    pub fn with_distance_culling(mut self, culling: DistanceCulling) -> Self {
        self.distance_culling = Some(culling);
        self
    }

    /// Returns `true` if `height01` lies inside the elevation band (inclusive).
    #[inline]
    pub fn height_in_band(&self, height01: f32) -> bool {
        height01 >= self.min_height && height01 <= self.max_height
    }

    /// Returns `true` if `p` lies inside any exclusion zone.
    #[inline]
    pub fn excluded(&self, p: Vec3) -> bool {
        self.exclusion_zones.iter().any(|zone| zone.contains(p))
    }

    /// Validates the rules, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_height) || !(0.0..=1.0).contains(&self.max_height) {
            return Err(Error::InvalidConfig(
                "min_height and max_height must be in [0, 1]".into(),
            ));
        }
        if self.min_height > self.max_height {
            return Err(Error::InvalidConfig(
                "min_height must be <= max_height".into(),
            ));
        }
        if !(self.max_slope >= 0.0) {
            return Err(Error::InvalidConfig("max_slope must be >= 0".into()));
        }
        if let Some(clusters) = &self.clusters {
            clusters.validate()?;
        }
        if let Some(preference) = &self.height_preference {
            preference.validate()?;
        }
        if let Some(zone) = self
            .exclusion_zones
            .iter()
            .find(|z| !(z.radius >= 0.0) || !z.center.is_finite())
        {
            return Err(Error::InvalidConfig(format!(
                "exclusion zone at {} must have a finite center and radius >= 0",
                zone.center
            )));
        }
        if let Some(culling) = &self.distance_culling {
            if !(culling.max_distance > 0.0) {
                return Err(Error::InvalidConfig(
                    "max spawn distance must be > 0".into(),
                ));
            }
        }

        Ok(())
    }
}
