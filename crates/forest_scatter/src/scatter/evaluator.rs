//! Evaluation of footprint candidates against [`PlacementRules`].
//!
//! The [`Evaluator`] runs the gates in a fixed order (height band, slope, viewer
//! distance, exclusion zones) and stops at the first failure, so terrain queries
//! behind a failed gate are never made. Candidates that pass all gates get a
//! weight in [0, 1]; the accept/reject draw happens in the runner.
use std::fmt;

use glam::{Vec2, Vec3};

use crate::scatter::cluster::{height_preference_weight, ClusterField};
use crate::scatter::rules::PlacementRules;
use crate::terrain::TerrainSurface;

/// Why a candidate was not placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Normalized height outside `[min_height, max_height]`.
    HeightBand,
    /// Slope above `max_slope`.
    Slope,
    /// Farther than the configured spawn distance from the viewer.
    Distance,
    /// Inside a safe zone or path corridor.
    ExclusionZone,
    /// Lost the weighted accept/reject draw.
    WeightRoll,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Rejection::HeightBand => "height band",
            Rejection::Slope => "slope",
            Rejection::Distance => "spawn distance",
            Rejection::ExclusionZone => "exclusion zone",
            Rejection::WeightRoll => "weight roll",
        };
        f.write_str(s)
    }
}

/// Per-reason rejection tallies for a run or layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RejectionCounts {
    pub height_band: usize,
    pub slope: usize,
    pub distance: usize,
    pub exclusion_zone: usize,
    pub weight_roll: usize,
}

impl RejectionCounts {
    pub fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::HeightBand => self.height_band += 1,
            Rejection::Slope => self.slope += 1,
            Rejection::Distance => self.distance += 1,
            Rejection::ExclusionZone => self.exclusion_zone += 1,
            Rejection::WeightRoll => self.weight_roll += 1,
        }
    }

    pub fn get(&self, rejection: Rejection) -> usize {
        match rejection {
            Rejection::HeightBand => self.height_band,
            Rejection::Slope => self.slope,
            Rejection::Distance => self.distance,
            Rejection::ExclusionZone => self.exclusion_zone,
            Rejection::WeightRoll => self.weight_roll,
        }
    }

    pub fn total(&self) -> usize {
        self.height_band + self.slope + self.distance + self.exclusion_zone + self.weight_roll
    }

    pub fn merge(&mut self, other: &RejectionCounts) {
        self.height_band += other.height_band;
        self.slope += other.slope;
        self.distance += other.distance;
        self.exclusion_zone += other.exclusion_zone;
        self.weight_roll += other.weight_roll;
    }
}

/// Result of evaluating one footprint candidate.
#[derive(Clone, Debug)]
pub struct CandidateEvaluation {
    /// Footprint position `(x, z)` relative to the terrain origin.
    pub footprint: Vec2,
    /// Normalized terrain coordinates.
    pub uv: Vec2,
    /// Normalized height `height / size.y`.
    pub height01: f32,
    /// Slope in degrees, `None` when the height gate already failed.
    pub slope: Option<f32>,
    /// World-space position on the terrain surface.
    pub world_position: Vec3,
    /// First failed gate, if any.
    pub rejection: Option<Rejection>,
    /// Acceptance weight in [0, 1]; zero for rejected candidates.
    pub weight: f32,
}

impl CandidateEvaluation {
    /// Returns `true` if every gate passed.
    pub fn allowed(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Height band and slope gates only. Shared with cluster-center generation.
pub fn passes_terrain_filter(terrain: &dyn TerrainSurface, rules: &PlacementRules, uv: Vec2) -> bool {
    let height01 = terrain.height(uv.x, uv.y) / terrain.size().y;
    rules.height_in_band(height01) && terrain.slope(uv.x, uv.y) <= rules.max_slope
}

/// Evaluates candidates for one run against a terrain, rules and density field.
pub struct Evaluator<'a> {
    terrain: &'a dyn TerrainSurface,
    rules: &'a PlacementRules,
    clusters: &'a ClusterField,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        terrain: &'a dyn TerrainSurface,
        rules: &'a PlacementRules,
        clusters: &'a ClusterField,
    ) -> Self {
        Self {
            terrain,
            rules,
            clusters,
        }
    }

    /// Evaluates a footprint position `(x, z)` in `[0, width) × [0, depth)`.
    pub fn evaluate(&self, footprint: Vec2) -> CandidateEvaluation {
        let size = self.terrain.size();
        let uv = footprint / Vec2::new(size.x, size.z);
        let height = self.terrain.height(uv.x, uv.y);
        let height01 = height / size.y;
        let world_position = self.terrain.origin() + Vec3::new(footprint.x, height, footprint.y);

        let mut eval = CandidateEvaluation {
            footprint,
            uv,
            height01,
            slope: None,
            world_position,
            rejection: None,
            weight: 0.0,
        };

        if !self.rules.height_in_band(height01) {
            eval.rejection = Some(Rejection::HeightBand);
            return eval;
        }

        let slope = self.terrain.slope(uv.x, uv.y);
        eval.slope = Some(slope);
        if slope > self.rules.max_slope {
            eval.rejection = Some(Rejection::Slope);
            return eval;
        }

        if let Some(culling) = &self.rules.distance_culling {
            if !culling.is_within(world_position) {
                eval.rejection = Some(Rejection::Distance);
                return eval;
            }
        }

        if self.rules.excluded(world_position) {
            eval.rejection = Some(Rejection::ExclusionZone);
            return eval;
        }

        eval.weight = self.weight(world_position, height01);
        eval
    }

    /// Acceptance weight for a gate-passing candidate.
    pub fn weight(&self, world_position: Vec3, height01: f32) -> f32 {
        let preference = self
            .rules
            .height_preference
            .as_ref()
            .map(|pref| (pref, height_preference_weight(height01, pref)));

        match &self.rules.clusters {
            Some(settings) => {
                let cluster = self.clusters.weight(world_position);
                let blended = match preference {
                    // Additive blend saturates at 1 after clamping.
                    Some((pref, h)) => cluster * pref.cluster_factor + h * pref.height_factor,
                    None => cluster,
                };
                blended.max(settings.min_weight).clamp(0.0, 1.0)
            }
            None => preference.map_or(1.0, |(_, h)| h.clamp(0.0, 1.0)),
        }
    }
}
