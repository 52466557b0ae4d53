//! High-level runner for executing scatter plans across layers and passes.
//!
//! A run generates cluster centers once (when the rules configure a density field),
//! then sweeps every layer `pass_count` times. Each pass draws
//! `ceil(count × spawn_multiplier)` uniform candidates, evaluates them, and accepts
//! with probability equal to their weight. Rejected candidates are skipped without
//! backfill, and a pass stops accepting once it has placed `count` objects.
use glam::{Vec2, Vec3};
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::sampling::{rand01, PositionSampling, UniformRandomSampling};
use crate::scatter::cluster::{generate_cluster_centers, ClusterField};
use crate::scatter::evaluator::{Evaluator, Rejection, RejectionCounts};
use crate::scatter::events::{EventSink, ScatterEvent, ScatterEventKind};
use crate::scatter::plan::{Layer, Plan};
use crate::scatter::rules::PlacementRules;
use crate::scatter::selection::{pick_uniform, random_yaw_degrees};
use crate::scatter::{Category, KindId};
use crate::terrain::TerrainSurface;

/// Represents a placed instance of a kind on the terrain.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Kind identifier for this placement.
    pub kind_id: KindId,
    /// Category the kind was drawn from.
    pub category: Category,
    /// World-space position on the terrain surface.
    pub position: Vec3,
    /// Rotation about the vertical axis in degrees, in `[0, 360)`.
    pub yaw_degrees: f32,
}

/// Density controls for a run.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Factor applied to each layer's count to get the candidate draws per pass.
    pub spawn_multiplier: f32,
    /// Number of full sampling passes per layer.
    pub pass_count: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            spawn_multiplier: 1.0,
            pass_count: 1,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spawn multiplier.
    pub fn with_spawn_multiplier(mut self, spawn_multiplier: f32) -> Self {
        self.spawn_multiplier = spawn_multiplier;
        self
    }

    /// Sets the number of passes.
    pub fn with_pass_count(mut self, pass_count: u32) -> Self {
        self.pass_count = pass_count;
        self
    }

    /// Candidate draws per pass for a layer of `count` objects.
    pub fn draws_per_pass(&self, count: usize) -> usize {
        (count as f64 * self.spawn_multiplier as f64).ceil() as usize
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.spawn_multiplier.is_finite() || self.spawn_multiplier <= 0.0 {
            return Err(Error::InvalidConfig(
                "spawn_multiplier must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Result of running a scatter plan or layer.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Placements produced by the run, in acceptance order.
    pub placements: Vec<Placement>,
    /// Total candidate positions evaluated.
    pub positions_evaluated: usize,
    /// Total candidate positions rejected.
    pub positions_rejected: usize,
    /// Rejections broken down by reason.
    pub rejections: RejectionCounts,
    /// Cluster centers used by the run.
    pub cluster_centers: Vec<Vec3>,
}

impl RunResult {
    /// Creates a new empty [`RunResult`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the placements and returns a new instance.
    pub fn with_placements(mut self, placements: Vec<Placement>) -> Self {
        self.placements = placements;
        self
    }

    /// Number of placements of the given category.
    pub fn count_of(&self, category: Category) -> usize {
        self.placements
            .iter()
            .filter(|p| p.category == category)
            .count()
    }

    fn absorb(&mut self, other: RunResult) {
        self.placements.extend(other.placements);
        self.positions_evaluated += other.positions_evaluated;
        self.positions_rejected += other.positions_rejected;
        self.rejections.merge(&other.rejections);
    }
}

pub struct ScatterRunner<'a> {
    /// Run configuration applied to this runner.
    pub config: RunConfig,
    /// Acceptance rules applied to every candidate.
    pub rules: &'a PlacementRules,
    /// Terrain queried for heights and slopes.
    pub terrain: &'a dyn TerrainSurface,
}

impl<'a> ScatterRunner<'a> {
    pub fn try_new(
        config: RunConfig,
        rules: &'a PlacementRules,
        terrain: &'a dyn TerrainSurface,
    ) -> Result<Self> {
        config.validate()?;
        rules.validate()?;
        Ok(Self {
            config,
            rules,
            terrain,
        })
    }

    /// Runs the given plan, returning the result.
    pub fn run(&mut self, plan: &Plan, rng: &mut impl RngCore) -> RunResult {
        run_plan(plan, &self.config, self.rules, self.terrain, rng, None)
    }

    pub fn run_with_events(
        &mut self,
        plan: &Plan,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> RunResult {
        run_plan(plan, &self.config, self.rules, self.terrain, rng, Some(sink))
    }

    /// Runs a single layer against an explicit density field.
    pub fn run_layer(
        &mut self,
        layer: &Layer,
        clusters: &ClusterField,
        rng: &mut impl RngCore,
    ) -> RunResult {
        run_layer(
            layer,
            &self.config,
            self.rules,
            self.terrain,
            clusters,
            rng,
            None,
        )
    }
}

pub fn run_layer<R: RngCore>(
    layer: &Layer,
    config: &RunConfig,
    rules: &PlacementRules,
    terrain: &dyn TerrainSurface,
    clusters: &ClusterField,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> RunResult {
    let ctx = LayerExecContext {
        config,
        rules,
        terrain,
        clusters,
    };
    if let Some(s) = sink {
        run_layer_with_events_internal(layer, &ctx, rng, s, 0)
    } else {
        run_layer_with_events_internal(layer, &ctx, rng, &mut (), 0)
    }
}

struct LayerExecContext<'a> {
    config: &'a RunConfig,
    rules: &'a PlacementRules,
    terrain: &'a dyn TerrainSurface,
    clusters: &'a ClusterField,
}

fn run_layer_with_events_internal<R: RngCore>(
    layer: &Layer,
    ctx: &LayerExecContext<'_>,
    rng: &mut R,
    sink: &mut dyn EventSink,
    layer_index: usize,
) -> RunResult {
    if layer.kinds.is_empty() {
        warn!("Layer '{}' has no kinds; skipping.", layer.id());
        if sink.wants(ScatterEventKind::Warning) {
            sink.send(ScatterEvent::Warning {
                context: format!("layer:{}", layer.id()),
                message: "Layer has no kinds; skipping".into(),
            });
        }
        return RunResult::new();
    }

    let draws = ctx.config.draws_per_pass(layer.count);
    let passes = ctx.config.pass_count;
    if sink.wants(ScatterEventKind::LayerStarted) {
        sink.send(ScatterEvent::LayerStarted {
            index: layer_index,
            category: layer.category,
            kinds: layer.kinds.iter().map(|k| k.id.clone()).collect(),
            draws_per_pass: draws,
            passes,
        });
    }

    let evaluator = Evaluator::new(ctx.terrain, ctx.rules, ctx.clusters);
    let sampling = UniformRandomSampling::new(draws);
    let footprint = ctx.terrain.footprint();

    let mut placed: Vec<Placement> = Vec::new();
    let mut rejections = RejectionCounts::default();
    let mut evaluated = 0;

    for pass in 0..passes {
        let candidates = sampling.generate(footprint.into(), rng);
        let mut pass_evaluated = 0;
        let mut pass_placed = 0;

        for candidate in candidates.into_iter().map(Vec2::from) {
            if pass_placed >= layer.count {
                break;
            }
            pass_evaluated += 1;

            let eval = evaluator.evaluate(candidate);
            let mut outcome = eval.rejection;
            if outcome.is_none() {
                let roll = rand01(rng);
                if !(eval.weight >= 1.0 || (eval.weight > 0.0 && roll < eval.weight)) {
                    outcome = Some(Rejection::WeightRoll);
                }
            }

            if sink.wants(ScatterEventKind::PositionEvaluated) {
                sink.send(ScatterEvent::PositionEvaluated {
                    layer_index,
                    footprint: eval.footprint,
                    world_position: eval.world_position,
                    weight: eval.weight,
                    rejection: outcome,
                });
            }

            if let Some(rejection) = outcome {
                rejections.record(rejection);
                continue;
            }

            let Some(kind) = pick_uniform(&layer.kinds, rng) else {
                continue;
            };
            let placement = Placement {
                kind_id: kind.id.clone(),
                category: layer.category,
                position: eval.world_position,
                yaw_degrees: random_yaw_degrees(rng),
            };
            if sink.wants(ScatterEventKind::PlacementMade) {
                sink.send(ScatterEvent::PlacementMade {
                    layer_index,
                    placement: placement.clone(),
                });
            }
            placed.push(placement);
            pass_placed += 1;
        }

        debug!(
            "Layer '{}' pass {}: {} placed of {} evaluated.",
            layer.id(),
            pass,
            pass_placed,
            pass_evaluated
        );
        if sink.wants(ScatterEventKind::PassFinished) {
            sink.send(ScatterEvent::PassFinished {
                layer_index,
                pass,
                evaluated: pass_evaluated,
                placed: pass_placed,
            });
        }
        evaluated += pass_evaluated;
    }

    let rejected = evaluated.saturating_sub(placed.len());
    RunResult {
        placements: placed,
        positions_evaluated: evaluated,
        positions_rejected: rejected,
        rejections,
        cluster_centers: ctx.clusters.centers.clone(),
    }
}

pub fn run_plan<R: RngCore>(
    plan: &Plan,
    config: &RunConfig,
    rules: &PlacementRules,
    terrain: &dyn TerrainSurface,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> RunResult {
    if let Some(s) = sink {
        run_plan_with_events(plan, config, rules, terrain, rng, s)
    } else {
        run_plan_with_events(plan, config, rules, terrain, rng, &mut ())
    }
}

pub fn run_plan_with_events<R: RngCore>(
    plan: &Plan,
    config: &RunConfig,
    rules: &PlacementRules,
    terrain: &dyn TerrainSurface,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> RunResult {
    if sink.wants(ScatterEventKind::RunStarted) {
        sink.send(ScatterEvent::RunStarted {
            config: config.clone(),
            layer_count: plan.layers.len(),
        });
    }

    if plan.layers.is_empty() {
        warn!("Placement plan has no layers.");
        if sink.wants(ScatterEventKind::Warning) {
            sink.send(ScatterEvent::Warning {
                context: "plan".into(),
                message: "Placement plan has no layers".into(),
            });
        }
    }

    let clusters = match &rules.clusters {
        Some(settings) => {
            let generated = generate_cluster_centers(terrain, rules, settings, rng);
            if !generated.is_complete() && sink.wants(ScatterEventKind::Warning) {
                sink.send(ScatterEvent::Warning {
                    context: "clusters".into(),
                    message: format!(
                        "Found {} of {} cluster centers after {} attempts",
                        generated.centers.len(),
                        generated.requested,
                        generated.attempts
                    ),
                });
            }
            if sink.wants(ScatterEventKind::ClusterCentersGenerated) {
                sink.send(ScatterEvent::ClusterCentersGenerated {
                    centers: generated.centers.clone(),
                    requested: generated.requested,
                    attempts: generated.attempts,
                });
            }
            ClusterField::from_settings(generated.centers, settings)
        }
        None => ClusterField::default(),
    };

    let ctx = LayerExecContext {
        config,
        rules,
        terrain,
        clusters: &clusters,
    };

    let mut result = RunResult {
        cluster_centers: clusters.centers.clone(),
        ..RunResult::new()
    };

    for (layer_idx, layer) in plan.layers.iter().enumerate() {
        info!(
            "Layer {}: '{}' | kinds: {} | count: {}.",
            layer_idx,
            layer.id(),
            layer.kinds.len(),
            layer.count,
        );

        let layer_result = run_layer_with_events_internal(layer, &ctx, rng, sink, layer_idx);

        if sink.wants(ScatterEventKind::LayerFinished) {
            sink.send(ScatterEvent::LayerFinished {
                index: layer_idx,
                category: layer.category,
                result: layer_result.clone(),
            });
        }

        result.absorb(layer_result);
    }

    if sink.wants(ScatterEventKind::RunFinished) {
        sink.send(ScatterEvent::RunFinished {
            result: result.clone(),
        });
    }

    result
}
