#![forbid(unsafe_code)]
//! forest_scatter: Vegetation scattering over heightmap terrain with cluster-weighted rejection sampling.
//!
//! Modules:
//! - terrain: height/slope query surfaces (flat and heightmap-backed)
//! - sampling: uniform footprint candidate generation and random helpers
//! - scatter: rules, cluster fields, evaluator, plans, runner, selection, events
//! - scene: scene containers and the generate / clear / rebuild surface
//! - wander: periodic retarget behaviour for navigation agents
pub mod config;
pub mod error;
pub mod sampling;
pub mod scatter;
pub mod scene;
pub mod terrain;
pub mod wander;

/// Convenient re-exports for common types. Import with `use forest_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::config::ForestConfig;
    pub use crate::error::{Error, Result};
    pub use crate::sampling::{PositionSampling, UniformRandomSampling};
    pub use crate::scatter::cluster::{
        generate_cluster_centers, height_preference_weight, ClusterCenters, ClusterField,
    };
    pub use crate::scatter::evaluator::{
        CandidateEvaluation, Evaluator, Rejection, RejectionCounts,
    };
    pub use crate::scatter::events::{
        EventSink, FnSink, MultiSink, ScatterEvent, ScatterEventKind, VecSink,
    };
    pub use crate::scatter::plan::{Layer, Plan};
    pub use crate::scatter::rules::{
        ClusterSettings, DistanceCulling, ExclusionZone, HeightPreference, PlacementRules,
    };
    pub use crate::scatter::runner::{
        run_layer, run_plan, run_plan_with_events, Placement, RunConfig, RunResult,
        ScatterRunner,
    };
    pub use crate::scatter::selection::{pick_uniform, random_yaw_degrees};
    pub use crate::scatter::{Category, Kind, KindId, KindRegistry};
    pub use crate::scene::{ForestGenerator, InMemoryScene, ObjectId, SceneContainer, SceneObject};
    pub use crate::terrain::{FlatTerrain, HeightmapTerrain, TerrainSurface};
    pub use crate::wander::{NavAgent, NavSurface, Wander, WanderSettings, WanderState};
}
