//! Event types and sinks for observing scatter runs.
//!
//! This module defines [`ScatterEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while executing a [`crate::scatter::plan::Plan`]
//! via [`crate::scatter::runner::ScatterRunner`], [`crate::scatter::runner::run_plan`],
//! or [`crate::scatter::runner::run_layer`].
use glam::{Vec2, Vec3};

use crate::scatter::evaluator::Rejection;
use crate::scatter::runner::{Placement, RunConfig, RunResult};
use crate::scatter::{Category, KindId};

/// Describes events emitted by scatter operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum ScatterEvent {
    /// Emitted when a run starts for a plan.
    RunStarted {
        /// The run configuration used.
        config: RunConfig,
        /// Number of layers in the plan.
        layer_count: usize,
    },

    /// Emitted when the entire plan finishes.
    RunFinished {
        /// Aggregated result for all layers.
        result: RunResult,
    },

    /// Emitted once per run after cluster centers were generated.
    ClusterCentersGenerated {
        /// Accepted centers.
        centers: Vec<Vec3>,
        /// Number of centers asked for.
        requested: usize,
        /// Draws spent.
        attempts: usize,
    },

    /// Emitted when a layer starts processing.
    LayerStarted {
        /// Index of the layer in the plan.
        index: usize,
        /// Category of the layer.
        category: Category,
        /// The kinds configured on this layer.
        kinds: Vec<KindId>,
        /// Candidate draws per pass after the spawn multiplier.
        draws_per_pass: usize,
        /// Number of passes.
        passes: u32,
    },

    /// Emitted after each pass over a layer.
    PassFinished {
        /// Index of the layer in the plan.
        layer_index: usize,
        /// Zero-based pass number.
        pass: u32,
        /// Candidates evaluated in this pass.
        evaluated: usize,
        /// Placements made in this pass.
        placed: usize,
    },

    /// Emitted when a layer finishes processing.
    LayerFinished {
        /// Index of the layer in the plan.
        index: usize,
        /// Category of the layer.
        category: Category,
        /// Summary of what was evaluated and placed in this layer.
        result: RunResult,
    },

    /// Emitted after a candidate was evaluated and, if it passed all gates, rolled.
    PositionEvaluated {
        /// Index of the layer being processed.
        layer_index: usize,
        /// Footprint position `(x, z)`.
        footprint: Vec2,
        /// World-space position on the terrain.
        world_position: Vec3,
        /// Acceptance weight in [0, 1].
        weight: f32,
        /// Why the candidate was dropped, `None` if it was placed.
        rejection: Option<Rejection>,
    },

    /// Emitted when a placement is made.
    PlacementMade {
        /// Index of the layer that produced the placement.
        layer_index: usize,
        /// The placement data.
        placement: Placement,
    },

    /// Non-fatal warning generated during scatter.
    Warning {
        /// Context string (e.g. layer id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`ScatterEvent`], used by sinks to opt out of event kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScatterEventKind {
    RunStarted,
    RunFinished,
    ClusterCentersGenerated,
    LayerStarted,
    PassFinished,
    LayerFinished,
    PositionEvaluated,
    PlacementMade,
    Warning,
}

impl ScatterEvent {
    pub fn kind(&self) -> ScatterEventKind {
        match self {
            ScatterEvent::RunStarted { .. } => ScatterEventKind::RunStarted,
            ScatterEvent::RunFinished { .. } => ScatterEventKind::RunFinished,
            ScatterEvent::ClusterCentersGenerated { .. } => {
                ScatterEventKind::ClusterCentersGenerated
            }
            ScatterEvent::LayerStarted { .. } => ScatterEventKind::LayerStarted,
            ScatterEvent::PassFinished { .. } => ScatterEventKind::PassFinished,
            ScatterEvent::LayerFinished { .. } => ScatterEventKind::LayerFinished,
            ScatterEvent::PositionEvaluated { .. } => ScatterEventKind::PositionEvaluated,
            ScatterEvent::PlacementMade { .. } => ScatterEventKind::PlacementMade,
            ScatterEvent::Warning { .. } => ScatterEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`ScatterEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: ScatterEvent);

    /// Returns `false` to skip building events of `kind`.
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = ScatterEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ScatterEvent) {}

    #[inline]
    fn wants(&self, _kind: ScatterEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(ScatterEvent),
{
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally filtered by kind.
#[derive(Default)]
pub struct VecSink {
    events: Vec<ScatterEvent>,
    only: Option<Vec<ScatterEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects only the listed event kinds.
    pub fn only(kinds: impl IntoIterator<Item = ScatterEventKind>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into_iter().collect()),
        }
    }

    pub fn into_inner(self) -> Vec<ScatterEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[ScatterEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ScatterEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.only.as_ref().is_none_or(|only| only.contains(&kind))
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: ScatterEvent) {
        let kind = event.kind();
        let mut targets: Vec<&mut S> = self.sinks.iter_mut().filter(|s| s.wants(kind)).collect();
        let Some(last) = targets.pop() else {
            return;
        };
        for sink in targets {
            sink.send(event.clone());
        }
        last.send(event);
    }

    fn wants(&self, kind: ScatterEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
