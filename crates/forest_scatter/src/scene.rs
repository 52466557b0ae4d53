//! Scene containers and the generate / clear / rebuild surface.
//!
//! Accepted placements are realized through a [`SceneContainer`] the host provides.
//! [`ForestGenerator`] tracks every handle it created and releases them in a single
//! bulk call on [`ForestGenerator::clear`], so clearing is idempotent and does not
//! depend on the container's child order.
use std::collections::BTreeMap;
use std::sync::Arc;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::config::ForestConfig;
use crate::error::{Error, Result};
use crate::scatter::runner::{run_plan, Placement, RunResult};
use crate::scatter::{Category, KindId, KindRegistry};
use crate::terrain::TerrainSurface;

/// Receives placements and owns the objects created for them.
pub trait SceneContainer {
    /// Identifies a created object for later release.
    type Handle;

    /// Creates an object for `placement` and returns its handle.
    fn instantiate(&mut self, placement: &Placement) -> Self::Handle;

    /// Destroys every object in `handles`.
    fn release(&mut self, handles: Vec<Self::Handle>);
}

/// Handle into an [`InMemoryScene`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

/// Object stored by an [`InMemoryScene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    pub kind_id: KindId,
    pub category: Category,
    pub position: Vec3,
    pub yaw_degrees: f32,
}

/// Scene container that keeps created objects in memory, keyed by id.
#[derive(Debug, Default)]
pub struct InMemoryScene {
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
}

impl InMemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live objects.
    pub fn child_count(&self) -> usize {
        self.objects.len()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &SceneObject)> {
        self.objects.iter()
    }
}

impl SceneContainer for InMemoryScene {
    type Handle = ObjectId;

    fn instantiate(&mut self, placement: &Placement) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            SceneObject {
                kind_id: placement.kind_id.clone(),
                category: placement.category,
                position: placement.position,
                yaw_degrees: placement.yaw_degrees,
            },
        );
        id
    }

    fn release(&mut self, handles: Vec<ObjectId>) {
        for id in handles {
            self.objects.remove(&id);
        }
    }
}

/// Operator-facing vegetation generator: `generate`, `clear`, `rebuild`.
pub struct ForestGenerator<S: SceneContainer> {
    config: ForestConfig,
    terrain: Option<Arc<dyn TerrainSurface>>,
    kinds: KindRegistry,
    scene: S,
    owned: Vec<S::Handle>,
}

impl<S: SceneContainer> ForestGenerator<S> {
    pub fn new(config: ForestConfig, kinds: KindRegistry, scene: S) -> Self {
        Self {
            config,
            terrain: None,
            kinds,
            scene,
            owned: Vec::new(),
        }
    }

    pub fn with_terrain(mut self, terrain: Arc<dyn TerrainSurface>) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn set_terrain(&mut self, terrain: Option<Arc<dyn TerrainSurface>>) {
        self.terrain = terrain;
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ForestConfig {
        &mut self.config
    }

    pub fn kinds_mut(&mut self) -> &mut KindRegistry {
        &mut self.kinds
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Number of objects created by the latest run and not yet released.
    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    /// Clears previous output and scatters a new forest.
    ///
    /// Fails with [`Error::MissingTerrain`] before touching the scene when no terrain
    /// is assigned, and with [`Error::InvalidConfig`] for an invalid configuration.
    pub fn generate(&mut self) -> Result<RunResult> {
        let Some(terrain) = self.terrain.clone() else {
            error!("No terrain assigned; forest generation aborted.");
            return Err(Error::MissingTerrain);
        };
        self.config.validate()?;

        self.clear();

        let seed = self.config.seed.unwrap_or_else(rand::random);
        debug!("Forest generation seed: {seed}.");
        let mut rng = StdRng::seed_from_u64(seed);

        let plan = self.config.plan(&self.kinds);
        let result = run_plan(
            &plan,
            &self.config.run,
            &self.config.rules,
            terrain.as_ref(),
            &mut rng,
            None,
        );

        self.owned.reserve(result.placements.len());
        for placement in &result.placements {
            self.owned.push(self.scene.instantiate(placement));
        }

        info!(
            "Forest generated: {} trees, {} bushes ({} candidates evaluated).",
            result.count_of(Category::Tree),
            result.count_of(Category::Bush),
            result.positions_evaluated
        );
        Ok(result)
    }

    /// Releases every object this generator created. Returns how many were released.
    pub fn clear(&mut self) -> usize {
        let handles = std::mem::take(&mut self.owned);
        let released = handles.len();
        if released > 0 {
            self.scene.release(handles);
        }
        info!("Forest cleared ({released} objects).");
        released
    }

    /// [`ForestGenerator::clear`] followed by [`ForestGenerator::generate`].
    pub fn rebuild(&mut self) -> Result<RunResult> {
        self.clear();
        self.generate()
    }

    /// Consumes the generator and returns the scene with its current objects.
    pub fn into_scene(self) -> S {
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scatter::rules::{ClusterSettings, PlacementRules};
    use crate::scatter::runner::RunConfig;
    use crate::terrain::FlatTerrain;

    fn registry() -> KindRegistry {
        KindRegistry::new()
            .with_kinds(Category::Tree, ["pine", "oak"])
            .with_kinds(Category::Bush, ["fern"])
    }

    fn generator(config: ForestConfig) -> ForestGenerator<InMemoryScene> {
        ForestGenerator::new(config, registry(), InMemoryScene::new()).with_terrain(Arc::new(
            FlatTerrain::new(Vec3::new(100.0, 10.0, 100.0), 0.5),
        ))
    }

    fn clustered() -> ForestConfig {
        ForestConfig::new()
            .with_counts(200, 300)
            .with_rules(
                PlacementRules::default()
                    .with_clusters(ClusterSettings::new(4, 30.0).with_min_weight(0.1)),
            )
            .with_run(RunConfig::new().with_spawn_multiplier(1.5).with_pass_count(2))
    }

    #[test]
    fn missing_terrain_aborts_without_output() {
        let mut generator = ForestGenerator::new(ForestConfig::new(), registry(), InMemoryScene::new());
        assert!(matches!(generator.generate(), Err(Error::MissingTerrain)));
        assert_eq!(generator.scene().child_count(), 0);
    }

    #[test]
    fn missing_terrain_keeps_previous_forest() {
        let mut generator = generator(ForestConfig::new().with_counts(20, 20).with_seed(1));
        let first = generator.generate().unwrap();
        generator.set_terrain(None);
        assert!(generator.generate().is_err());
        assert_eq!(generator.scene().child_count(), first.placements.len());
    }

    #[test]
    fn invalid_config_is_reported() {
        let mut generator = generator(
            ForestConfig::new().with_rules(PlacementRules::new().with_height_band(0.8, 0.2)),
        );
        assert!(matches!(generator.generate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn scene_mirrors_placements() {
        let mut generator = generator(ForestConfig::new().with_counts(50, 80).with_seed(4));
        let result = generator.generate().unwrap();

        // Flat terrain inside the default band with no clusters accepts everything.
        assert_eq!(result.count_of(Category::Tree), 50);
        assert_eq!(result.count_of(Category::Bush), 80);
        assert_eq!(generator.scene().child_count(), 130);

        let scene = generator.into_scene();
        for ((_, object), placement) in scene.objects().zip(&result.placements) {
            assert_eq!(object.kind_id, placement.kind_id);
            assert_eq!(object.position, placement.position);
            assert_eq!(object.yaw_degrees, placement.yaw_degrees);
        }
    }

    #[test]
    fn repeated_rebuild_never_leaks_objects() {
        let mut generator = generator(clustered());
        for _ in 0..5 {
            let result = generator.rebuild().unwrap();
            assert_eq!(generator.scene().child_count(), result.placements.len());
            assert_eq!(generator.owned_count(), result.placements.len());
            assert!(result.count_of(Category::Tree) <= 200 * 2);
            assert!(result.count_of(Category::Bush) <= 300 * 2);
        }
    }

    #[test]
    fn generate_replaces_previous_output() {
        let mut generator = generator(clustered());
        generator.generate().unwrap();
        let second = generator.generate().unwrap();
        assert_eq!(generator.scene().child_count(), second.placements.len());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut generator = generator(ForestConfig::new().with_counts(10, 10).with_seed(8));
        generator.generate().unwrap();
        assert_eq!(generator.clear(), 20);
        assert_eq!(generator.clear(), 0);
        assert_eq!(generator.scene().child_count(), 0);
    }

    #[test]
    fn fixed_seed_reproduces_the_forest() {
        let mut a = generator(clustered().with_seed(42));
        let mut b = generator(clustered().with_seed(42));
        assert_eq!(
            a.generate().unwrap().placements,
            b.generate().unwrap().placements
        );
    }

    #[test]
    fn empty_category_is_skipped() {
        let mut generator = generator(ForestConfig::new().with_counts(10, 10).with_seed(2));
        generator.kinds_mut().clear_category(Category::Bush);
        let result = generator.generate().unwrap();
        assert_eq!(result.count_of(Category::Bush), 0);
        assert_eq!(result.count_of(Category::Tree), 10);
    }
}
