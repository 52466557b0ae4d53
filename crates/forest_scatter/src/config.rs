//! Top-level generator configuration.
//!
//! [`ForestConfig`] bundles per-category counts, [`PlacementRules`], [`RunConfig`]
//! and an optional seed. With the `serde` feature it round-trips through any serde
//! format; the examples load it from RON.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scatter::plan::Plan;
use crate::scatter::rules::PlacementRules;
use crate::scatter::runner::RunConfig;
use crate::scatter::KindRegistry;

#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct ForestConfig {
    /// Tree candidates per pass, before the spawn multiplier.
    pub tree_count: usize,
    /// Bush candidates per pass, before the spawn multiplier.
    pub bush_count: usize,
    pub rules: PlacementRules,
    pub run: RunConfig,
    /// Fixed seed for reproducible runs. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 2000,
            bush_count: 3000,
            rules: PlacementRules::default(),
            run: RunConfig::default(),
            seed: None,
        }
    }
}

impl ForestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(mut self, tree_count: usize, bush_count: usize) -> Self {
        self.tree_count = tree_count;
        self.bush_count = bush_count;
        self
    }

    pub fn with_rules(mut self, rules: PlacementRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Tree and bush layers for the given kind registry.
    pub fn plan(&self, registry: &KindRegistry) -> Plan {
        Plan::from_registry(registry, self.tree_count, self.bush_count)
    }

    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        self.run.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::scatter::Category;

    #[test]
    fn defaults_are_valid() {
        let config = ForestConfig::default();
        assert_eq!(config.tree_count, 2000);
        assert_eq!(config.bush_count, 3000);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_covers_rules_and_run() {
        let bad_run = ForestConfig::new().with_run(RunConfig::new().with_spawn_multiplier(-1.0));
        assert!(matches!(bad_run.validate(), Err(Error::InvalidConfig(_))));

        let bad_rules = ForestConfig::new().with_rules(PlacementRules::new().with_max_slope(f32::NAN));
        assert!(matches!(bad_rules.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn plan_uses_configured_counts() {
        let registry = KindRegistry::new().with_kinds(Category::Tree, ["pine"]);
        let plan = ForestConfig::new().with_counts(7, 9).plan(&registry);
        assert_eq!(plan.layers[0].count, 7);
        assert_eq!(plan.layers[1].count, 9);
    }
}
