use std::fs;
use std::path::Path;

use anyhow::Context;
use forest_scatter::prelude::*;
use serde::{Deserialize, Serialize};

/// Forest configuration plus the kind ids per category, as stored in a RON file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForestPreset {
    pub forest: ForestConfig,
    pub trees: Vec<String>,
    pub bushes: Vec<String>,
}

impl ForestPreset {
    pub fn registry(&self) -> KindRegistry {
        KindRegistry::new()
            .with_kinds(Category::Tree, self.trees.iter().cloned())
            .with_kinds(Category::Bush, self.bushes.iter().cloned())
    }
}

/// Reads and validates a [`ForestPreset`] from a RON file.
pub fn load_preset(path: impl AsRef<Path>) -> anyhow::Result<ForestPreset> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading preset {}", path.display()))?;
    let preset: ForestPreset =
        ron::from_str(&text).with_context(|| format!("parsing preset {}", path.display()))?;
    preset.forest.validate()?;
    Ok(preset)
}
