//! Planning module for defining scatter layers and plans.
use crate::scatter::{Category, Kind, KindRegistry};

/// A layer in a scatter plan: one object category with its kind set and target count.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct Layer {
    /// Category scattered by this layer.
    pub category: Category,
    /// Kinds to choose from on acceptance.
    pub kinds: Vec<Kind>,
    /// Candidate draws per pass before the spawn multiplier is applied.
    pub count: usize,
}

impl Layer {
    /// Create a new layer with required fields.
    pub fn new(category: Category, kinds: Vec<Kind>, count: usize) -> Self {
        Self {
            category,
            kinds,
            count,
        }
    }

    /// Layer id used in logs and events.
    pub fn id(&self) -> String {
        self.category.to_string()
    }
}

/// A scatter plan composed of one or more [`Layer`]s, run in order.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct Plan {
    pub layers: Vec<Layer>,
}

impl Plan {
    /// Create a new empty plan.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Tree layer followed by bush layer, with kinds taken from `registry`.
    pub fn from_registry(registry: &KindRegistry, tree_count: usize, bush_count: usize) -> Self {
        Self::new()
            .with_layer(Layer::new(
                Category::Tree,
                registry.kinds(Category::Tree).to_vec(),
                tree_count,
            ))
            .with_layer(Layer::new(
                Category::Bush,
                registry.kinds(Category::Bush).to_vec(),
                bush_count,
            ))
    }

    /// Add a single layer to the plan.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Add multiple layers to the plan.
    pub fn with_layers(mut self, layers: Vec<Layer>) -> Self {
        self.layers.extend(layers);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_registry_orders_trees_before_bushes() {
        let registry = KindRegistry::new()
            .with_kinds(Category::Bush, ["fern"])
            .with_kinds(Category::Tree, ["pine", "oak"]);
        let plan = Plan::from_registry(&registry, 20, 30);

        assert_eq!(plan.layers.len(), 2);
        assert_eq!(plan.layers[0].category, Category::Tree);
        assert_eq!(plan.layers[0].kinds.len(), 2);
        assert_eq!(plan.layers[0].count, 20);
        assert_eq!(plan.layers[1].category, Category::Bush);
        assert_eq!(plan.layers[1].count, 30);
    }

    #[test]
    fn from_registry_keeps_empty_layers() {
        let plan = Plan::from_registry(&KindRegistry::new(), 5, 5);
        assert_eq!(plan.layers.len(), 2);
        assert!(plan.layers.iter().all(|l| l.kinds.is_empty()));
    }

    #[test]
    fn plan_builder_pushes_layers() {
        let plan = Plan::new()
            .with_layer(Layer::new(Category::Tree, vec![Kind::new("pine")], 1))
            .with_layers(vec![Layer::new(Category::Bush, Vec::new(), 2)]);
        assert_eq!(plan.layers.len(), 2);
        assert_eq!(plan.layers[1].id(), "bush");
    }
}
