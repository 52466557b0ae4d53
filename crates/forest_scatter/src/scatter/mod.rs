//! Scattering pipeline for placing vegetation kinds across a terrain footprint.
use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod cluster;
pub mod evaluator;
pub mod events;
pub mod plan;
pub mod rules;
pub mod runner;
pub mod selection;

pub type KindId = String;

/// Object category a layer scatters. Each category has its own kind set and count.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Tree,
    Bush,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Tree => f.write_str("tree"),
            Category::Bush => f.write_str("bush"),
        }
    }
}

/// An instantiable object kind (a prefab in engine terms), identified by id.
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kind {
    pub id: KindId,
}

impl Kind {
    pub fn new(id: impl Into<KindId>) -> Self {
        Self { id: id.into() }
    }
}

/// Ordered kinds per [`Category`]. Selection indexes into these lists uniformly.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default)]
pub struct KindRegistry {
    kinds: BTreeMap<Category, Vec<Kind>>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a kind to the given category.
    pub fn register(&mut self, category: Category, kind: Kind) -> &mut Self {
        self.kinds.entry(category).or_default().push(kind);
        self
    }

    /// Builder-style variant of [`KindRegistry::register`] for several ids at once.
    pub fn with_kinds<I, S>(mut self, category: Category, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<KindId>,
    {
        for id in ids {
            self.register(category, Kind::new(id));
        }
        self
    }

    /// Kinds registered for `category`, empty if none.
    pub fn kinds(&self, category: Category) -> &[Kind] {
        self.kinds.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes every kind of `category`.
    pub fn clear_category(&mut self, category: Category) {
        self.kinds.remove(&category);
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.values().all(Vec::is_empty)
    }
}
