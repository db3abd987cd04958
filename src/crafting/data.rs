//! Workshop data file - blueprints, item templates and sample components
//!
//! A single TOML file with `[[blueprints]]`, `[[templates]]` and
//! `[[components]]` tables.

use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::error::Result;
use crate::core::types::ItemId;
use crate::crafting::blueprint::{Blueprint, BlueprintCatalog};
use crate::crafting::item::ComponentItem;
use crate::crafting::registry::{ItemRegistry, ItemTemplate};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkshopData {
    #[serde(default)]
    pub blueprints: Vec<Blueprint>,
    #[serde(default)]
    pub templates: Vec<ItemTemplate>,
    #[serde(default)]
    pub components: Vec<ComponentItem>,
}

impl WorkshopData {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn catalog(&self) -> BlueprintCatalog {
        self.blueprints.iter().cloned().collect()
    }

    pub fn registry(&self) -> ItemRegistry {
        let mut registry = ItemRegistry::new();
        for template in &self.templates {
            registry.add_template(template.clone());
        }
        registry
    }

    /// Component library keyed by resref
    pub fn component_library(&self) -> ComponentLibrary {
        ComponentLibrary {
            components: self
                .components
                .iter()
                .map(|c| (c.resref.clone(), c.clone()))
                .collect(),
        }
    }
}

/// Named component prototypes; every `take` yields a fresh instance
#[derive(Debug, Clone, Default)]
pub struct ComponentLibrary {
    components: AHashMap<String, ComponentItem>,
}

impl ComponentLibrary {
    pub fn take(&self, resref: &str) -> Option<ComponentItem> {
        self.components.get(resref).map(|c| ComponentItem {
            id: ItemId::new(),
            ..c.clone()
        })
    }
}
