//! Blueprints - what can be crafted and what it requires
//!
//! Blueprints are immutable reference data. The catalog is loaded once and
//! shared read-only by every crafting attempt.

use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::BlueprintId;
use crate::crafting::skill::SkillDiscipline;

/// Extra data for blueprints that produce placeable structures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseStructure {
    /// Added to the crafted item's max durability
    pub durability: f32,
}

/// A craftable output and its requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    pub id: BlueprintId,
    /// Human-readable name
    pub name: String,
    /// Template resref of the crafted item
    pub item_resref: String,
    /// Units produced per craft
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    pub discipline: SkillDiscipline,
    /// Nominal item level
    pub level: i32,
    #[serde(default)]
    pub base_structure: Option<BaseStructure>,
}

fn default_quantity() -> u32 {
    1
}

impl Blueprint {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        item_resref: impl Into<String>,
        discipline: SkillDiscipline,
        level: i32,
    ) -> Self {
        Self {
            id: BlueprintId(id),
            name: name.into(),
            item_resref: item_resref.into(),
            quantity: 1,
            discipline,
            level,
            base_structure: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_structure(mut self, durability: f32) -> Self {
        self.base_structure = Some(BaseStructure { durability });
        self
    }

    pub fn is_structure(&self) -> bool {
        self.base_structure.is_some()
    }
}

/// Catalog of all available blueprints
#[derive(Debug, Clone, Default)]
pub struct BlueprintCatalog {
    blueprints: AHashMap<BlueprintId, Blueprint>,
}

impl BlueprintCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a blueprint, replacing any with the same id
    pub fn add(&mut self, blueprint: Blueprint) {
        self.blueprints.insert(blueprint.id, blueprint);
    }

    pub fn get(&self, id: BlueprintId) -> Option<&Blueprint> {
        self.blueprints.get(&id)
    }

    /// All blueprints crafted with a discipline
    pub fn for_discipline(&self, discipline: SkillDiscipline) -> impl Iterator<Item = &Blueprint> {
        self.blueprints.values().filter(move |b| b.discipline == discipline)
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Load blueprints from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse blueprints from TOML string (`[[blueprints]]` tables)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlBlueprints = toml::from_str(content)?;
        Ok(data.blueprints.into_iter().collect())
    }
}

impl FromIterator<Blueprint> for BlueprintCatalog {
    fn from_iter<I: IntoIterator<Item = Blueprint>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for blueprint in iter {
            catalog.add(blueprint);
        }
        catalog
    }
}

/// TOML representation of a blueprints file
#[derive(Debug, Deserialize)]
struct TomlBlueprints {
    #[serde(default)]
    blueprints: Vec<Blueprint>,
}
