//! Item templates and instantiation
//!
//! `ItemRegistry` is the in-memory item system: it knows every template's
//! stack size and class, creates instances from them, and keeps the set of
//! items created so far.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{CraftError, Result};
use crate::core::types::{ActorId, ItemId};
use crate::crafting::item::{CraftedItem, ItemClass};

/// Reference data for an item resref
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub resref: String,
    pub name: String,
    /// Largest quantity a single instance can hold
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
    #[serde(default)]
    pub class: ItemClass,
    #[serde(default)]
    pub max_durability: f32,
}

fn default_max_stack() -> u32 {
    1
}

impl ItemTemplate {
    pub fn new(resref: impl Into<String>, name: impl Into<String>, max_stack: u32) -> Self {
        Self {
            resref: resref.into(),
            name: name.into(),
            max_stack: max_stack.max(1),
            class: ItemClass::Terminal,
            max_durability: 0.0,
        }
    }

    pub fn with_class(mut self, class: ItemClass) -> Self {
        self.class = class;
        self
    }

    pub fn with_durability(mut self, max_durability: f32) -> Self {
        self.max_durability = max_durability;
        self
    }
}

/// Item instantiation facility used by the resolution pipeline
pub trait ItemFactory {
    /// Create one instance holding up to `quantity` units
    ///
    /// The instance's quantity is clamped to the template's max stack size.
    fn create(&mut self, resref: &str, owner: ActorId, quantity: u32) -> Result<CraftedItem>;
}

/// Template table plus the world's created-item set
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    templates: AHashMap<String, ItemTemplate>,
    created: Vec<CraftedItem>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_template(&mut self, template: ItemTemplate) {
        self.templates.insert(template.resref.clone(), template);
    }

    pub fn template(&self, resref: &str) -> Option<&ItemTemplate> {
        self.templates.get(resref)
    }

    /// Record finished items in the world
    pub fn store(&mut self, items: impl IntoIterator<Item = CraftedItem>) {
        self.created.extend(items);
    }

    pub fn created(&self) -> &[CraftedItem] {
        &self.created
    }

    pub fn find(&self, id: ItemId) -> Option<&CraftedItem> {
        self.created.iter().find(|item| item.id == id)
    }

    /// Items currently owned by an actor
    pub fn owned_by(&self, owner: ActorId) -> impl Iterator<Item = &CraftedItem> {
        self.created.iter().filter(move |item| item.owner == owner)
    }
}

impl ItemFactory for ItemRegistry {
    fn create(&mut self, resref: &str, owner: ActorId, quantity: u32) -> Result<CraftedItem> {
        let template = self
            .templates
            .get(resref)
            .ok_or_else(|| CraftError::UnknownTemplate(resref.to_string()))?;

        Ok(CraftedItem {
            id: ItemId::new(),
            resref: template.resref.clone(),
            name: template.name.clone(),
            class: template.class,
            quantity: quantity.clamp(1, template.max_stack.max(1)),
            identified: false,
            recommended_level: 0,
            crafter: None,
            owner,
            max_durability: template.max_durability,
            durability: template.max_durability,
            properties: Vec::new(),
        })
    }
}
