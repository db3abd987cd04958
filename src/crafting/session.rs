//! Crafting session - one in-progress crafting attempt
//!
//! Components are grouped into four tiers that are always resolved in the
//! same order: main, secondary, tertiary, enhancement.

use serde::{Deserialize, Serialize};

use crate::core::types::BlueprintId;
use crate::crafting::item::ComponentItem;

/// Priority group a component was placed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentTier {
    Main,
    Secondary,
    Tertiary,
    Enhancement,
}

impl ComponentTier {
    /// Resolution order
    pub const ORDER: [ComponentTier; 4] = [
        ComponentTier::Main,
        ComponentTier::Secondary,
        ComponentTier::Tertiary,
        ComponentTier::Enhancement,
    ];
}

/// Ephemeral state of one crafting attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftingSession {
    pub blueprint_id: BlueprintId,
    /// Effective level of the output; may differ from the blueprint level
    pub adjusted_level: i32,
    pub main: Vec<ComponentItem>,
    pub secondary: Vec<ComponentItem>,
    pub tertiary: Vec<ComponentItem>,
    pub enhancement: Vec<ComponentItem>,
}

impl CraftingSession {
    pub fn new(blueprint_id: BlueprintId, adjusted_level: i32) -> Self {
        Self {
            blueprint_id,
            adjusted_level,
            main: Vec::new(),
            secondary: Vec::new(),
            tertiary: Vec::new(),
            enhancement: Vec::new(),
        }
    }

    pub fn with_component(mut self, tier: ComponentTier, component: ComponentItem) -> Self {
        self.add_component(tier, component);
        self
    }

    pub fn add_component(&mut self, tier: ComponentTier, component: ComponentItem) {
        self.tier_mut(tier).push(component);
    }

    pub fn tier(&self, tier: ComponentTier) -> &[ComponentItem] {
        match tier {
            ComponentTier::Main => &self.main,
            ComponentTier::Secondary => &self.secondary,
            ComponentTier::Tertiary => &self.tertiary,
            ComponentTier::Enhancement => &self.enhancement,
        }
    }

    fn tier_mut(&mut self, tier: ComponentTier) -> &mut Vec<ComponentItem> {
        match tier {
            ComponentTier::Main => &mut self.main,
            ComponentTier::Secondary => &mut self.secondary,
            ComponentTier::Tertiary => &mut self.tertiary,
            ComponentTier::Enhancement => &mut self.enhancement,
        }
    }

    /// Every component in resolution order, tagged with its tier
    pub fn ordered_components(&self) -> impl Iterator<Item = (ComponentTier, &ComponentItem)> {
        ComponentTier::ORDER
            .into_iter()
            .flat_map(move |tier| self.tier(tier).iter().map(move |c| (tier, c)))
    }

    pub fn component_count(&self) -> usize {
        self.main.len() + self.secondary.len() + self.tertiary.len() + self.enhancement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.component_count() == 0
    }

    /// Drop all components; returns how many were consumed
    pub fn clear(&mut self) -> usize {
        let consumed = self.component_count();
        self.main.clear();
        self.secondary.clear();
        self.tertiary.clear();
        self.enhancement.clear();
        consumed
    }
}
