//! Items and bonus properties
//!
//! Components carry *component bonus* properties that may be transferred to a
//! crafted item. How a transferred bonus lands depends on the class of the
//! receiving item: pass-through items (themselves components) aggregate the
//! bonus, terminal items receive it as an independent property slot.

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, ItemId};

/// Kind of effect a bonus property grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusType {
    ArmorClass,
    Hitpoints,
    Damage,
    Durability,
    Harvesting,
    CooldownRecovery,
    Enmity,
    Luck,
    Meditate,
    Rest,
    StructureBonus,
    Medicine,
}

impl BonusType {
    pub fn name(&self) -> &'static str {
        match self {
            BonusType::ArmorClass => "AC Up",
            BonusType::Hitpoints => "HP Up",
            BonusType::Damage => "Damage Up",
            BonusType::Durability => "Durability Up",
            BonusType::Harvesting => "Harvesting Up",
            BonusType::CooldownRecovery => "Cooldown Recovery Up",
            BonusType::Enmity => "Enmity Up",
            BonusType::Luck => "Luck Up",
            BonusType::Meditate => "Meditate Up",
            BonusType::Rest => "Rest Up",
            BonusType::StructureBonus => "Structure Bonus Up",
            BonusType::Medicine => "Medicine Up",
        }
    }
}

/// Whether a property can be transferred by crafting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    /// Transferable bonus carried by a component
    ComponentBonus,
    /// Direct stat property; stays on the item it is on
    Direct,
}

/// A typed, magnitude-bearing effect attached to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemProperty {
    pub kind: PropertyKind,
    pub bonus: BonusType,
    pub amount: i32,
}

impl ItemProperty {
    pub fn component_bonus(bonus: BonusType, amount: i32) -> Self {
        Self {
            kind: PropertyKind::ComponentBonus,
            bonus,
            amount,
        }
    }

    pub fn direct(bonus: BonusType, amount: i32) -> Self {
        Self {
            kind: PropertyKind::Direct,
            bonus,
            amount,
        }
    }

    pub fn is_transferable(&self) -> bool {
        self.kind == PropertyKind::ComponentBonus
    }

    /// Display name, e.g. "AC Up 2"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.bonus.name(), self.amount)
    }
}

/// Policy used when inserting a direct property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertPolicy {
    /// Always add a new slot; like properties coexist
    IgnoreExisting,
    /// Remove like properties, then add
    ReplaceExisting,
    /// Skip when a like property is already present
    KeepExisting,
}

/// Whether an item is itself a crafting component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    /// Finished item; transferred bonuses become direct properties
    #[default]
    Terminal,
    /// Intermediate component; transferred bonuses aggregate as component bonuses
    PassThrough,
}

/// A consumed crafting component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentItem {
    #[serde(default)]
    pub id: ItemId,
    pub resref: String,
    pub name: String,
    /// Class of the item this component was crafted as. Transfer dispatch
    /// uses the output's class, so this only carries the class into a later craft.
    #[serde(default)]
    pub class: ItemClass,
    /// Properties in declaration order
    #[serde(default)]
    pub properties: Vec<ItemProperty>,
}

impl ComponentItem {
    pub fn new(resref: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            resref: resref.into(),
            name: name.into(),
            class: ItemClass::Terminal,
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: ItemProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Component bonuses eligible for transfer, in declaration order
    pub fn transferable(&self) -> impl Iterator<Item = &ItemProperty> {
        self.properties.iter().filter(|p| p.is_transferable())
    }
}

/// A crafted output instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftedItem {
    pub id: ItemId,
    pub resref: String,
    pub name: String,
    pub class: ItemClass,
    pub quantity: u32,
    pub identified: bool,
    pub recommended_level: i32,
    /// Actor who crafted the item
    pub crafter: Option<ActorId>,
    pub owner: ActorId,
    pub max_durability: f32,
    pub durability: f32,
    pub properties: Vec<ItemProperty>,
}

impl CraftedItem {
    /// Add a direct property according to `policy`
    ///
    /// Returns false when `KeepExisting` skipped the insert.
    pub fn add_property(&mut self, property: ItemProperty, policy: InsertPolicy) -> bool {
        let property = ItemProperty {
            kind: PropertyKind::Direct,
            ..property
        };
        let has_like = |p: &ItemProperty| p.kind == PropertyKind::Direct && p.bonus == property.bonus;

        match policy {
            InsertPolicy::IgnoreExisting => {}
            InsertPolicy::ReplaceExisting => self.properties.retain(|p| !has_like(p)),
            InsertPolicy::KeepExisting => {
                if self.properties.iter().any(has_like) {
                    return false;
                }
            }
        }

        self.properties.push(property);
        true
    }

    /// Merge a component bonus into the like bonus already present, or add it
    pub fn add_component_bonus(&mut self, bonus: BonusType, amount: i32) {
        if let Some(existing) = self
            .properties
            .iter_mut()
            .find(|p| p.kind == PropertyKind::ComponentBonus && p.bonus == bonus)
        {
            existing.amount += amount;
        } else {
            self.properties.push(ItemProperty::component_bonus(bonus, amount));
        }
    }

    /// Apply a transferred component property according to this item's class
    pub fn receive_bonus(&mut self, property: &ItemProperty) {
        match self.class {
            ItemClass::PassThrough => self.add_component_bonus(property.bonus, property.amount),
            ItemClass::Terminal => {
                self.add_property(*property, InsertPolicy::IgnoreExisting);
            }
        }
    }

    /// Total magnitude of a bonus type across all slots
    pub fn total_bonus(&self, bonus: BonusType) -> i32 {
        self.properties
            .iter()
            .filter(|p| p.bonus == bonus)
            .map(|p| p.amount)
            .sum()
    }

    /// Raise max durability and restore the item to full
    pub fn add_durability(&mut self, bonus: f32) {
        self.max_durability += bonus;
        self.durability = self.max_durability;
    }
}

/// A crafted pass-through item consumed as a component in a later craft
impl From<&CraftedItem> for ComponentItem {
    fn from(item: &CraftedItem) -> Self {
        Self {
            id: item.id,
            resref: item.resref.clone(),
            name: item.name.clone(),
            class: item.class,
            properties: item.properties.clone(),
        }
    }
}
