//! Crafting - blueprints, components and the resolution engine
//!
//! A crafting attempt consumes components grouped in four tiers and rolls
//! each of their component bonuses against a running chance derived from the
//! crafter's level. Successful rolls copy the bonus onto every crafted
//! instance and lower the chance for later rolls.

pub mod blueprint;
pub mod chance;
pub mod data;
pub mod experience;
pub mod item;
pub mod random;
pub mod registry;
pub mod resolution;
pub mod session;
pub mod skill;
pub mod transfer;
pub mod workshop;

pub use blueprint::{BaseStructure, Blueprint, BlueprintCatalog};
pub use chance::{base_chance, equipment_bonus, EquipmentBonuses, MAX_BASE_CHANCE};
pub use data::{ComponentLibrary, WorkshopData};
pub use experience::{award_xp, raw_craft_xp, LevelGapXp, Unadjusted, XpAdjustment};
pub use item::{BonusType, ComponentItem, CraftedItem, InsertPolicy, ItemClass, ItemProperty, PropertyKind};
pub use random::{CraftRng, SequenceRng};
pub use registry::{ItemFactory, ItemRegistry, ItemTemplate};
pub use resolution::{instantiate_output, resolve, CraftOutcome, CraftReport, Crafter};
pub use session::{ComponentTier, CraftingSession};
pub use skill::{EffectiveLevel, RankAsLevel, RankOffset, SkillDiscipline, SkillLedger, SkillRecord};
pub use transfer::{decay_chance, roll_succeeds, transfer_component, ComponentTransfer, PropertyRoll};
pub use workshop::Workshop;
