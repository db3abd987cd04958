//! Crafting resolution pipeline
//!
//! Turns a finished crafting session into items and experience:
//! 1. Base chance from effective level vs item level (critical failure at the floor)
//! 2. Output instantiation, one multi-count unit or N single units
//! 3. Provenance and structure durability on every instance
//! 4. Component tiers resolved in order against one decaying chance
//! 5. Experience from base value plus per-success increment
//!
//! The session is cleared on every path.

use serde::{Deserialize, Serialize};

use crate::core::config::CraftingConfig;
use crate::core::error::Result;
use crate::core::types::{ActorId, BlueprintId, Percent};
use crate::crafting::blueprint::Blueprint;
use crate::crafting::chance::base_chance;
use crate::crafting::experience::{award_xp, raw_craft_xp, XpAdjustment};
use crate::crafting::item::CraftedItem;
use crate::crafting::random::CraftRng;
use crate::crafting::registry::ItemFactory;
use crate::crafting::session::CraftingSession;
use crate::crafting::transfer::{transfer_component, PropertyRoll};

/// Crafter inputs resolved by the caller before the attempt runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crafter {
    pub actor: ActorId,
    /// Skill rank after external leveling rules
    pub effective_level: i32,
    pub skill_rank: u32,
    /// Roll offset from equipment, in percentage points
    pub equipment_bonus: Percent,
}

/// Details of a successful craft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftReport {
    pub blueprint_id: BlueprintId,
    pub items: Vec<CraftedItem>,
    /// Number of properties transferred
    pub success_count: u32,
    pub xp_awarded: u32,
    pub base_chance: Percent,
    /// Running chance after the last roll
    pub final_chance: Percent,
    pub rolls: Vec<PropertyRoll>,
}

/// Result of resolving a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CraftOutcome {
    Success(CraftReport),
    /// Skill far too low: nothing created, every component lost
    CriticalFailure {
        blueprint_id: BlueprintId,
        components_lost: usize,
    },
}

impl CraftOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CraftOutcome::Success(_))
    }

    pub fn report(&self) -> Option<&CraftReport> {
        match self {
            CraftOutcome::Success(report) => Some(report),
            CraftOutcome::CriticalFailure { .. } => None,
        }
    }

    pub fn xp_awarded(&self) -> u32 {
        self.report().map_or(0, |r| r.xp_awarded)
    }
}

/// Resolve a crafting session
///
/// The returned XP has not been granted yet; the caller owns the skill
/// record and awards it.
pub fn resolve(
    session: &mut CraftingSession,
    blueprint: &Blueprint,
    crafter: &Crafter,
    factory: &mut dyn ItemFactory,
    xp_adjustment: &dyn XpAdjustment,
    rng: &mut dyn CraftRng,
    config: &CraftingConfig,
) -> Result<CraftOutcome> {
    let outcome = run_resolution(session, blueprint, crafter, factory, xp_adjustment, rng, config);
    session.clear();
    outcome
}

fn run_resolution(
    session: &CraftingSession,
    blueprint: &Blueprint,
    crafter: &Crafter,
    factory: &mut dyn ItemFactory,
    xp_adjustment: &dyn XpAdjustment,
    rng: &mut dyn CraftRng,
    config: &CraftingConfig,
) -> Result<CraftOutcome> {
    let item_level = session.adjusted_level;
    let starting_chance = base_chance(crafter.effective_level, item_level);

    if starting_chance <= config.critical_failure_chance {
        let components_lost = session.component_count();
        tracing::warn!(
            "Critical failure crafting {}: effective level {} vs item level {}, {} components lost",
            blueprint.name,
            crafter.effective_level,
            item_level,
            components_lost
        );
        return Ok(CraftOutcome::CriticalFailure {
            blueprint_id: blueprint.id,
            components_lost,
        });
    }

    let mut items = instantiate_output(blueprint, crafter.actor, factory)?;
    for item in items.iter_mut() {
        item.identified = true;
        item.recommended_level = item_level;
        item.crafter = Some(crafter.actor);

        if let Some(structure) = &blueprint.base_structure {
            item.add_durability(structure.durability);
        }
    }

    let mut chance = starting_chance;
    let mut success_count = 0;
    let mut rolls = Vec::new();

    for (_tier, component) in session.ordered_components() {
        let transfer = transfer_component(
            component,
            crafter.equipment_bonus,
            chance,
            &mut items,
            rng,
            config,
        );
        chance = transfer.chance;
        success_count += transfer.successes;
        rolls.extend(transfer.rolls);
    }

    let raw_xp = raw_craft_xp(success_count, rng, config);
    let xp_awarded = award_xp(raw_xp, item_level, crafter.skill_rank, xp_adjustment);

    tracing::info!(
        "Crafted {}x {} ({} properties transferred, {} xp)",
        blueprint.quantity,
        blueprint.name,
        success_count,
        xp_awarded
    );

    Ok(CraftOutcome::Success(CraftReport {
        blueprint_id: blueprint.id,
        items,
        success_count,
        xp_awarded,
        base_chance: starting_chance,
        final_chance: chance,
        rolls,
    }))
}

/// Create enough instances to represent the blueprint quantity
///
/// Stackable outputs fit in one instance; otherwise further instances are
/// created until the requested quantity is covered.
pub fn instantiate_output(
    blueprint: &Blueprint,
    owner: ActorId,
    factory: &mut dyn ItemFactory,
) -> Result<Vec<CraftedItem>> {
    let requested = blueprint.quantity.max(1);
    let mut items = Vec::new();
    let mut represented = 0;

    while represented < requested {
        let item = factory.create(&blueprint.item_resref, owner, requested - represented)?;
        represented += item.quantity.max(1);
        items.push(item);
    }

    Ok(items)
}
