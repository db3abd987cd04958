//! Component property transfer
//!
//! Each transferable property of a component gets one roll against the
//! running chance. Successes copy the property onto every crafted instance
//! and make later rolls harder; failures change nothing.

use serde::{Deserialize, Serialize};

use crate::core::config::CraftingConfig;
use crate::core::types::Percent;
use crate::crafting::item::{ComponentItem, CraftedItem, ItemProperty};
use crate::crafting::random::CraftRng;

/// Outcome of a single property roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRoll {
    /// Name of the component the property came from
    pub component: String,
    pub property: ItemProperty,
    /// Raw roll on the 0-100 scale, before equipment bonus
    pub roll: f32,
    /// Running chance the roll was compared against
    pub chance: Percent,
    pub success: bool,
}

impl PropertyRoll {
    pub fn property_name(&self) -> String {
        self.property.display_name()
    }
}

/// Result of resolving one component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentTransfer {
    pub successes: u32,
    /// Running chance after this component
    pub chance: Percent,
    pub rolls: Vec<PropertyRoll>,
}

/// A roll succeeds when `roll + equipment_bonus <= chance`
pub fn roll_succeeds(roll: f32, equipment_bonus: Percent, chance: Percent) -> bool {
    roll + equipment_bonus <= chance
}

/// Lower the running chance after a success, never below the floor
pub fn decay_chance(chance: Percent, decay: i32, floor: Percent) -> Percent {
    (chance - decay as f32).max(floor)
}

/// Resolve every transferable property of `component`
///
/// `chance` is the running chance going in; the returned transfer carries the
/// chance going out. Properties are evaluated in declaration order.
pub fn transfer_component(
    component: &ComponentItem,
    equipment_bonus: Percent,
    chance: Percent,
    items: &mut [CraftedItem],
    rng: &mut dyn CraftRng,
    config: &CraftingConfig,
) -> ComponentTransfer {
    let mut chance = chance;
    let mut successes = 0;
    let mut rolls = Vec::new();

    for property in component.transferable() {
        let roll = rng.random_float() * 100.0;
        let success = roll_succeeds(roll, equipment_bonus, chance);

        rolls.push(PropertyRoll {
            component: component.name.clone(),
            property: *property,
            roll,
            chance,
            success,
        });

        if success {
            for item in items.iter_mut() {
                item.receive_bonus(property);
            }

            let decay = rng.random_int(config.decay_min, config.decay_max);
            chance = decay_chance(chance, decay, config.chance_floor);
            successes += 1;

            tracing::debug!(
                "Applied component property {} from {} (roll {:.1}, chance now {:.1})",
                property.display_name(),
                component.name,
                roll,
                chance
            );
        } else {
            tracing::debug!(
                "Failed to apply component property {} from {} (roll {:.1} + {:.1} > {:.1})",
                property.display_name(),
                component.name,
                roll,
                equipment_bonus,
                chance
            );
        }
    }

    ComponentTransfer {
        successes,
        chance,
        rolls,
    }
}
