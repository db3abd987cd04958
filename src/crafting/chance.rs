//! Chance model - base transfer chance and equipment bonus
//!
//! The base chance is a saturating step curve over the gap between the
//! crafter's effective level and the item level. Equipment adds a flat
//! offset that is applied to each roll, not to the chance itself.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::Percent;
use crate::crafting::skill::SkillDiscipline;

/// Highest base chance any crafter can reach
pub const MAX_BASE_CHANCE: Percent = 90.0;

/// Level gap at or below which nothing can be transferred
pub const MIN_DELTA: i32 = -5;

/// Level gap at or above which the chance saturates
pub const MAX_DELTA: i32 = 4;

/// Step table for level gaps strictly between `MIN_DELTA` and `MAX_DELTA`
const CHANCE_STEPS: [(i32, Percent); 8] = [
    (-4, 10.0),
    (-3, 15.0),
    (-2, 25.0),
    (-1, 35.0),
    (0, 50.0),
    (1, 65.0),
    (2, 75.0),
    (3, 85.0),
];

/// Base chance (0-90) to transfer a component property
pub fn base_chance(effective_level: i32, item_level: i32) -> Percent {
    let delta = effective_level.saturating_sub(item_level);

    if delta <= MIN_DELTA {
        return 0.0;
    }
    if delta >= MAX_DELTA {
        return MAX_BASE_CHANCE;
    }

    CHANCE_STEPS
        .iter()
        .find(|(d, _)| *d == delta)
        .map(|(_, chance)| *chance)
        .unwrap_or(0.0)
}

/// Equipment-derived crafting bonus, one integer per discipline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentBonuses {
    bonuses: AHashMap<SkillDiscipline, i32>,
}

impl EquipmentBonuses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, discipline: SkillDiscipline, bonus: i32) -> Self {
        self.set(discipline, bonus);
        self
    }

    pub fn set(&mut self, discipline: SkillDiscipline, bonus: i32) {
        self.bonuses.insert(discipline, bonus);
    }

    /// Raw bonus for a discipline (0 when nothing worn grants it)
    pub fn get(&self, discipline: SkillDiscipline) -> i32 {
        self.bonuses.get(&discipline).copied().unwrap_or(0)
    }
}

/// Roll offset granted by equipment: `bonus * rate` percentage points
pub fn equipment_bonus(equipment: &EquipmentBonuses, discipline: SkillDiscipline, rate: f32) -> Percent {
    equipment.get(discipline) as f32 * rate
}
