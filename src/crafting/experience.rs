//! Experience awarded for a completed craft

use crate::core::config::CraftingConfig;
use crate::crafting::random::CraftRng;

/// Scales raw craft XP by the gap between item level and skill rank
pub trait XpAdjustment {
    fn adjust(&self, base_xp: u32, item_level: i32, skill_rank: u32) -> f32;
}

/// No adjustment
#[derive(Debug, Clone, Copy, Default)]
pub struct Unadjusted;

impl XpAdjustment for Unadjusted {
    fn adjust(&self, base_xp: u32, _item_level: i32, _skill_rank: u32) -> f32 {
        base_xp as f32
    }
}

/// Linear penalty for crafting items below the crafter's rank
///
/// Each rank above the item level removes `penalty_per_level` of the base XP.
/// Items at or above the crafter's rank award full XP.
#[derive(Debug, Clone, Copy)]
pub struct LevelGapXp {
    pub penalty_per_level: f32,
}

impl Default for LevelGapXp {
    fn default() -> Self {
        Self { penalty_per_level: 0.1 }
    }
}

impl XpAdjustment for LevelGapXp {
    fn adjust(&self, base_xp: u32, item_level: i32, skill_rank: u32) -> f32 {
        let gap = (skill_rank as i64 - item_level as i64).max(0) as f32;
        base_xp as f32 * (1.0 - self.penalty_per_level * gap)
    }
}

/// Raw XP before adjustment: `base_xp + successes * r`
///
/// One increment `r` is drawn per craft, even when nothing transferred.
pub fn raw_craft_xp(successes: u32, rng: &mut dyn CraftRng, config: &CraftingConfig) -> u32 {
    let increment = rng.random_int(config.xp_bonus_min, config.xp_bonus_max).max(0) as u32;
    config.base_xp.saturating_add(successes.saturating_mul(increment))
}

/// Final XP award, never negative
pub fn award_xp(raw_xp: u32, item_level: i32, skill_rank: u32, adjustment: &dyn XpAdjustment) -> u32 {
    let adjusted = adjustment.adjust(raw_xp, item_level, skill_rank);
    if adjusted.is_finite() && adjusted > 0.0 {
        adjusted as u32
    } else {
        0
    }
}
