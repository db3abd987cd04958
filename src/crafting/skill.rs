//! Crafting disciplines and the crafter skill ledger

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{CraftError, Result};
use crate::core::types::ActorId;

/// Skill discipline a blueprint is crafted with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillDiscipline {
    Armorsmith,
    Weaponsmith,
    Cooking,
    Engineering,
    Fabrication,
    Medicine,
}

impl SkillDiscipline {
    pub const ALL: [SkillDiscipline; 6] = [
        SkillDiscipline::Armorsmith,
        SkillDiscipline::Weaponsmith,
        SkillDiscipline::Cooking,
        SkillDiscipline::Engineering,
        SkillDiscipline::Fabrication,
        SkillDiscipline::Medicine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SkillDiscipline::Armorsmith => "Armorsmith",
            SkillDiscipline::Weaponsmith => "Weaponsmith",
            SkillDiscipline::Cooking => "Cooking",
            SkillDiscipline::Engineering => "Engineering",
            SkillDiscipline::Fabrication => "Fabrication",
            SkillDiscipline::Medicine => "Medicine",
        }
    }
}

/// Persistent skill state for one (actor, discipline) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub rank: u32,
    /// Experience accumulated toward the next rank
    pub xp: u64,
}

/// Skill records keyed by actor and discipline
#[derive(Debug, Clone, Default)]
pub struct SkillLedger {
    records: AHashMap<(ActorId, SkillDiscipline), SkillRecord>,
}

impl SkillLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the rank for a discipline
    pub fn set_rank(&mut self, actor: ActorId, discipline: SkillDiscipline, rank: u32) {
        self.records.entry((actor, discipline)).or_default().rank = rank;
    }

    pub fn record(&self, actor: ActorId, discipline: SkillDiscipline) -> Option<&SkillRecord> {
        self.records.get(&(actor, discipline))
    }

    pub fn rank(&self, actor: ActorId, discipline: SkillDiscipline) -> Option<u32> {
        self.record(actor, discipline).map(|r| r.rank)
    }

    /// Add experience to an existing record
    pub fn award_xp(&mut self, actor: ActorId, discipline: SkillDiscipline, xp: u32) -> Result<u64> {
        let record = self
            .records
            .get_mut(&(actor, discipline))
            .ok_or(CraftError::SkillRecordMissing { actor, discipline })?;
        record.xp += u64::from(xp);
        Ok(record.xp)
    }
}

/// Converts a skill rank into the level compared against item level
///
/// Implementations may fold in gear, buffs or other leveling rules.
pub trait EffectiveLevel {
    fn effective_level(&self, actor: ActorId, rank: u32, discipline: SkillDiscipline) -> i32;
}

/// Effective level is the raw skill rank
#[derive(Debug, Clone, Copy, Default)]
pub struct RankAsLevel;

impl EffectiveLevel for RankAsLevel {
    fn effective_level(&self, _actor: ActorId, rank: u32, _discipline: SkillDiscipline) -> i32 {
        rank_level(rank)
    }
}

/// Effective level is the rank shifted by a fixed offset
#[derive(Debug, Clone, Copy, Default)]
pub struct RankOffset(pub i32);

impl EffectiveLevel for RankOffset {
    fn effective_level(&self, _actor: ActorId, rank: u32, _discipline: SkillDiscipline) -> i32 {
        rank_level(rank).saturating_add(self.0)
    }
}

/// Ranks past `i32::MAX` saturate instead of wrapping negative
fn rank_level(rank: u32) -> i32 {
    i32::try_from(rank).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crafting::chance::base_chance;

    #[test]
    fn test_huge_rank_saturates_level() {
        let actor = ActorId::new();
        let level = RankAsLevel.effective_level(actor, 3_000_000_000, SkillDiscipline::Cooking);
        assert_eq!(level, i32::MAX);
        assert_eq!(base_chance(level, 10), 90.0);
        assert_eq!(RankAsLevel.effective_level(actor, 12, SkillDiscipline::Cooking), 12);
    }

    #[test]
    fn test_rank_offset_saturates() {
        let actor = ActorId::new();
        let d = SkillDiscipline::Weaponsmith;
        assert_eq!(RankOffset(i32::MAX).effective_level(actor, 5, d), i32::MAX);
        assert_eq!(RankOffset(i32::MIN).effective_level(actor, 5, d), i32::MIN + 5);
        assert_eq!(RankOffset(-3).effective_level(actor, u32::MAX, d), i32::MAX - 3);
        assert_eq!(RankOffset(2).effective_level(actor, 10, d), 12);
    }

    #[test]
    fn test_missing_record_has_no_rank() {
        let ledger = SkillLedger::new();
        assert!(ledger.rank(ActorId::new(), SkillDiscipline::Cooking).is_none());
    }

    #[test]
    fn test_award_xp_accumulates() {
        let mut ledger = SkillLedger::new();
        let actor = ActorId::new();
        ledger.set_rank(actor, SkillDiscipline::Weaponsmith, 7);

        assert_eq!(ledger.award_xp(actor, SkillDiscipline::Weaponsmith, 250).unwrap(), 250);
        assert_eq!(ledger.award_xp(actor, SkillDiscipline::Weaponsmith, 40).unwrap(), 290);
        assert_eq!(ledger.rank(actor, SkillDiscipline::Weaponsmith), Some(7));
    }

    #[test]
    fn test_award_xp_without_record_fails() {
        let mut ledger = SkillLedger::new();
        let actor = ActorId::new();
        ledger.set_rank(actor, SkillDiscipline::Cooking, 1);

        let err = ledger.award_xp(actor, SkillDiscipline::Medicine, 10);
        assert!(matches!(err, Err(CraftError::SkillRecordMissing { .. })));
    }

    #[test]
    fn test_set_rank_keeps_xp() {
        let mut ledger = SkillLedger::new();
        let actor = ActorId::new();
        ledger.set_rank(actor, SkillDiscipline::Fabrication, 2);
        ledger.award_xp(actor, SkillDiscipline::Fabrication, 100).unwrap();
        ledger.set_rank(actor, SkillDiscipline::Fabrication, 3);

        let record = ledger.record(actor, SkillDiscipline::Fabrication).unwrap();
        assert_eq!(record.rank, 3);
        assert_eq!(record.xp, 100);
    }

    #[test]
    fn test_effective_level_impls() {
        let actor = ActorId::new();
        assert_eq!(RankAsLevel.effective_level(actor, 12, SkillDiscipline::Cooking), 12);
        assert_eq!(RankOffset(-3).effective_level(actor, 12, SkillDiscipline::Cooking), 9);
    }
}
