//! Workshop - the begin/complete crafting flow around the resolution engine
//!
//! `begin_crafting` validates eligibility, parks the session and marks the
//! actor busy. `complete_crafting` is the deferred continuation: it takes the
//! session, resolves it, awards XP and stores the created items. The busy
//! flag is cleared on every path so a fault never leaves the actor stuck.

use ahash::{AHashMap, AHashSet};

use crate::core::config::CraftingConfig;
use crate::core::error::{CraftError, Result};
use crate::core::types::{ActorId, Percent};
use crate::crafting::blueprint::{Blueprint, BlueprintCatalog};
use crate::crafting::chance::{equipment_bonus, EquipmentBonuses};
use crate::crafting::experience::{Unadjusted, XpAdjustment};
use crate::crafting::random::CraftRng;
use crate::crafting::registry::ItemRegistry;
use crate::crafting::resolution::{resolve, CraftOutcome, Crafter};
use crate::crafting::session::CraftingSession;
use crate::crafting::skill::{EffectiveLevel, RankAsLevel, SkillLedger};

pub struct Workshop {
    pub blueprints: BlueprintCatalog,
    pub items: ItemRegistry,
    pub skills: SkillLedger,
    pub config: CraftingConfig,
    equipment: AHashMap<ActorId, EquipmentBonuses>,
    sessions: AHashMap<ActorId, CraftingSession>,
    busy: AHashSet<ActorId>,
    effective_level: Box<dyn EffectiveLevel>,
    xp_adjustment: Box<dyn XpAdjustment>,
}

impl Workshop {
    pub fn new(blueprints: BlueprintCatalog, items: ItemRegistry) -> Self {
        Self {
            blueprints,
            items,
            skills: SkillLedger::new(),
            config: CraftingConfig::default(),
            equipment: AHashMap::new(),
            sessions: AHashMap::new(),
            busy: AHashSet::new(),
            effective_level: Box::new(RankAsLevel),
            xp_adjustment: Box::new(Unadjusted),
        }
    }

    pub fn with_config(mut self, config: CraftingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_effective_level(mut self, calculator: impl EffectiveLevel + 'static) -> Self {
        self.effective_level = Box::new(calculator);
        self
    }

    pub fn with_xp_adjustment(mut self, adjustment: impl XpAdjustment + 'static) -> Self {
        self.xp_adjustment = Box::new(adjustment);
        self
    }

    /// Replace the equipment bonuses an actor currently has worn
    pub fn set_equipment(&mut self, actor: ActorId, bonuses: EquipmentBonuses) {
        self.equipment.insert(actor, bonuses);
    }

    pub fn is_busy(&self, actor: ActorId) -> bool {
        self.busy.contains(&actor)
    }

    pub fn session(&self, actor: ActorId) -> Option<&CraftingSession> {
        self.sessions.get(&actor)
    }

    /// Equipment roll offset for an actor's discipline
    pub fn equipment_bonus(&self, actor: ActorId, blueprint: &Blueprint) -> Percent {
        self.equipment
            .get(&actor)
            .map(|eq| equipment_bonus(eq, blueprint.discipline, self.config.equipment_bonus_rate))
            .unwrap_or(0.0)
    }

    /// Validate eligibility and park the session until completion
    pub fn begin_crafting(&mut self, actor: ActorId, session: CraftingSession) -> Result<()> {
        if self.busy.contains(&actor) {
            return Err(CraftError::ActorBusy(actor));
        }

        let blueprint = self
            .blueprints
            .get(session.blueprint_id)
            .ok_or(CraftError::BlueprintNotFound(session.blueprint_id))?;

        if self.skills.rank(actor, blueprint.discipline).is_none() {
            return Err(CraftError::SkillRecordMissing {
                actor,
                discipline: blueprint.discipline,
            });
        }

        tracing::debug!(
            "{} begins crafting {} with {} components",
            actor,
            blueprint.name,
            session.component_count()
        );

        self.sessions.insert(actor, session);
        self.busy.insert(actor);
        Ok(())
    }

    /// Resolve the actor's parked session
    pub fn complete_crafting(&mut self, actor: ActorId, rng: &mut dyn CraftRng) -> Result<CraftOutcome> {
        let result = self.run_completion(actor, rng);
        self.busy.remove(&actor);

        if let Err(e) = &result {
            tracing::error!("Crafting attempt for {} failed: {}", actor, e);
        }
        result
    }

    fn run_completion(&mut self, actor: ActorId, rng: &mut dyn CraftRng) -> Result<CraftOutcome> {
        let mut session = self
            .sessions
            .remove(&actor)
            .ok_or(CraftError::NoActiveSession(actor))?;

        let blueprint = self
            .blueprints
            .get(session.blueprint_id)
            .ok_or(CraftError::BlueprintNotFound(session.blueprint_id))?
            .clone();

        let skill_rank = self
            .skills
            .rank(actor, blueprint.discipline)
            .ok_or(CraftError::SkillRecordMissing {
                actor,
                discipline: blueprint.discipline,
            })?;

        let crafter = Crafter {
            actor,
            effective_level: self
                .effective_level
                .effective_level(actor, skill_rank, blueprint.discipline),
            skill_rank,
            equipment_bonus: self.equipment_bonus(actor, &blueprint),
        };

        let outcome = resolve(
            &mut session,
            &blueprint,
            &crafter,
            &mut self.items,
            self.xp_adjustment.as_ref(),
            rng,
            &self.config,
        )?;

        if let CraftOutcome::Success(report) = &outcome {
            self.skills
                .award_xp(actor, blueprint.discipline, report.xp_awarded)?;
            self.items.store(report.items.iter().cloned());
        }

        Ok(outcome)
    }
}
