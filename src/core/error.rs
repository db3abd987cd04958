use thiserror::Error;

use crate::core::types::{ActorId, BlueprintId};
use crate::crafting::skill::SkillDiscipline;

#[derive(Error, Debug)]
pub enum CraftError {
    #[error("Blueprint not found: {0:?}")]
    BlueprintNotFound(BlueprintId),

    #[error("No {} skill record for actor {actor}", .discipline.name())]
    SkillRecordMissing {
        actor: ActorId,
        discipline: SkillDiscipline,
    },

    #[error("Unknown item template: {0}")]
    UnknownTemplate(String),

    #[error("No active crafting session for actor {0:?}")]
    NoActiveSession(ActorId),

    #[error("Actor {0:?} is already crafting")]
    ActorBusy(ActorId),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for CraftError {
    fn from(e: toml::de::Error) -> Self {
        CraftError::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CraftError>;
