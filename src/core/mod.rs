pub mod config;
pub mod error;
pub mod types;

pub use config::CraftingConfig;
pub use error::{CraftError, Result};
pub use types::{ActorId, BlueprintId, ItemId, Percent};
