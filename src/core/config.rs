//! Crafting configuration with documented constants
//!
//! All tuning numbers used by the resolution engine live here, with notes on
//! how they interact with each other.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{CraftError, Result};

/// Configuration for crafting resolution
///
/// Defaults reproduce the reference balance. Every field is optional in a
/// config file; missing fields fall back to the default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftingConfig {
    // === EXPERIENCE ===
    /// Flat XP granted for every completed craft, before per-success bonus
    pub base_xp: u32,

    /// Lower bound of the per-success XP increment (inclusive)
    ///
    /// A single increment is drawn per craft and multiplied by the number of
    /// transferred properties.
    pub xp_bonus_min: i32,

    /// Upper bound of the per-success XP increment (inclusive)
    pub xp_bonus_max: i32,

    // === CHANCE DECAY ===
    /// Minimum chance lost after each successful property transfer
    pub decay_min: i32,

    /// Maximum chance lost after each successful property transfer
    ///
    /// With 1..=5, a crafter at 90% can expect roughly 30 transfers before
    /// bottoming out at the floor.
    pub decay_max: i32,

    /// Running chance never drops below this value
    pub chance_floor: f32,

    // === FAILURE ===
    /// Base chance at or below which the craft critically fails
    ///
    /// Critical failure destroys every component and creates nothing.
    pub critical_failure_chance: f32,

    // === EQUIPMENT ===
    /// Percentage points granted per point of discipline equipment bonus
    pub equipment_bonus_rate: f32,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            base_xp: 250,
            xp_bonus_min: 1,
            xp_bonus_max: 50,
            decay_min: 1,
            decay_max: 5,
            chance_floor: 1.0,
            critical_failure_chance: 1.0,
            equipment_bonus_rate: 0.5,
        }
    }
}

impl CraftingConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CraftingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.xp_bonus_min > self.xp_bonus_max {
            return Err(CraftError::InvalidConfig(format!(
                "xp_bonus_min ({}) should be <= xp_bonus_max ({})",
                self.xp_bonus_min, self.xp_bonus_max
            )));
        }

        if self.decay_min > self.decay_max {
            return Err(CraftError::InvalidConfig(format!(
                "decay_min ({}) should be <= decay_max ({})",
                self.decay_min, self.decay_max
            )));
        }

        // Non-positive decay would let the chance climb or stall forever
        if self.decay_min < 1 {
            return Err(CraftError::InvalidConfig("decay_min must be at least 1".into()));
        }

        if self.chance_floor < 0.0 {
            return Err(CraftError::InvalidConfig("chance_floor must not be negative".into()));
        }

        if self.equipment_bonus_rate < 0.0 {
            return Err(CraftError::InvalidConfig(
                "equipment_bonus_rate must not be negative".into(),
            ));
        }

        Ok(())
    }
}
