use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::CombatError;
use crate::player::Hp;

/// Environment variable naming a TOML config file for [`CombatConfig::load`].
pub const CONFIG_ENV_VAR: &str = "POKER_COMBAT_CONFIG";

pub const DEFAULT_SMALL_BLIND: Hp = 5.0;
pub const DEFAULT_BIG_BLIND: Hp = 10.0;
pub const DEFAULT_ANTE: Hp = 0.5;
pub const DEFAULT_HAND_CACHE_CAPACITY: usize = 1024;
pub const DEFAULT_FIRST_STRIKE_DAMAGE: Hp = 15.0;

/// Forced stakes posted before the first betting round.
///
/// The small blind doubles as the fold penalty and the big blind as the
/// minimum bet and raise increment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlindConfig {
    pub small_blind: Hp,
    pub big_blind: Hp,
    pub ante: Hp,
}

impl Default for BlindConfig {
    fn default() -> Self {
        Self {
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            ante: DEFAULT_ANTE,
        }
    }
}

impl BlindConfig {
    pub fn validate(&self) -> Result<(), CombatError> {
        let all_finite = [self.small_blind, self.big_blind, self.ante]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(CombatError::InvalidConfig(
                "blinds and ante must be finite".into(),
            ));
        }
        if self.small_blind <= 0.0 {
            return Err(CombatError::InvalidConfig(format!(
                "small_blind must be positive (got {})",
                self.small_blind
            )));
        }
        if self.big_blind < self.small_blind {
            return Err(CombatError::InvalidConfig(format!(
                "big_blind {} is below small_blind {}",
                self.big_blind, self.small_blind
            )));
        }
        if self.ante < 0.0 {
            return Err(CombatError::InvalidConfig(format!(
                "ante must not be negative (got {})",
                self.ante
            )));
        }
        Ok(())
    }
}

/// Engine-wide settings a host hands to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub blinds: BlindConfig,
    /// Entries kept by a [`crate::cache::HandCache`]; 0 disables caching.
    pub hand_cache_capacity: usize,
    pub first_strike_damage: Hp,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            blinds: BlindConfig::default(),
            hand_cache_capacity: DEFAULT_HAND_CACHE_CAPACITY,
            first_strike_damage: DEFAULT_FIRST_STRIKE_DAMAGE,
        }
    }
}

impl CombatConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, CombatError> {
        let cfg: CombatConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CombatError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Reads the file named by [`CONFIG_ENV_VAR`] if set, otherwise returns defaults.
    pub fn load() -> Result<Self, CombatError> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.is_empty() => {
                tracing::debug!(%path, "loading combat config");
                Self::from_path(path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), CombatError> {
        self.blinds.validate()?;
        if !self.first_strike_damage.is_finite() || self.first_strike_damage < 0.0 {
            return Err(CombatError::InvalidConfig(format!(
                "first_strike_damage must be a non-negative number (got {})",
                self.first_strike_damage
            )));
        }
        Ok(())
    }
}
