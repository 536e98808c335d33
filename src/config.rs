//! Advisor configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Command-line flags override whatever the file says.

use crate::strategy::TradePolicy;
use crate::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Which combats count as value trades
    pub trade_policy: TradePolicy,

    /// Fixed cost of the hero power
    pub hero_power_cost: u8,

    /// Board slots per player
    pub max_board_size: usize,

    /// Mana crystal cap
    pub max_mana: u8,

    /// Opponent life at the start of each game
    pub opponent_starting_life: i32,

    /// Extra catalog attempts on transient failures
    pub catalog_retries: u32,

    /// How long the log tailer sleeps at end of file
    pub poll_interval_ms: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            trade_policy: TradePolicy::default(),
            hero_power_cost: 2,
            max_board_size: 7,
            max_mana: 10,
            opponent_starting_life: 30,
            catalog_retries: 2,
            poll_interval_ms: 10,
        }
    }
}

impl AdvisorConfig {
    /// Load from a JSON file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: AdvisorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_mana == 0 {
            return Err(AdvisorError::InvalidConfig("max_mana must be at least 1".to_string()));
        }
        if self.max_board_size == 0 {
            return Err(AdvisorError::InvalidConfig("max_board_size must be at least 1".to_string()));
        }
        if self.opponent_starting_life <= 0 {
            return Err(AdvisorError::InvalidConfig(
                "opponent_starting_life must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
