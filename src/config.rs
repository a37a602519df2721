//! Game configuration, read from a RON file.
//!
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```ron
//! (
//!     encounter_chance: 0.35,
//!     starters: ["mudkip"],
//!     rng_seed: Some(7),
//! )
//! ```

use crate::errors::{DataError, DataResult};
use crate::player::default_inventory;
use schema::Item;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Chance per grass step of starting a wild battle
    pub encounter_chance: f64,
    pub map_width: usize,
    pub map_height: usize,
    /// Advisory pause before each enemy turn, for presentation layers
    pub enemy_turn_delay_ms: u64,
    pub starter_level: u32,
    pub starters: Vec<String>,
    pub starting_inventory: HashMap<Item, u32>,
    /// Fixed seed for reproducible runs
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            encounter_chance: 0.2,
            map_width: 20,
            map_height: 12,
            enemy_turn_delay_ms: 300,
            starter_level: 5,
            starters: vec![
                "torchic".to_string(),
                "mudkip".to_string(),
                "treecko".to_string(),
            ],
            starting_inventory: default_inventory(),
            rng_seed: None,
        }
    }
}

impl GameConfig {
    pub fn load(path: &Path) -> DataResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&content).map_err(|source| DataError::Ron {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_ron(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(content)
    }
}
