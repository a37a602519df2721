use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// Consumable item identifiers. Unknown ids are kept verbatim so data files
/// may reference items the engine does not know how to use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Item {
    PokeBall,
    GreatBall,
    Potion,
    PpRestore,
    Other(String),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Item::PokeBall => "pokeball",
            Item::GreatBall => "greatball",
            Item::Potion => "potion",
            Item::PpRestore => "pp_restore",
            Item::Other(id) => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Item::PokeBall => "Pokeball",
            Item::GreatBall => "Greatball",
            Item::Potion => "Potion",
            Item::PpRestore => "PP Restore",
            Item::Other(id) => id,
        }
    }
}

impl From<&str> for Item {
    fn from(id: &str) -> Self {
        match id {
            "pokeball" => Item::PokeBall,
            "greatball" => Item::GreatBall,
            "potion" => Item::Potion,
            "pp_restore" => Item::PpRestore,
            other => Item::Other(other.to_string()),
        }
    }
}

impl From<String> for Item {
    fn from(id: String) -> Self {
        Item::from(id.as_str())
    }
}

impl From<Item> for String {
    fn from(item: Item) -> Self {
        item.id().to_string()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One entry of a map's wild spawn pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnEntry {
    pub id: String,
    /// Relative weight. Older data files call this `chance`.
    #[serde(alias = "chance")]
    pub weight: f64,
}

/// Independent Bernoulli trial rolled once per defeated wild creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropEntry {
    pub id: Item,
    #[serde(default)]
    pub chance: f64,
    pub min: u32,
    pub max: u32,
}

/// Drop table used when the data set does not provide one.
pub fn default_drop_table() -> Vec<DropEntry> {
    vec![
        DropEntry {
            id: Item::PokeBall,
            chance: 0.05,
            min: 1,
            max: 2,
        },
        DropEntry {
            id: Item::GreatBall,
            chance: 0.025,
            min: 1,
            max: 2,
        },
        DropEntry {
            id: Item::Potion,
            chance: 0.18,
            min: 1,
            max: 1,
        },
        DropEntry {
            id: Item::PpRestore,
            chance: 0.08,
            min: 1,
            max: 1,
        },
    ]
}

/// Terrain kinds of the overworld map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tile {
    Grass,
    Ground,
    Water,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        !matches!(self, Tile::Water)
    }
}
