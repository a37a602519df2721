use crate::PokemonType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub spd: u32,
}

impl Default for BaseStats {
    fn default() -> Self {
        Self {
            hp: 10,
            atk: 10,
            def: 10,
            spd: 10,
        }
    }
}

/// Canonical data for a single move as listed in a species' movepool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub power: u32,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    /// Maximum PP.
    pub pp: u32,
}

impl MoveData {
    /// Zero-power Normal move used when a move id cannot be found anywhere.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            power: 0,
            move_type: PokemonType::Normal,
            pp: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionRule {
    /// Target species id.
    pub to: String,
    /// Minimum level at which the rule fires.
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesData {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub pokemon_type: PokemonType,
    #[serde(default)]
    pub base_stats: BaseStats,
    #[serde(default)]
    pub moves: Vec<MoveData>,
    // Declaration order matters: the first satisfied rule wins.
    #[serde(default)]
    pub evolution: Vec<EvolutionRule>,
}

impl SpeciesData {
    pub fn has_next_evolution(&self) -> bool {
        !self.evolution.is_empty()
    }

    pub fn evolves_into(&self, target: &str) -> bool {
        self.evolution.iter().any(|rule| rule.to == target)
    }

    pub fn find_move(&self, move_id: &str) -> Option<&MoveData> {
        self.moves.iter().find(|m| m.id == move_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_parses_camel_case_json() {
        let json = r#"{
            "id": "torchic",
            "name": "Torchic",
            "type": "Fire",
            "baseStats": {"hp": 45, "atk": 60, "def": 40, "spd": 45},
            "moves": [{"id": "scratch", "name": "Scratch", "power": 40, "type": "Normal", "pp": 35}],
            "evolution": [{"to": "combusken", "level": 16}]
        }"#;
        let species: SpeciesData = serde_json::from_str(json).unwrap();
        assert_eq!(species.pokemon_type, PokemonType::Fire);
        assert_eq!(species.base_stats.atk, 60);
        assert_eq!(species.moves[0].move_type, PokemonType::Normal);
        assert!(species.evolves_into("combusken"));
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let json = r#"{"id": "blob", "name": "Blob", "type": "Normal"}"#;
        let species: SpeciesData = serde_json::from_str(json).unwrap();
        assert_eq!(species.base_stats, BaseStats::default());
        assert!(species.moves.is_empty());
        assert!(!species.has_next_evolution());
    }
}
