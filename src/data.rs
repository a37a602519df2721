//! The static data set: species, type chart, wild spawn pool and drop table.
//!
//! Everything is loaded once from a directory of JSON files and is read-only
//! afterwards.

use crate::errors::{DataError, DataResult};
use schema::{default_drop_table, DropEntry, SpawnEntry, SpeciesData, TypeChart};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, warn};

const SPECIES_FILE: &str = "pokemons.json";
const TYPES_FILE: &str = "types.json";
const WILD_FILE: &str = "wild.json";
const DROPS_FILE: &str = "itemDrops.json";

#[derive(Debug, Clone, PartialEq)]
pub struct GameData {
    pub species: Vec<SpeciesData>,
    pub type_chart: TypeChart,
    pub wild_pool: Vec<SpawnEntry>,
    pub drop_table: Vec<DropEntry>,
}

impl GameData {
    /// Load `pokemons.json`, `types.json`, `wild.json` and the optional
    /// `itemDrops.json` from `dir`.
    ///
    /// A missing type chart falls back to the standard matchups and a missing
    /// drop table to the built-in default. Species and the spawn pool are required.
    pub fn load_dir(dir: &Path) -> DataResult<Self> {
        let species: Vec<SpeciesData> = read_json(&dir.join(SPECIES_FILE))?;
        let wild_pool: Vec<SpawnEntry> = read_json(&dir.join(WILD_FILE))?;

        let types_path = dir.join(TYPES_FILE);
        let type_chart = if types_path.exists() {
            read_json(&types_path)?
        } else {
            warn!("{} not found, using the standard type chart", types_path.display());
            TypeChart::standard()
        };

        let drops_path = dir.join(DROPS_FILE);
        let drop_table = if drops_path.exists() {
            read_json(&drops_path)?
        } else {
            info!("{} not found, using the default drop table", drops_path.display());
            default_drop_table()
        };

        info!(
            "Loaded {} species, {} wild spawns and {} drop entries from {}",
            species.len(),
            wild_pool.len(),
            drop_table.len(),
            dir.display()
        );

        Ok(Self {
            species,
            type_chart,
            wild_pool,
            drop_table,
        })
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DataResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| DataError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema::{BaseStats, Item, PokemonType};
    use std::fs;

    const SPECIES: &str = r#"[
        {
            "id": "torchic", "name": "Torchic", "type": "Fire",
            "baseStats": {"hp": 45, "atk": 60, "def": 40, "spd": 45},
            "moves": [{"id": "scratch", "name": "Scratch", "power": 40, "type": "Normal", "pp": 35}],
            "evolution": [{"to": "combusken", "level": 16}]
        },
        {"id": "combusken", "name": "Combusken", "type": "Fire"}
    ]"#;

    fn write_minimal(dir: &Path) {
        fs::write(dir.join(SPECIES_FILE), SPECIES).unwrap();
        fs::write(dir.join(WILD_FILE), r#"[{"id": "torchic", "chance": 2}]"#).unwrap();
    }

    #[test]
    fn test_optional_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_minimal(dir.path());

        let data = GameData::load_dir(dir.path()).unwrap();

        assert_eq!(data.species.len(), 2);
        assert!(data.species[1].moves.is_empty());
        assert_eq!(data.species[1].base_stats, BaseStats::default());
        assert_eq!(data.wild_pool[0].weight, 2.0);
        assert_eq!(data.type_chart, TypeChart::standard());
        assert_eq!(data.drop_table, default_drop_table());
    }

    #[test]
    fn test_explicit_chart_and_drops_are_used() {
        let dir = tempfile::tempdir().unwrap();
        write_minimal(dir.path());
        fs::write(dir.path().join(TYPES_FILE), r#"{"Fire": {"Grass": 3.0}}"#).unwrap();
        fs::write(
            dir.path().join(DROPS_FILE),
            r#"[{"id": "potion", "chance": 1.0, "min": 1, "max": 1}]"#,
        )
        .unwrap();

        let data = GameData::load_dir(dir.path()).unwrap();

        assert_eq!(data.type_chart.multiplier(PokemonType::Fire, PokemonType::Grass), 3.0);
        assert_eq!(data.type_chart.multiplier(PokemonType::Fire, PokemonType::Water), 1.0);
        assert_eq!(data.drop_table.len(), 1);
        assert_eq!(data.drop_table[0].id, Item::Potion);
    }

    #[test]
    fn test_missing_species_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        match GameData::load_dir(dir.path()) {
            Err(DataError::Io { path, .. }) => assert!(path.ends_with(SPECIES_FILE)),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write_minimal(dir.path());
        fs::write(dir.path().join(WILD_FILE), "[{").unwrap();

        match GameData::load_dir(dir.path()) {
            Err(DataError::Json { path, .. }) => assert!(path.ends_with(WILD_FILE)),
            other => panic!("expected a JSON error, got {:?}", other),
        }
    }

    #[test]
    fn test_bundled_data_set_loads() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let data = GameData::load_dir(&dir).unwrap();

        assert_eq!(data.type_chart, TypeChart::standard());
        for starter in ["torchic", "mudkip", "treecko"] {
            assert!(
                data.species.iter().any(|s| s.id == starter),
                "missing starter {}",
                starter
            );
        }
        for spawn in &data.wild_pool {
            assert!(
                data.species.iter().any(|s| s.id == spawn.id),
                "wild pool references unknown species {}",
                spawn.id
            );
        }
    }
}
