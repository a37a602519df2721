//! Monster Tamer Engine
//!
//! Turn-based combat and progression for a creature-collecting game:
//! species data and derived stats, experience and evolution, the player's
//! party and bag, a tile map with wild encounters, and a two-phase battle
//! state machine that reports everything it does through events and
//! observers.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod data;
pub mod errors;
pub mod game;
pub mod player;
pub mod pokemon;
pub mod progression;
pub mod species;
pub mod world;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    BaseStats, DropEntry, EvolutionRule, Item, MoveData, PokemonType, SpawnEntry, SpeciesData,
    Tile, TypeChart,
};

// --- From this crate's modules (`src/`) ---

// Battle state machine and its outputs.
pub use battle::drops::ItemDrop;
pub use battle::{
    Battle, BattleEvent, BattleObserver, BattleOutcome, BattleRules, BattleStatus, EventBus,
    PlayerAction, Side, TurnPhase, TurnRng,
};

// Runtime creatures, the roster and progression.
pub use player::{Roster, PARTY_CAPACITY};
pub use pokemon::{MoveInstance, PokemonInst};
pub use progression::{gain_exp, try_evolve, EvolutionOutcome, LevelUpReport, RewardCalculator};
pub use species::{EvolutionStage, PokemonFactory};

// Session driver, world and loading.
pub use config::GameConfig;
pub use data::GameData;
pub use game::{BattleSession, Game};
pub use world::{Encounter, EncounterGenerator, Position, WorldMap};

// Crate-specific error and result types.
pub use errors::{
    ActionRejection, ActionResult, BattleEngineError, BattleResult, DataError, DataResult,
    SpeciesDataError, SpeciesDataResult,
};
