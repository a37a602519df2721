// Monster Tamer Schema - Shared type definitions
// This crate contains the static data definitions (species, moves, type chart,
// spawn and drop tables) that the engine receives already parsed. Nothing here
// carries per-battle state.

pub use battle_data::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod battle_data;
pub mod pokemon_types;
pub mod species_data;
