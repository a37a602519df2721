use crate::errors::{SpeciesDataError, SpeciesDataResult};
use crate::pokemon::PokemonInst;
use schema::{MoveData, SpeciesData};
use serde::{Deserialize, Serialize};

/// Position of a species in its evolution chain, derived from the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionStage {
    /// No pre-evolution, evolves further.
    Basic,
    /// Has both a pre-evolution and a next evolution.
    Middle,
    /// Terminal, standalone, or otherwise indeterminate.
    Final,
}

impl EvolutionStage {
    /// Number of move slots a creature of this stage gets
    pub fn move_limit(self) -> usize {
        match self {
            EvolutionStage::Basic => 2,
            EvolutionStage::Middle => 3,
            EvolutionStage::Final => 4,
        }
    }
}

/// Builds creature instances from the immutable species table.
#[derive(Debug, Clone, Default)]
pub struct PokemonFactory {
    species: Vec<SpeciesData>,
}

impl PokemonFactory {
    pub fn new(species: Vec<SpeciesData>) -> Self {
        Self { species }
    }

    pub fn species(&self) -> &[SpeciesData] {
        &self.species
    }

    pub fn find_spec(&self, id: &str) -> Option<&SpeciesData> {
        self.species.iter().find(|s| s.id == id)
    }

    pub fn evolution_stage(&self, id: &str) -> EvolutionStage {
        let Some(species) = self.find_spec(id) else {
            return EvolutionStage::Final;
        };

        let has_pre = self
            .species
            .iter()
            .any(|other| other.id != id && other.evolves_into(id));
        let has_next = species.has_next_evolution();

        match (has_pre, has_next) {
            (false, true) => EvolutionStage::Basic,
            (true, true) => EvolutionStage::Middle,
            _ => EvolutionStage::Final,
        }
    }

    /// The first N moves of the species' movepool, N being its stage's move limit
    pub fn starting_moves(&self, species: &SpeciesData) -> Vec<MoveData> {
        let limit = self.evolution_stage(&species.id).move_limit();
        species.moves.iter().take(limit).cloned().collect()
    }

    /// Canonical data for a move id, searched across every species.
    /// Unknown ids resolve to a zero-power Normal placeholder instead of failing.
    pub fn resolve_move_spec(&self, move_id: &str) -> MoveData {
        self.species
            .iter()
            .find_map(|s| s.find_move(move_id))
            .cloned()
            .unwrap_or_else(|| MoveData::placeholder(move_id))
    }

    pub fn create(&self, id: &str, level: u32) -> SpeciesDataResult<PokemonInst> {
        let species = self
            .find_spec(id)
            .ok_or_else(|| SpeciesDataError::SpeciesNotFound(id.to_string()))?;
        let moves = self.starting_moves(species);
        Ok(PokemonInst::new(species, level, moves))
    }
}
