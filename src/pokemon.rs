use crate::battle::stats;
use schema::{BaseStats, EvolutionRule, MoveData, PokemonType, SpeciesData};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub data: MoveData,
    pub pp: u32,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(data: MoveData) -> Self {
        let pp = data.pp;
        MoveInstance { data, pp }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn max_pp(&self) -> u32 {
        self.data.pp
    }

    /// Use the move (decrease PP). Returns false when no PP is left.
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    pub fn restore_pp(&mut self) {
        self.pp = self.max_pp();
    }
}

/// A live creature. Derived stats are recomputed from `base_stats` and `level`
/// on every read; `current_hp` is kept within `[0, max_hp]` by every mutator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub species: String,
    pub name: String,
    pub pokemon_type: PokemonType,
    pub level: u32,
    pub exp: u32, // Resets toward zero on every level-up
    pub base_stats: BaseStats,
    current_hp: u32,
    pub moves: Vec<MoveInstance>,
    pub evolution: Vec<EvolutionRule>,
}

impl PokemonInst {
    /// Create a new instance at full HP with the given (already limited) moveset
    pub fn new(species_data: &SpeciesData, level: u32, moves: Vec<MoveData>) -> Self {
        let mut pokemon = PokemonInst {
            species: species_data.id.clone(),
            name: species_data.name.clone(),
            pokemon_type: species_data.pokemon_type,
            level: level.max(1),
            exp: 0,
            base_stats: species_data.base_stats,
            current_hp: 0,
            moves: moves.into_iter().map(MoveInstance::new).collect(),
            evolution: species_data.evolution.clone(),
        };
        pokemon.set_hp_to_max();
        pokemon
    }

    pub fn max_hp(&self) -> u32 {
        stats::max_hp(&self.base_stats, self.level)
    }

    pub fn attack(&self) -> u32 {
        stats::attack(&self.base_stats, self.level)
    }

    pub fn defense(&self) -> u32 {
        stats::defense(&self.base_stats, self.level)
    }

    pub fn speed(&self) -> u32 {
        stats::speed(&self.base_stats, self.level)
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Remaining HP as a fraction of max HP, in `[0, 1]`.
    pub fn hp_fraction(&self) -> f64 {
        self.current_hp as f64 / self.max_hp().max(1) as f64
    }

    /// Set HP, clamped to `[0, max_hp]`
    pub fn set_hp(&mut self, hp: u32) {
        self.current_hp = hp.min(self.max_hp());
    }

    pub fn set_hp_to_max(&mut self) {
        self.current_hp = self.max_hp();
    }

    /// Apply damage and return the HP actually lost
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restore HP up to max and return the HP actually gained
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.set_hp(self.current_hp.saturating_add(amount));
        self.current_hp - before
    }

    pub fn restore_all_pp(&mut self) {
        for move_instance in &mut self.moves {
            move_instance.restore_pp();
        }
    }

    pub fn move_at(&self, index: usize) -> Option<&MoveInstance> {
        self.moves.get(index)
    }
}
