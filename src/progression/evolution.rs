use crate::pokemon::{MoveInstance, PokemonInst};
use crate::species::PokemonFactory;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What happened when an evolution rule fired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvolutionOutcome {
    /// Species, type, base stats, evolution rules and moveset were replaced.
    FullEvolution { from: String, to: String },
    /// The target species is not in the table; only the id and name changed.
    RenameOnlyFallback { from: String, to: String },
}

impl EvolutionOutcome {
    pub fn from_species(&self) -> &str {
        match self {
            EvolutionOutcome::FullEvolution { from, .. }
            | EvolutionOutcome::RenameOnlyFallback { from, .. } => from,
        }
    }

    pub fn to_species(&self) -> &str {
        match self {
            EvolutionOutcome::FullEvolution { to, .. }
            | EvolutionOutcome::RenameOnlyFallback { to, .. } => to,
        }
    }
}

/// Evolve the creature in place if one of its rules is satisfied.
///
/// Rules are checked in declaration order and the first one whose minimum level
/// is reached wins; they are not assumed to be sorted. A rule pointing at the
/// creature's current species is ignored.
pub fn try_evolve(pokemon: &mut PokemonInst, factory: &PokemonFactory) -> Option<EvolutionOutcome> {
    let rule = pokemon
        .evolution
        .iter()
        .find(|rule| rule.level <= pokemon.level && rule.to != pokemon.species)?
        .clone();
    let from = pokemon.species.clone();

    let Some(target) = factory.find_spec(&rule.to) else {
        warn!(
            "Evolution target {} for {} is not in the species table, renaming only",
            rule.to, from
        );
        pokemon.species = rule.to.clone();
        pokemon.name = rule.to.clone();
        return Some(EvolutionOutcome::RenameOnlyFallback { from, to: rule.to });
    };

    let old_max = pokemon.max_hp();
    let hp_ratio = if old_max > 0 {
        pokemon.current_hp() as f64 / old_max as f64
    } else {
        1.0
    };

    pokemon.species = target.id.clone();
    pokemon.name = target.name.clone();
    pokemon.pokemon_type = target.pokemon_type;
    pokemon.base_stats = target.base_stats;
    pokemon.evolution = target.evolution.clone();
    // Full moveset reset using the new species' stage
    pokemon.moves = factory
        .starting_moves(target)
        .into_iter()
        .map(MoveInstance::new)
        .collect();

    let new_hp = ((pokemon.max_hp() as f64 * hp_ratio).floor() as u32).max(1);
    pokemon.set_hp(new_hp);

    info!("{} evolved into {}", from, target.id);
    Some(EvolutionOutcome::FullEvolution {
        from,
        to: target.id.clone(),
    })
}
