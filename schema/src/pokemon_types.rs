use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum PokemonType {
    Normal,
    Fighting,
    Flying,
    Poison,
    Ground,
    Rock,
    Bug,
    Ghost,
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Ice,
    Dragon,
    Dark,
    Steel,
}

use PokemonType as T;

/// Classic matchups per attacking type: super effective (2x), not very
/// effective (0.5x) and no effect (0x). Every other pair is neutral.
type Matchup = (
    PokemonType,
    &'static [PokemonType],
    &'static [PokemonType],
    &'static [PokemonType],
);

#[rustfmt::skip]
const CLASSIC_MATCHUPS: &[Matchup] = &[
    (T::Normal, &[], &[T::Rock, T::Steel], &[T::Ghost]),
    (T::Fire, &[T::Grass, T::Ice, T::Bug, T::Steel], &[T::Fire, T::Water, T::Rock, T::Dragon], &[]),
    (T::Water, &[T::Fire, T::Ground, T::Rock], &[T::Water, T::Grass, T::Dragon], &[]),
    (T::Electric, &[T::Water, T::Flying], &[T::Electric, T::Grass, T::Dragon], &[T::Ground]),
    (T::Grass, &[T::Water, T::Ground, T::Rock], &[T::Fire, T::Grass, T::Poison, T::Flying, T::Bug, T::Dragon, T::Steel], &[]),
    (T::Ice, &[T::Grass, T::Ground, T::Flying, T::Dragon], &[T::Fire, T::Water, T::Ice, T::Steel], &[]),
    (T::Fighting, &[T::Normal, T::Ice, T::Rock, T::Dark, T::Steel], &[T::Poison, T::Flying, T::Psychic, T::Bug], &[T::Ghost]),
    (T::Poison, &[T::Grass], &[T::Poison, T::Ground, T::Rock, T::Ghost], &[T::Steel]),
    (T::Ground, &[T::Fire, T::Electric, T::Poison, T::Rock, T::Steel], &[T::Grass, T::Bug], &[T::Flying]),
    (T::Flying, &[T::Grass, T::Fighting, T::Bug], &[T::Electric, T::Rock, T::Steel], &[]),
    (T::Psychic, &[T::Fighting, T::Poison], &[T::Psychic, T::Steel], &[T::Dark]),
    (T::Bug, &[T::Grass, T::Psychic, T::Dark], &[T::Fire, T::Fighting, T::Poison, T::Flying, T::Ghost, T::Steel], &[]),
    (T::Rock, &[T::Fire, T::Ice, T::Flying, T::Bug], &[T::Fighting, T::Ground, T::Steel], &[]),
    (T::Ghost, &[T::Psychic, T::Ghost], &[T::Dark, T::Steel], &[T::Normal]),
    (T::Dragon, &[T::Dragon], &[T::Steel], &[]),
    (T::Dark, &[T::Psychic, T::Ghost], &[T::Fighting, T::Dark, T::Steel], &[]),
    (T::Steel, &[T::Ice, T::Rock], &[T::Fire, T::Water, T::Electric, T::Steel], &[]),
];

/// Attack type -> defense type -> damage multiplier.
///
/// Only non-neutral pairs need to be present; any missing pair is treated as 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeChart {
    entries: HashMap<PokemonType, HashMap<PokemonType, f64>>,
}

impl TypeChart {
    pub fn new(entries: HashMap<PokemonType, HashMap<PokemonType, f64>>) -> Self {
        Self { entries }
    }

    /// Chart built from the classic matchup table.
    pub fn standard() -> Self {
        let mut chart = Self::default();
        for (attacking, strong, weak, immune) in CLASSIC_MATCHUPS {
            for (defenders, multiplier) in [(*strong, 2.0), (*weak, 0.5), (*immune, 0.0)] {
                for defending in defenders {
                    chart.set(*attacking, *defending, multiplier);
                }
            }
        }
        chart
    }

    pub fn multiplier(&self, attacking: PokemonType, defending: PokemonType) -> f64 {
        self.entries
            .get(&attacking)
            .and_then(|row| row.get(&defending))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn set(&mut self, attacking: PokemonType, defending: PokemonType, multiplier: f64) {
        self.entries
            .entry(attacking)
            .or_default()
            .insert(defending, multiplier);
    }
}
