use crate::battle::state::TurnRng;
use crate::pokemon::PokemonInst;
use schema::{PokemonType, TypeChart};
use tracing::debug;

// Damage variance bounds: uniform in [0.85, 1.15]
const VARIANCE_MIN: f64 = 0.85;
const VARIANCE_SPREAD: f64 = 0.3;

// Escape chance: 0.5 + speed gap * 0.02 + level gap * 0.01, clamped
const BASE_ESCAPE_CHANCE: f64 = 0.5;
const ESCAPE_PER_SPEED: f64 = 0.02;
const ESCAPE_PER_LEVEL: f64 = 0.01;
const MIN_ESCAPE_CHANCE: f64 = 0.05;
const MAX_ESCAPE_CHANCE: f64 = 0.95;

/// Multiplier for a move of `move_type` hitting a creature of `target_type`.
/// Pairs missing from the chart count as neutral.
pub fn effectiveness(chart: &TypeChart, move_type: PokemonType, target_type: PokemonType) -> f64 {
    chart.multiplier(move_type, target_type)
}

/// Draw the random damage multiplier for one attack
pub fn roll_variance(rng: &mut TurnRng) -> f64 {
    VARIANCE_MIN + rng.next_unit("damage variance") * VARIANCE_SPREAD
}

/// Pure damage formula.
/// Formula: max(1, floor(atk × power / max(1, def × 6) × effectiveness × variance))
pub fn calculate_damage(
    attack: u32,
    power: u32,
    defense: u32,
    effectiveness: f64,
    variance: f64,
) -> u32 {
    let divisor = (defense as f64 * 6.0).max(1.0);
    let raw = attack as f64 * power as f64 / divisor * effectiveness * variance;
    (raw.floor() as u32).max(1)
}

/// Probability that the player escapes from `enemy` with `active`.
pub fn escape_chance(active: &PokemonInst, enemy: &PokemonInst) -> f64 {
    let speed_gap = active.speed() as f64 - enemy.speed() as f64;
    let level_gap = active.level as f64 - enemy.level as f64;
    let chance = BASE_ESCAPE_CHANCE + speed_gap * ESCAPE_PER_SPEED + level_gap * ESCAPE_PER_LEVEL;
    let chance = chance.clamp(MIN_ESCAPE_CHANCE, MAX_ESCAPE_CHANCE);
    debug!(
        "Escape chance {:.3} (speed gap {}, level gap {})",
        chance, speed_gap, level_gap
    );
    chance
}
