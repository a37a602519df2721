use crate::battle::state::TurnRng;
use crate::pokemon::PokemonInst;
use schema::Item;
use tracing::debug;

const POKEBALL_BASE_RATE: f64 = 0.3;
const GREATBALL_BASE_RATE: f64 = 0.5;
// Up to this much is added as the target's HP drops to zero
const MISSING_HP_BONUS: f64 = 0.5;
const MIN_CATCH_CHANCE: f64 = 0.01;
const MAX_CATCH_CHANCE: f64 = 0.95;

/// Base success rate of a ball. Unrecognised balls behave like a pokeball.
pub fn ball_base_rate(ball: &Item) -> f64 {
    match ball {
        Item::GreatBall => GREATBALL_BASE_RATE,
        _ => POKEBALL_BASE_RATE,
    }
}

/// Catch probability for `ball` against the target's remaining HP fraction.
/// Formula: clamp(0.01, 0.95, base + (1 - hp_fraction) × 0.5)
pub fn catch_chance(ball: &Item, hp_fraction: f64) -> f64 {
    let missing = 1.0 - hp_fraction.clamp(0.0, 1.0);
    (ball_base_rate(ball) + missing * MISSING_HP_BONUS).clamp(MIN_CATCH_CHANCE, MAX_CATCH_CHANCE)
}

/// Catch probability against a live target
pub fn calculate_catch_chance(target: &PokemonInst, ball: &Item) -> f64 {
    catch_chance(ball, target.hp_fraction())
}

/// Roll for catch success. Returns true if the catch succeeds.
pub fn roll_catch_success(chance: f64, rng: &mut TurnRng) -> bool {
    let roll = rng.next_unit("catch roll");
    debug!("Catch roll {:.3} against {:.3}", roll, chance);
    roll < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{sample_factory, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Item::PokeBall, 1.0, 0.3)]
    #[case(Item::GreatBall, 1.0, 0.5)]
    #[case(Item::PokeBall, 0.0, 0.8)]
    #[case(Item::GreatBall, 0.0, 0.95)]
    #[case(Item::Other("masterball".to_string()), 1.0, 0.3)]
    fn test_catch_chance(#[case] ball: Item, #[case] hp_fraction: f64, #[case] expected: f64) {
        assert!((catch_chance(&ball, hp_fraction) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_pokeball_at_zero_hp() {
        let factory = sample_factory();
        let target = TestPokemonBuilder::new("zigzagoon", 5)
            .with_hp(0)
            .build(&factory);
        assert!((calculate_catch_chance(&target, &Item::PokeBall) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_catch_chance_rises_as_hp_falls() {
        for ball in [Item::PokeBall, Item::GreatBall] {
            let mut previous = 0.0;
            for step in (0..=100).rev() {
                let chance = catch_chance(&ball, step as f64 / 100.0);
                assert!(chance >= previous);
                assert!((0.01..=0.95).contains(&chance));
                previous = chance;
            }
        }
    }

    #[test]
    fn test_roll_is_strictly_below_chance() {
        let mut rng = TurnRng::new_for_test(vec![0.29, 0.3]);
        assert!(roll_catch_success(0.3, &mut rng));
        assert!(!roll_catch_success(0.3, &mut rng));
    }

    #[test]
    fn test_ball_base_rates() {
        assert_eq!(ball_base_rate(&Item::PokeBall), 0.3);
        assert_eq!(ball_base_rate(&Item::GreatBall), 0.5);
    }
}
