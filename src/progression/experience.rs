use super::evolution::{try_evolve, EvolutionOutcome};
use crate::pokemon::PokemonInst;
use crate::species::PokemonFactory;
use tracing::{debug, info};

/// Experience needed to advance from `level` to `level + 1`
pub fn level_threshold(level: u32) -> u32 {
    level * 10 + 20
}

/// Everything that happened during one experience award.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    /// One entry per evolution, in the order they happened
    pub evolutions: Vec<EvolutionOutcome>,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Add experience and run the level-up loop.
///
/// Each crossed threshold raises the level by one, fully heals the creature
/// and makes a single evolution attempt, so a large award can chain several
/// evolutions, one per level.
pub fn gain_exp(pokemon: &mut PokemonInst, amount: u32, factory: &PokemonFactory) -> LevelUpReport {
    let mut report = LevelUpReport::default();
    pokemon.exp = pokemon.exp.saturating_add(amount);
    debug!("{} gained {} exp (now {})", pokemon.name, amount, pokemon.exp);

    loop {
        let threshold = level_threshold(pokemon.level);
        if pokemon.exp < threshold {
            break;
        }
        pokemon.exp -= threshold;
        pokemon.level += 1;
        pokemon.set_hp_to_max();
        report.levels_gained += 1;
        info!("{} grew to level {}", pokemon.name, pokemon.level);

        if let Some(outcome) = try_evolve(pokemon, factory) {
            report.evolutions.push(outcome);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::sample_factory;
    use crate::progression::EvolutionOutcome;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, 30)]
    #[case(5, 70)]
    #[case(15, 170)]
    fn test_level_threshold(#[case] level: u32, #[case] expected: u32) {
        assert_eq!(level_threshold(level), expected);
    }

    #[test]
    fn test_threshold_is_strictly_increasing() {
        for level in 1..100 {
            assert!(level_threshold(level + 1) > level_threshold(level));
        }
    }

    #[test]
    fn test_gain_below_threshold_only_accumulates() {
        let factory = sample_factory();
        let mut torchic = factory.create("torchic", 5).unwrap();

        let report = gain_exp(&mut torchic, 69, &factory);

        assert_eq!(report, LevelUpReport::default());
        assert_eq!(torchic.level, 5);
        assert_eq!(torchic.exp, 69);
    }

    #[test]
    fn test_level_up_subtracts_threshold_and_heals() {
        let factory = sample_factory();
        let mut torchic = factory.create("torchic", 5).unwrap();
        torchic.set_hp(1);

        let report = gain_exp(&mut torchic, 75, &factory);

        assert_eq!(report.levels_gained, 1);
        assert_eq!(torchic.level, 6);
        assert_eq!(torchic.exp, 5);
        assert_eq!(torchic.current_hp(), torchic.max_hp());
    }

    #[test]
    fn test_large_award_gains_several_levels() {
        let factory = sample_factory();
        let mut torchic = factory.create("torchic", 5).unwrap();

        // 70 + 80 + 90 = 240 for three levels, 10 left over
        let report = gain_exp(&mut torchic, 250, &factory);

        assert_eq!(report.levels_gained, 3);
        assert_eq!(torchic.level, 8);
        assert_eq!(torchic.exp, 10);
    }

    #[test]
    fn test_split_awards_match_single_award() {
        let factory = sample_factory();
        let mut lump = factory.create("zigzagoon", 3).unwrap();
        let mut split = lump.clone();

        gain_exp(&mut lump, 500, &factory);
        for chunk in [120, 7, 200, 73, 100] {
            gain_exp(&mut split, chunk, &factory);
        }

        assert_eq!(lump.level, split.level);
        assert_eq!(lump.exp, split.exp);
        assert_eq!(lump.current_hp(), split.current_hp());
    }

    #[test]
    fn test_multi_level_jump_chains_evolutions() {
        let factory = sample_factory();
        // wurmple -> silcoon at 7 -> beautifly at 10
        let mut wurmple = factory.create("wurmple", 6).unwrap();

        // 80 + 90 + 100 + 110 reaches level 10
        let report = gain_exp(&mut wurmple, 380, &factory);

        assert_eq!(report.levels_gained, 4);
        assert_eq!(
            report.evolutions,
            vec![
                EvolutionOutcome::FullEvolution {
                    from: "wurmple".to_string(),
                    to: "silcoon".to_string()
                },
                EvolutionOutcome::FullEvolution {
                    from: "silcoon".to_string(),
                    to: "beautifly".to_string()
                },
            ]
        );
        assert_eq!(wurmple.species, "beautifly");
        assert_eq!(wurmple.level, 10);
        // Level-up heal followed by an evolution at full HP keeps full HP
        assert_eq!(wurmple.current_hp(), wurmple.max_hp());
    }
}
