#[cfg(test)]
mod tests {
    use crate::battle::state::{BattleEvent, BattleStatus, TurnRng};
    use crate::battle::tests::common::BattleFixture;
    use crate::errors::ActionRejection;
    use pretty_assertions::assert_eq;

    // torchic spd 26 vs zigzagoon spd 34 at equal level: 0.5 - 8 * 0.02 = 0.34

    #[test]
    fn test_successful_escape_ends_battle_as_fled() {
        let fixture = BattleFixture::new();
        let mut roster = fixture.roster(vec![fixture.pokemon("torchic", 5).build(&fixture.factory)]);
        let enemy = fixture.pokemon("zigzagoon", 5).build(&fixture.factory);
        let mut battle = fixture.start_battle(&mut roster, enemy);
        let mut rng = TurnRng::new_for_test(vec![0.2]);

        battle.run(&mut rng).unwrap();

        assert_eq!(battle.status(), BattleStatus::Fled);
        assert!(battle
            .events()
            .events()
            .contains(&BattleEvent::RunAttempted { success: true }));
        assert_eq!(battle.run(&mut rng), Err(ActionRejection::BattleOver));
        assert!(!battle.into_outcome().is_victory());
    }

    #[test]
    fn test_failed_escape_gives_enemy_a_turn() {
        let fixture = BattleFixture::new();
        let mut roster = fixture.roster(vec![fixture.pokemon("torchic", 5).build(&fixture.factory)]);
        let enemy = fixture.pokemon("zigzagoon", 5).build(&fixture.factory);
        let mut battle = fixture.start_battle(&mut roster, enemy);
        // escape roll, enemy damage variance
        let mut rng = TurnRng::new_for_test(vec![0.6, 0.5]);

        battle.run(&mut rng).unwrap();
        assert!(battle.awaiting_enemy());
        battle.resolve_enemy_turn(&mut rng);

        assert!(!battle.is_over());
        assert_eq!(battle.roster().active().unwrap().current_hp(), 29);
    }
}
