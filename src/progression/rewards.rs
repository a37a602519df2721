// Experience reward constants
const BASE_EXP_REWARD: u32 = 10;
const EXP_PER_ENEMY_LEVEL: u32 = 2;

/// Calculator for the rewards handed out when a wild creature is defeated
#[derive(Debug, Clone, Copy, Default)]
pub struct RewardCalculator;

impl RewardCalculator {
    /// Experience for defeating a wild creature.
    /// Formula: 10 + 2 × enemy level
    pub fn exp_for_defeating(&self, enemy_level: u32) -> u32 {
        BASE_EXP_REWARD + EXP_PER_ENEMY_LEVEL * enemy_level
    }
}
