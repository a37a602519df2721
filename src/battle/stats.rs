use schema::BaseStats;

// Stat factors in tenths: stat = floor((base * base_tenths + level * level_tenths) / 10),
// floored at 1. Integer arithmetic keeps the floor exact.
const HP_FACTORS: (u32, u32) = (6, 12);
const ATK_FACTORS: (u32, u32) = (5, 9);
const DEF_FACTORS: (u32, u32) = (6, 9);
const SPD_FACTORS: (u32, u32) = (5, 8);

fn derive(base: u32, level: u32, (base_tenths, level_tenths): (u32, u32)) -> u32 {
    ((base * base_tenths + level * level_tenths) / 10).max(1)
}

/// Maximum HP for the given base stats and level
pub fn max_hp(base_stats: &BaseStats, level: u32) -> u32 {
    derive(base_stats.hp, level, HP_FACTORS)
}

/// Attack stat for the given base stats and level
pub fn attack(base_stats: &BaseStats, level: u32) -> u32 {
    derive(base_stats.atk, level, ATK_FACTORS)
}

/// Defense stat for the given base stats and level
pub fn defense(base_stats: &BaseStats, level: u32) -> u32 {
    derive(base_stats.def, level, DEF_FACTORS)
}

/// Speed stat for the given base stats and level
pub fn speed(base_stats: &BaseStats, level: u32) -> u32 {
    derive(base_stats.spd, level, SPD_FACTORS)
}
