//! Experience, level-up and evolution.
//!
//! Both the in-battle reward path and the roster's end-of-battle path go
//! through [`gain_exp`], so there is exactly one threshold loop and one
//! evolution formula.

pub mod evolution;
pub mod experience;
pub mod rewards;

pub use evolution::{try_evolve, EvolutionOutcome};
pub use experience::{gain_exp, level_threshold, LevelUpReport};
pub use rewards::RewardCalculator;
