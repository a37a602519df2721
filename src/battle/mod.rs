pub mod calculators;
pub mod catch;
pub mod drops;
pub mod engine;
pub mod observer;
pub mod state;
pub mod stats;

pub use engine::{Battle, BattleOutcome, BattleRules, PlayerAction};
pub use observer::BattleObserver;
pub use state::{BattleEvent, BattleStatus, EventBus, Side, TurnPhase, TurnRng};

#[cfg(test)]
pub(crate) mod tests;
