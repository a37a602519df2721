use crate::errors::ActionRejection;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which combatant an event refers to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

/// Sub-state of an active battle. A player action that does not end the
/// battle moves it to `AwaitingEnemyResolution`; no further player action is
/// accepted until the enemy turn has been resolved.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingPlayerAction,
    AwaitingEnemyResolution,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    Idle,
    Active(TurnPhase),
    Victory,
    Defeat,
    Fled,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BattleStatus::Victory | BattleStatus::Defeat | BattleStatus::Fled
        )
    }

    pub fn is_victory(self) -> bool {
        self == BattleStatus::Victory
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted {
        enemy: String,
        enemy_level: u32,
        active: String,
    },

    // Moves and damage
    MoveUsed {
        side: Side,
        pokemon: String,
        move_name: String,
        damage: u32,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: Side,
        pokemon: String,
        damage: u32,
        remaining_hp: u32,
    },
    PokemonFainted {
        side: Side,
        pokemon: String,
    },
    EnemyTurnSkipped {
        pokemon: String,
    },

    // Items
    ItemUsed {
        item: Item,
        target: Side,
        pokemon: String,
    },
    PokemonHealed {
        pokemon: String,
        amount: u32,
        new_hp: u32,
    },
    PpRestored {
        pokemon: String,
    },

    // Catching
    BallThrown {
        ball: Item,
        pokemon: String,
        success: bool,
    },
    PokemonCaught {
        pokemon: String,
        level: u32,
    },
    CaughtButReleased {
        pokemon: String,
    },

    PokemonSwitched {
        pokemon: String,
    },
    RunAttempted {
        success: bool,
    },

    // Rewards
    ExpGained {
        pokemon: String,
        amount: u32,
    },
    LevelUp {
        pokemon: String,
        new_level: u32,
    },
    PokemonEvolved {
        from: String,
        to: String,
    },
    ItemDropped {
        item: Item,
        quantity: u32,
    },

    /// The enemy acts next; presentation layers may animate for `delay_ms`
    /// before calling for the enemy turn.
    EnemyTurnPending {
        delay_ms: u64,
    },

    ActionFailed {
        reason: ActionRejection,
    },

    BattleEnded {
        status: BattleStatus,
    },
}

impl BattleEvent {
    /// Formats the event into a human-readable line.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted {
                enemy, enemy_level, ..
            } => Some(format!("A wild {} (Lv {}) appeared!", enemy, enemy_level)),

            BattleEvent::MoveUsed {
                side,
                pokemon,
                move_name,
                ..
            } => Some(format!(
                "{}{} used {}!",
                Self::side_prefix(*side),
                pokemon,
                move_name
            )),
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 && m > 0.0 => Some("It's not very effective...".to_string()),
                m if m == 0.0 => Some("It had no effect!".to_string()),
                _ => None, // Normal effectiveness, no message
            },
            BattleEvent::DamageDealt {
                target,
                pokemon,
                damage,
                ..
            } => Some(format!(
                "{}{} took {} damage!",
                Self::side_prefix(*target),
                pokemon,
                damage
            )),
            BattleEvent::PokemonFainted { side, pokemon } => Some(format!(
                "{}{} fainted!",
                Self::side_prefix(*side),
                pokemon
            )),
            BattleEvent::EnemyTurnSkipped { pokemon } => {
                Some(format!("The wild {} has nothing to use!", pokemon))
            }

            BattleEvent::ItemUsed { item, pokemon, .. } => {
                Some(format!("Used a {} on {}.", item, pokemon))
            }
            BattleEvent::PokemonHealed {
                pokemon, amount, ..
            } => Some(format!("{} recovered {} HP!", pokemon, amount)),
            BattleEvent::PpRestored { pokemon } => {
                Some(format!("{}'s PP was fully restored!", pokemon))
            }

            BattleEvent::BallThrown { ball, success, .. } => {
                if *success {
                    Some(format!("You threw a {}... Gotcha!", ball))
                } else {
                    Some(format!("You threw a {}... it broke free!", ball))
                }
            }
            BattleEvent::PokemonCaught { pokemon, .. } => {
                Some(format!("{} joined your party!", pokemon))
            }
            BattleEvent::CaughtButReleased { pokemon } => Some(format!(
                "Your party is full, so {} was released.",
                pokemon
            )),

            BattleEvent::PokemonSwitched { pokemon } => Some(format!("Go, {}!", pokemon)),
            BattleEvent::RunAttempted { success } => {
                if *success {
                    Some("Got away safely!".to_string())
                } else {
                    Some("Couldn't get away!".to_string())
                }
            }

            BattleEvent::ExpGained { pokemon, amount } => {
                Some(format!("{} gained {} EXP.", pokemon, amount))
            }
            BattleEvent::LevelUp { pokemon, new_level } => {
                Some(format!("{} grew to level {}!", pokemon, new_level))
            }
            BattleEvent::PokemonEvolved { from, to } => {
                Some(format!("{} evolved into {}!", from, to))
            }
            BattleEvent::ItemDropped { item, quantity } => {
                Some(format!("The wild pokemon dropped {} x{}.", item, quantity))
            }

            BattleEvent::EnemyTurnPending { .. } => None,

            BattleEvent::ActionFailed { reason } => Some(format!("Can't do that: {}.", reason)),

            BattleEvent::BattleEnded { status } => match status {
                BattleStatus::Victory => Some("You won the battle!".to_string()),
                BattleStatus::Defeat => Some("You have no pokemon left to fight...".to_string()),
                _ => None, // Fleeing is already covered by RunAttempted
            },
        }
    }

    fn side_prefix(side: Side) -> &'static str {
        match side {
            Side::Player => "",
            Side::Enemy => "The wild ",
        }
    }
}

/// Ordered log of everything that happened in one battle.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Formatted lines of every non-silent event from `start` onwards.
    pub fn formatted_since(&self, start: usize) -> Vec<String> {
        self.events
            .iter()
            .skip(start)
            .filter_map(BattleEvent::format)
            .collect()
    }

    /// Print all events using their formatted text, skipping silent ones.
    pub fn print_formatted(&self) {
        for line in self.formatted_since(0) {
            println!("  {}", line);
        }
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl fmt::Display for EventBus {
    /// Shows debug format of all events.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<f64>, index: usize },
    Std(StdRng),
}

/// The single source of randomness for battles, encounters and map generation.
/// Every draw is a unit value in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    /// Replay the given draws in order. Panics when exhausted.
    pub fn new_for_test(outcomes: Vec<f64>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Std(StdRng::from_rng(&mut rand::rng())),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Std(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn next_unit(&mut self, reason: &str) -> f64 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];
                *index += 1;
                outcome
            }
            RngSource::Std(rng) => rng.random::<f64>(),
        };

        #[cfg(test)]
        println!("[RNG] Consumed {} for: {}", outcome, reason);

        outcome
    }

    /// Uniform integer in `[min, max]`, derived from one unit draw.
    pub fn next_int(&mut self, min: u32, max: u32, reason: &str) -> u32 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        let offset = (self.next_unit(reason) * span as f64).floor() as u32;
        min + offset.min(span - 1)
    }
}
