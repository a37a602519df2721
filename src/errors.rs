use schema::Item;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the Monster Tamer engine
#[derive(Debug, Error)]
pub enum BattleEngineError {
    /// Error related to species data lookup
    #[error("species data error: {0}")]
    SpeciesData(#[from] SpeciesDataError),
    /// Error related to loading the data set or configuration
    #[error("data error: {0}")]
    Data(#[from] DataError),
    /// Error related to invalid player actions
    #[error("action error: {0}")]
    Action(#[from] ActionRejection),
}

/// Errors related to species data operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeciesDataError {
    /// The requested species id is not in the species table
    #[error("unknown species: {0}")]
    SpeciesNotFound(String),
}

/// Errors raised while reading the static data set or the configuration file
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed RON in {path}")]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Reasons a player action is refused. A rejected action never mutates state.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ActionRejection {
    #[error("battle has not started")]
    NotStarted,
    #[error("battle is already over")]
    BattleOver,
    #[error("waiting for the enemy to act")]
    TurnLocked,
    #[error("no active pokemon")]
    NoActivePokemon,
    #[error("active pokemon has fainted")]
    ActiveFainted,
    #[error("no move in slot {0}")]
    InvalidMoveIndex(usize),
    #[error("no PP left for {0}")]
    NoPpRemaining(String),
    #[error("no {0} left")]
    OutOfItem(Item),
    #[error("{0} cannot be used in battle")]
    UnsupportedItem(Item),
    #[error("no room in the party")]
    TeamFull,
    #[error("already using that pokemon")]
    AlreadyActive,
    #[error("cannot switch to slot {0}")]
    InvalidSwitchTarget(usize),
}

/// Type alias for Results using BattleEngineError
pub type BattleResult<T> = Result<T, BattleEngineError>;

/// Type alias for Results using SpeciesDataError
pub type SpeciesDataResult<T> = Result<T, SpeciesDataError>;

/// Type alias for Results using DataError
pub type DataResult<T> = Result<T, DataError>;

/// Type alias for the outcome of a single player action
pub type ActionResult<T> = Result<T, ActionRejection>;
