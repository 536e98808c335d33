//! Game phase state machine
//!
//! `Idle -> Mulligan -> Active -> Ended -> Idle`. Transitions come only from
//! recognised events; turn identity inside `Active` is tracked by the
//! tracker's mana and whose-turn counters, not by extra phases.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Between games, or before the first mulligan marker
    #[default]
    Idle,
    /// Opening hand dealt, mulligan decisions pending
    Mulligan,
    /// Game proper; draws drive turn planning
    Active,
    /// A hero died; state has been reset
    Ended,
}

impl GamePhase {
    pub fn is_active(self) -> bool {
        self == GamePhase::Active
    }

    /// Phases that may accept a mulligan marker
    pub fn accepts_mulligan_marker(self) -> bool {
        matches!(self, GamePhase::Idle | GamePhase::Mulligan | GamePhase::Ended)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Idle => "Idle",
            GamePhase::Mulligan => "Mulligan",
            GamePhase::Active => "Active",
            GamePhase::Ended => "Ended",
        };
        write!(f, "{name}")
    }
}
