//! Zone-transition events
//!
//! The tracker consumes `ZoneEvent`s one at a time, in game order. The
//! `parser` module turns Zone.log lines into events and the `tailer` module
//! follows a live log file.

pub mod parser;
pub mod tailer;

use crate::core::{CardId, EntityTag};
use crate::zones::ZoneLocation;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use parser::classify_line;
pub use tailer::LogTailer;

/// The card an event talks about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub card_id: CardId,
    /// Entity number of this copy, when the log printed one
    pub tag: Option<EntityTag>,
    /// Name as printed in the log (informational only)
    pub name: String,
}

impl CardRef {
    pub fn new(card_id: impl Into<CardId>) -> Self {
        let card_id = card_id.into();
        CardRef {
            name: card_id.to_string(),
            card_id,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: u32) -> Self {
        self.tag = Some(EntityTag::new(tag));
        self
    }
}

/// A card moving between zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub card: CardRef,
    /// Origin zone when the log states it
    pub from: Option<ZoneLocation>,
    pub to: ZoneLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// One already-classified event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneEvent {
    /// The mulligan step marker (printed several times per game)
    MulliganMarker,
    /// First card drawn after the mulligan; the game proper starts
    FirstDrawMarker,
    Transition(Transition),
    /// A card entered the opponent's hand, face down; the tag lets a
    /// bounced minion leave the board
    OpponentHandAdd(Option<EntityTag>),
    /// A draw finished without reaching the hand (burned card)
    DrawResolved,
    GameEnd(GameOutcome),
}

impl ZoneEvent {
    pub fn transition(card: CardRef, from: Option<ZoneLocation>, to: ZoneLocation) -> Self {
        ZoneEvent::Transition(Transition { card, from, to })
    }
}

impl fmt::Display for ZoneEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneEvent::MulliganMarker => write!(f, "mulligan marker"),
            ZoneEvent::FirstDrawMarker => write!(f, "first draw marker"),
            ZoneEvent::Transition(t) => match t.from {
                Some(from) => write!(f, "{} {}: {from} -> {}", t.card.name, t.card.card_id, t.to),
                None => write!(f, "{} {}: -> {}", t.card.name, t.card.card_id, t.to),
            },
            ZoneEvent::OpponentHandAdd(_) => write!(f, "opponent hand +1"),
            ZoneEvent::DrawResolved => write!(f, "draw resolved"),
            ZoneEvent::GameEnd(outcome) => write!(f, "game end ({outcome:?})"),
        }
    }
}
