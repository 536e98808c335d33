//! Game zones (Hand, Board, Secrets, Graveyard, ...)
//!
//! Two vocabularies live here. `ZoneKind`/`Side` name zones the way the log
//! does; `Zone` names the collections the tracker actually keeps. Every
//! collection holds `InstanceId` handles only.

use crate::core::{CardId, InstanceId, InstanceStore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which player a log zone belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Friendly,
    Opposing,
}

/// Zone names as they appear in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Deck,
    Hand,
    Play,
    Secret,
    Graveyard,
    SetAside,
    RemovedFromGame,
}

impl ZoneKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DECK" => Some(ZoneKind::Deck),
            "HAND" => Some(ZoneKind::Hand),
            "PLAY" => Some(ZoneKind::Play),
            "SECRET" => Some(ZoneKind::Secret),
            "GRAVEYARD" => Some(ZoneKind::Graveyard),
            "SETASIDE" => Some(ZoneKind::SetAside),
            "REMOVEDFROMGAME" => Some(ZoneKind::RemovedFromGame),
            _ => None,
        }
    }
}

/// A side plus a zone, e.g. "FRIENDLY HAND"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneLocation {
    pub side: Side,
    pub zone: ZoneKind,
}

impl ZoneLocation {
    pub fn new(side: Side, zone: ZoneKind) -> Self {
        ZoneLocation { side, zone }
    }

    pub fn friendly(zone: ZoneKind) -> Self {
        ZoneLocation::new(Side::Friendly, zone)
    }

    pub fn opposing(zone: ZoneKind) -> Self {
        ZoneLocation::new(Side::Opposing, zone)
    }
}

impl fmt::Display for ZoneLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side {
            Side::Friendly => "FRIENDLY",
            Side::Opposing => "OPPOSING",
        };
        write!(f, "{side} {:?}", self.zone)
    }
}

/// Collections the tracker keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Hand,
    Board,
    Secrets,
    /// Equipped weapon slot (at most one card)
    Weapon,
    Graveyard,
    OpponentBoard,
}

/// A zone containing card handles, in arrival order
#[derive(Debug, Clone)]
pub struct CardZone {
    pub zone_type: Zone,
    pub cards: Vec<InstanceId>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, id: InstanceId) {
        self.cards.push(id);
    }

    pub fn remove(&mut self, id: InstanceId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&c| c == id) {
            // remove() rather than swap_remove(): advice order follows zone order
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.contains(&id)
    }

    /// First handle whose definition has the given card id
    pub fn find_card(&self, card_id: &CardId, store: &InstanceStore) -> Option<InstanceId> {
        self.cards
            .iter()
            .copied()
            .find(|&id| store.card(id).map(|c| &c.card_id == card_id).unwrap_or(false))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Every zone the tracker keeps for one game
#[derive(Debug, Clone)]
pub struct TrackedZones {
    pub hand: CardZone,
    pub board: CardZone,
    pub secrets: CardZone,
    pub weapon: CardZone,
    pub graveyard: CardZone,
    pub opponent_board: CardZone,
}

impl TrackedZones {
    pub fn new() -> Self {
        TrackedZones {
            hand: CardZone::new(Zone::Hand),
            board: CardZone::new(Zone::Board),
            secrets: CardZone::new(Zone::Secrets),
            weapon: CardZone::new(Zone::Weapon),
            graveyard: CardZone::new(Zone::Graveyard),
            opponent_board: CardZone::new(Zone::OpponentBoard),
        }
    }

    pub fn get_zone(&self, zone: Zone) -> &CardZone {
        match zone {
            Zone::Hand => &self.hand,
            Zone::Board => &self.board,
            Zone::Secrets => &self.secrets,
            Zone::Weapon => &self.weapon,
            Zone::Graveyard => &self.graveyard,
            Zone::OpponentBoard => &self.opponent_board,
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> &mut CardZone {
        match zone {
            Zone::Hand => &mut self.hand,
            Zone::Board => &mut self.board,
            Zone::Secrets => &mut self.secrets,
            Zone::Weapon => &mut self.weapon,
            Zone::Graveyard => &mut self.graveyard,
            Zone::OpponentBoard => &mut self.opponent_board,
        }
    }

    /// Zone currently holding a handle, if any
    pub fn locate(&self, id: InstanceId) -> Option<Zone> {
        [
            Zone::Hand,
            Zone::Board,
            Zone::Secrets,
            Zone::Weapon,
            Zone::Graveyard,
            Zone::OpponentBoard,
        ]
        .into_iter()
        .find(|&z| self.get_zone(z).contains(id))
    }

    /// Hand + board + secrets + weapon + graveyard
    pub fn friendly_count(&self) -> usize {
        self.hand.len() + self.board.len() + self.secrets.len() + self.weapon.len() + self.graveyard.len()
    }

    pub fn clear(&mut self) {
        self.hand.clear();
        self.board.clear();
        self.secrets.clear();
        self.weapon.clear();
        self.graveyard.clear();
        self.opponent_board.clear();
    }
}

impl Default for TrackedZones {
    fn default() -> Self {
        Self::new()
    }
}
