//! Card definitions

use crate::core::CardId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Card categories as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardCategory {
    Minion,
    Spell,
    Weapon,
    Hero,
    HeroPower,
    Other(String),
}

impl CardCategory {
    /// Parse the catalog's free-form type string (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "minion" => CardCategory::Minion,
            "spell" => CardCategory::Spell,
            "weapon" => CardCategory::Weapon,
            "hero" => CardCategory::Hero,
            "hero power" | "hero_power" | "heropower" => CardCategory::HeroPower,
            _ => CardCategory::Other(s.trim().to_string()),
        }
    }
}

impl fmt::Display for CardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardCategory::Minion => write!(f, "Minion"),
            CardCategory::Spell => write!(f, "Spell"),
            CardCategory::Weapon => write!(f, "Weapon"),
            CardCategory::Hero => write!(f, "Hero"),
            CardCategory::HeroPower => write!(f, "Hero Power"),
            CardCategory::Other(s) => write!(f, "{s}"),
        }
    }
}

/// Immutable static attributes of a card
///
/// Created once per card id by the catalog and shared (behind an `Arc`) by
/// every tracked copy of that card. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog identifier (e.g. "EX1_539")
    pub card_id: CardId,

    /// Display name (e.g. "Kill Command")
    pub name: String,

    pub category: CardCategory,

    /// Mana cost
    pub cost: u8,

    /// Attack (minions and weapons)
    pub attack: u8,

    /// Health (minions) or durability (weapons)
    pub health: u8,

    /// Creature type, e.g. "Beast"
    pub race: Option<String>,

    /// Keyword mechanics (e.g. "Taunt", "Battlecry")
    pub mechanics: SmallVec<[String; 2]>,
}

impl CardDefinition {
    pub fn new(card_id: impl Into<CardId>, name: impl Into<String>, category: CardCategory, cost: u8) -> Self {
        CardDefinition {
            card_id: card_id.into(),
            name: name.into(),
            category,
            cost,
            attack: 0,
            health: 0,
            race: None,
            mechanics: SmallVec::new(),
        }
    }

    pub fn with_stats(mut self, attack: u8, health: u8) -> Self {
        self.attack = attack;
        self.health = health;
        self
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.race = Some(race.into());
        self
    }

    pub fn with_mechanic(mut self, mechanic: impl Into<String>) -> Self {
        self.mechanics.push(mechanic.into());
        self
    }

    pub fn is_minion(&self) -> bool {
        self.category == CardCategory::Minion
    }

    pub fn is_weapon(&self) -> bool {
        self.category == CardCategory::Weapon
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.category, CardCategory::Hero | CardCategory::HeroPower)
    }

    pub fn has_mechanic(&self, mechanic: &str) -> bool {
        self.mechanics.iter().any(|m| m.eq_ignore_ascii_case(mechanic))
    }

    pub fn has_taunt(&self) -> bool {
        self.has_mechanic("Taunt")
    }

    pub fn has_secret(&self) -> bool {
        self.has_mechanic("Secret")
    }

    /// Creature type check; "All" counts as every type
    pub fn is_race(&self, race: &str) -> bool {
        self.race
            .as_deref()
            .map(|r| r.eq_ignore_ascii_case(race) || r.eq_ignore_ascii_case("all"))
            .unwrap_or(false)
    }
}

impl fmt::Display for CardDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {} mana", self.name, self.category, self.cost)?;
        if self.is_minion() || self.is_weapon() {
            write!(f, ", {}/{}", self.attack, self.health)?;
        }
        write!(f, ")")
    }
}
