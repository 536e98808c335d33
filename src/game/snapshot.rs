//! Read-only zone snapshot handed to the planner
//!
//! A snapshot owns `Arc`s to the card definitions, so the planner can keep
//! and reorder its own working copies without touching tracker state.

use crate::core::CardDefinition;
use std::sync::Arc;

pub type CardRefs = Vec<Arc<CardDefinition>>;

#[derive(Debug, Clone, Default)]
pub struct ZoneSnapshot {
    pub hand: CardRefs,
    pub board: CardRefs,
    pub secrets: CardRefs,
    pub opponent_board: CardRefs,
    /// Count only; the contents are hidden
    pub opponent_hand_size: u32,
    pub mana: u8,
    /// The equipped weapon, if any
    pub weapon: Option<Arc<CardDefinition>>,
    pub opponent_life: i32,
}

impl ZoneSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weapon_equipped(&self) -> bool {
        self.weapon.is_some()
    }

    pub fn with_hand(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        self.hand = cards.into_iter().map(Arc::new).collect();
        self
    }

    pub fn with_board(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        self.board = cards.into_iter().map(Arc::new).collect();
        self
    }

    pub fn with_secrets(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        self.secrets = cards.into_iter().map(Arc::new).collect();
        self
    }

    pub fn with_opponent_board(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        self.opponent_board = cards.into_iter().map(Arc::new).collect();
        self
    }

    pub fn with_weapon(mut self, weapon: CardDefinition) -> Self {
        self.weapon = Some(Arc::new(weapon));
        self
    }

    pub fn with_mana(mut self, mana: u8) -> Self {
        self.mana = mana;
        self
    }

    pub fn with_opponent_life(mut self, life: i32) -> Self {
        self.opponent_life = life;
        self
    }
}
