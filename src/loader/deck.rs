//! Deck file loader (.dck format)
//!
//! ```text
//! [metadata]
//! Name=Beast Hunter
//!
//! [Main]
//! 2 CFM_315   # Alleycat
//! 1 DS1_178   # Tundra Rhino
//! ```

use crate::core::CardId;
use crate::{AdvisorError, Result};
use std::fs;
use std::path::Path;

/// Constructed deck size
pub const DECK_SIZE: usize = 30;

/// Deck loader for .dck files
pub struct DeckLoader;

impl DeckLoader {
    /// Load a deck from a .dck file
    pub fn load_from_file(path: &Path) -> Result<DeckList> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a deck from its text content
    pub fn parse(content: &str) -> Result<DeckList> {
        let mut name = None;
        let mut cards: Vec<DeckEntry> = Vec::new();

        for (lineno, raw) in content.lines().enumerate() {
            // Strip trailing comments
            let line = raw.split('#').next().unwrap_or("").trim();

            if line.is_empty() || line.starts_with('[') {
                continue;
            }

            if let Some(value) = line.strip_prefix("Name=") {
                name = Some(value.trim().to_string());
                continue;
            }

            // Format: "2 CFM_315"
            let (count_str, id) = line.split_once(char::is_whitespace).ok_or_else(|| {
                AdvisorError::InvalidDeckFormat(format!("line {}: expected '<count> <card id>'", lineno + 1))
            })?;
            let count: u8 = count_str.parse().map_err(|_| {
                AdvisorError::InvalidDeckFormat(format!("line {}: bad count '{count_str}'", lineno + 1))
            })?;
            let card_id = CardId::new(id.trim());

            match cards.iter_mut().find(|e| e.card_id == card_id) {
                Some(entry) => entry.count += count,
                None => cards.push(DeckEntry { card_id, count }),
            }
        }

        if cards.is_empty() {
            return Err(AdvisorError::InvalidDeckFormat("Empty deck".to_string()));
        }

        Ok(DeckList { name, cards })
    }
}

/// A deck entry (card id and count)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckEntry {
    pub card_id: CardId,
    pub count: u8,
}

/// A complete deck list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckList {
    pub name: Option<String>,
    pub cards: Vec<DeckEntry>,
}

impl DeckList {
    /// Total cards in the deck
    pub fn total_cards(&self) -> usize {
        self.cards.iter().map(|e| e.count as usize).sum()
    }

    /// Distinct card ids, in file order
    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter().map(|e| &e.card_id)
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.cards.iter().any(|e| &e.card_id == card_id)
    }

    /// Reject lists that are not exactly `DECK_SIZE` cards
    pub fn validate(&self) -> Result<()> {
        let total = self.total_cards();
        if total != DECK_SIZE {
            return Err(AdvisorError::InvalidDeckFormat(format!(
                "deck has {total} cards, expected {DECK_SIZE}"
            )));
        }
        Ok(())
    }
}
