//! Card record loader (catalog JSON format)
//!
//! The catalog files use the shape of the public card API: one object per
//! card with `cardId`, `name`, `type`, `cost`, `attack`, `health`, `race`
//! and `mechanics: [{ "name": ... }]`.

use crate::core::{CardCategory, CardDefinition, CardId};
use crate::{AdvisorError, Result};
use serde::Deserialize;
use smallvec::SmallVec;
use std::fs;
use std::path::Path;

/// Raw card object as it appears in catalog JSON
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub card_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    #[serde(default)]
    pub cost: Option<i32>,
    #[serde(default)]
    pub attack: Option<i32>,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub durability: Option<i32>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub mechanics: Vec<MechanicRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MechanicRecord {
    pub name: String,
}

/// Card loader for catalog JSON
pub struct CardLoader;

impl CardLoader {
    /// Load every card from a JSON array file
    pub fn load_file(path: &Path) -> Result<Vec<CardDefinition>> {
        let content = fs::read_to_string(path)?;
        Self::parse_many(&content)
    }

    /// Parse a JSON array of card objects
    pub fn parse_many(content: &str) -> Result<Vec<CardDefinition>> {
        let records: Vec<CardRecord> = serde_json::from_str(content)?;
        records.into_iter().map(Self::convert).collect()
    }

    /// Parse one card; the card API wraps single results in an array, so both forms are accepted
    pub fn parse_one(content: &str) -> Result<CardDefinition> {
        let trimmed = content.trim_start();
        if trimmed.starts_with('[') {
            let mut cards = Self::parse_many(content)?;
            if cards.is_empty() {
                return Err(AdvisorError::InvalidCardFormat("empty card array".to_string()));
            }
            Ok(cards.swap_remove(0))
        } else {
            let record: CardRecord = serde_json::from_str(content)?;
            Self::convert(record)
        }
    }

    /// Convert a raw record into a definition
    pub fn convert(record: CardRecord) -> Result<CardDefinition> {
        if record.card_id.trim().is_empty() {
            return Err(AdvisorError::InvalidCardFormat(format!(
                "card '{}' has an empty cardId",
                record.name
            )));
        }

        let category = CardCategory::parse(&record.card_type);
        let card_id = CardId::new(record.card_id.trim());

        // Heroes carry no usable stats for planning
        if category == CardCategory::Hero {
            return Ok(CardDefinition::new(card_id, record.name, category, 0));
        }

        let cost = to_stat(record.cost, "cost", &record.name)?;
        let mut def = CardDefinition::new(card_id, record.name.clone(), category, cost);

        match def.category {
            CardCategory::Minion => {
                def.attack = to_stat(record.attack, "attack", &record.name)?;
                def.health = to_stat(record.health, "health", &record.name)?;
            }
            CardCategory::Weapon => {
                def.attack = to_stat(record.attack, "attack", &record.name)?;
                def.health = to_stat(record.durability.or(record.health), "durability", &record.name)?;
            }
            _ => {}
        }

        def.race = record.race.filter(|r| !r.trim().is_empty());
        def.mechanics = record.mechanics.into_iter().map(|m| m.name).collect::<SmallVec<_>>();

        Ok(def)
    }
}

fn to_stat(value: Option<i32>, field: &str, card: &str) -> Result<u8> {
    let raw = value.unwrap_or(0);
    u8::try_from(raw).map_err(|_| AdvisorError::InvalidCardFormat(format!("{card}: {field} out of range ({raw})")))
}
