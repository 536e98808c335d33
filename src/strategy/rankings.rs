//! Card priority rankings
//!
//! Built once at start-up from the deck list and the archetype's tier table.
//! Only used to break ties between otherwise equal plays.

use crate::core::CardId;
use crate::loader::DeckList;
use crate::strategy::archetype::Archetype;
use crate::{AdvisorError, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct CardRankings {
    ranks: FxHashMap<CardId, u8>,
}

impl CardRankings {
    /// Rank every card in `deck`; a card the archetype has no tier for is an error
    pub fn from_deck(deck: &DeckList, archetype: &Archetype) -> Result<Self> {
        let mut ranks = FxHashMap::default();
        for card_id in deck.card_ids() {
            let tier = archetype
                .tier(card_id.as_str())
                .ok_or_else(|| AdvisorError::RankingMissing(card_id.to_string()))?;
            ranks.insert(card_id.clone(), tier);
        }
        Ok(CardRankings { ranks })
    }

    /// Rank every card the archetype lists
    pub fn from_archetype(archetype: &Archetype) -> Self {
        CardRankings {
            ranks: archetype
                .tiers
                .iter()
                .map(|&(id, tier)| (CardId::new(id), tier))
                .collect(),
        }
    }

    /// Rank of a card; a miss means deck list and tier table disagree
    pub fn rank(&self, card_id: &CardId) -> Result<u8> {
        self.get(card_id)
            .ok_or_else(|| AdvisorError::RankingMissing(card_id.to_string()))
    }

    pub fn get(&self, card_id: &CardId) -> Option<u8> {
        self.ranks.get(card_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::DeckLoader;
    use crate::strategy::archetype::BEAST_HUNTER;

    #[test]
    fn test_from_deck() {
        let deck = DeckLoader::parse("2 CFM_315\n2 EX1_611\n").unwrap();
        let rankings = CardRankings::from_deck(&deck, &BEAST_HUNTER).unwrap();
        assert_eq!(rankings.len(), 2);
        assert_eq!(rankings.rank(&CardId::new("CFM_315")).unwrap(), 1);
        assert_eq!(rankings.rank(&CardId::new("EX1_611")).unwrap(), 6);
    }

    #[test]
    fn test_unranked_deck_card_fails() {
        let deck = DeckLoader::parse("2 CFM_315\n1 CS2_182\n").unwrap();
        match CardRankings::from_deck(&deck, &BEAST_HUNTER) {
            Err(AdvisorError::RankingMissing(id)) => assert_eq!(id, "CS2_182"),
            other => panic!("expected RankingMissing, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_miss_is_reported() {
        let rankings = CardRankings::from_archetype(&BEAST_HUNTER);
        assert!(matches!(
            rankings.rank(&CardId::new("GAME_005")),
            Err(AdvisorError::RankingMissing(_))
        ));
    }
}
