//! Opening-hand selection
//!
//! Keep one card per cost bracket 1, 2 and 3, picking by rank within a
//! bracket (a later card wins a rank tie). Free cards are always kept;
//! anything costing more than 3 goes back.

use crate::core::CardDefinition;
use crate::strategy::rankings::CardRankings;
use crate::Result;
use std::sync::Arc;

const BRACKETS: usize = 3;

/// Indices of the cards to send back, in the order they were decided
pub fn select_mulligan(hand: &[Arc<CardDefinition>], rankings: &CardRankings) -> Result<Vec<usize>> {
    let mut kept: [Option<usize>; BRACKETS] = [None; BRACKETS];
    let mut marked = Vec::new();

    for (index, card) in hand.iter().enumerate() {
        match card.cost {
            0 => {}
            cost @ 1..=3 => {
                let slot = &mut kept[usize::from(cost) - 1];
                match *slot {
                    None => *slot = Some(index),
                    Some(current) => {
                        if rankings.rank(&card.card_id)? <= rankings.rank(&hand[current].card_id)? {
                            marked.push(current);
                            *slot = Some(index);
                        } else {
                            marked.push(index);
                        }
                    }
                }
            }
            _ => marked.push(index),
        }
    }

    Ok(marked)
}
