//! Greedy direct-damage driver
//!
//! Walks the archetype's damage table in order and takes the first
//! affordable, unused card, repeatedly, until nothing else fits or a target
//! total is reached. The damage-total form is derived from the card-set
//! form, so the two always agree.

use crate::core::CardDefinition;
use crate::strategy::archetype::{Archetype, Delivery};
use std::sync::Arc;

/// What the current board allows the damage sources to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageContext {
    /// Qualifying creature type on board or in hand at the start of the pass
    pub race_present: bool,
    /// Weapon and charge attacks may hit the chosen target
    pub allow_attacks: bool,
    /// A board slot is free for a charge minion
    pub board_space: bool,
    /// The hero has not attacked yet this turn
    pub hero_can_attack: bool,
}

impl DamageContext {
    pub fn new(race_present: bool) -> Self {
        DamageContext {
            race_present,
            allow_attacks: true,
            board_space: true,
            hero_can_attack: true,
        }
    }

    pub fn allows(&self, delivery: Delivery) -> bool {
        match delivery {
            Delivery::Spell => true,
            Delivery::Weapon => self.allow_attacks && self.hero_can_attack,
            Delivery::Charge => self.allow_attacks && self.board_space,
        }
    }
}

/// One card committed to damage
#[derive(Debug, Clone, PartialEq)]
pub struct ComboPick {
    pub card: Arc<CardDefinition>,
    pub damage: u32,
    pub delivery: Delivery,
}

/// A set of damage cards with their combined value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Combo {
    pub picks: Vec<ComboPick>,
    pub total: u32,
    pub mana_spent: u8,
}

impl Combo {
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn push(&mut self, pick: ComboPick) {
        self.total += pick.damage;
        self.mana_spent += pick.card.cost;
        self.picks.push(pick);
    }

    pub fn card_names(&self) -> Vec<&str> {
        self.picks.iter().map(|p| p.card.name.as_str()).collect()
    }
}

/// Whether the qualifying creature type is on the board or in hand
pub fn race_present(archetype: &Archetype, hand: &[Arc<CardDefinition>], board: &[Arc<CardDefinition>]) -> bool {
    hand.iter().chain(board).any(|c| archetype.is_qualifying(c))
}

/// Greedy first-match over the damage table
///
/// With `target` set, stops as soon as the total reaches it.
pub fn greedy_combo(
    archetype: &Archetype,
    hand: &[Arc<CardDefinition>],
    mana: u8,
    ctx: DamageContext,
    target: Option<u32>,
) -> Combo {
    let mut ctx = ctx;
    let mut used = vec![false; hand.len()];
    let mut mana_left = mana;
    let mut combo = Combo::default();

    loop {
        if target.is_some_and(|t| combo.total >= t) {
            break;
        }

        let next = archetype
            .damage_sources
            .iter()
            .filter(|s| s.condition.holds(ctx.race_present) && ctx.allows(s.delivery))
            .find_map(|source| {
                hand.iter()
                    .enumerate()
                    .find(|(i, c)| !used[*i] && c.card_id == source.card_id && c.cost <= mana_left)
                    .map(|(i, _)| (i, source))
            });

        let Some((index, source)) = next else {
            break;
        };

        used[index] = true;
        mana_left -= hand[index].cost;
        if source.delivery == Delivery::Weapon {
            ctx.hero_can_attack = false;
        }
        combo.push(ComboPick {
            card: Arc::clone(&hand[index]),
            damage: source.damage,
            delivery: source.delivery,
        });
    }

    combo
}

/// Total damage the greedy driver can deal with `mana`
pub fn damage_from_hand(archetype: &Archetype, hand: &[Arc<CardDefinition>], mana: u8, ctx: DamageContext) -> u32 {
    greedy_combo(archetype, hand, mana, ctx, None).total
}
