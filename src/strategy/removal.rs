//! Removal sizing: the smallest card set that kills one target
//!
//! Small targets use the archetype's fixed preference brackets, which keep
//! overkill low. Large targets fall through to the greedy driver.

use crate::core::CardDefinition;
use crate::strategy::archetype::{Archetype, KillOption};
use crate::strategy::combo::{greedy_combo, Combo, ComboPick, DamageContext};
use std::sync::Arc;

/// Cards from `hand` that kill a target with `health`, or an empty combo
pub fn kill_from_hand(
    archetype: &Archetype,
    hand: &[Arc<CardDefinition>],
    health: u32,
    mana: u8,
    ctx: DamageContext,
) -> Combo {
    let options = archetype.kill_bracket(health).map(|b| b.options).unwrap_or(&[]);

    if options.is_empty() {
        let combo = greedy_combo(archetype, hand, mana, ctx, Some(health));
        return if combo.total >= health { combo } else { Combo::default() };
    }

    options
        .iter()
        .filter_map(|option| assemble(archetype, hand, option, mana, ctx))
        .find(|combo| combo.total >= health)
        .unwrap_or_default()
}

/// Take each card of `option` from hand, if all are present and affordable
fn assemble(
    archetype: &Archetype,
    hand: &[Arc<CardDefinition>],
    option: &KillOption,
    mana: u8,
    ctx: DamageContext,
) -> Option<Combo> {
    let mut used = vec![false; hand.len()];
    let mut combo = Combo::default();

    for &card_id in option.cards {
        let index = (0..hand.len()).find(|&i| !used[i] && hand[i].card_id == card_id)?;
        let (damage, delivery) = archetype.damage_of(card_id, ctx.race_present)?;
        if !ctx.allows(delivery) {
            return None;
        }
        used[index] = true;
        combo.push(ComboPick {
            card: Arc::clone(&hand[index]),
            damage,
            delivery,
        });
    }

    (combo.mana_spent <= mana).then_some(combo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardCategory;
    use crate::strategy::archetype::{ids, BEAST_HUNTER};

    fn card(id: &str, name: &str, category: CardCategory, cost: u8) -> Arc<CardDefinition> {
        Arc::new(CardDefinition::new(id, name, category, cost))
    }

    fn quick_shot() -> Arc<CardDefinition> {
        card(ids::QUICK_SHOT, "Quick Shot", CardCategory::Spell, 2)
    }

    fn kill_command() -> Arc<CardDefinition> {
        card(ids::KILL_COMMAND, "Kill Command", CardCategory::Spell, 3)
    }

    fn rhino() -> Arc<CardDefinition> {
        Arc::new(
            CardDefinition::new(ids::TUNDRA_RHINO, "Tundra Rhino", CardCategory::Minion, 5)
                .with_stats(2, 5)
                .with_race("Beast"),
        )
    }

    #[test]
    fn test_small_target_prefers_rhino_then_quick_shot() {
        let hand = vec![quick_shot(), rhino()];
        let ctx = DamageContext::new(true);
        let combo = kill_from_hand(&BEAST_HUNTER, &hand, 2, 5, ctx);
        assert_eq!(combo.card_names(), vec!["Tundra Rhino"]);

        let combo = kill_from_hand(&BEAST_HUNTER, &hand, 2, 4, ctx);
        assert_eq!(combo.card_names(), vec!["Quick Shot"]);
    }

    #[test]
    fn test_four_health_without_beast() {
        let hand = vec![kill_command(), kill_command()];
        let combo = kill_from_hand(&BEAST_HUNTER, &hand, 4, 6, DamageContext::new(false));
        assert_eq!(combo.card_names(), vec!["Kill Command", "Kill Command"]);
        assert_eq!(combo.total, 6);

        // One Kill Command with a beast around is enough
        let combo = kill_from_hand(&BEAST_HUNTER, &hand, 4, 6, DamageContext::new(true));
        assert_eq!(combo.card_names(), vec!["Kill Command"]);
    }

    #[test]
    fn test_double_quick_shot() {
        let hand = vec![quick_shot(), quick_shot()];
        let combo = kill_from_hand(&BEAST_HUNTER, &hand, 5, 4, DamageContext::new(false));
        assert_eq!(combo.total, 6);
        assert_eq!(combo.mana_spent, 4);

        assert!(kill_from_hand(&BEAST_HUNTER, &hand, 5, 3, DamageContext::new(false)).is_empty());
    }

    #[test]
    fn test_large_target_uses_greedy_or_nothing() {
        let hand = vec![kill_command(), quick_shot()];
        let combo = kill_from_hand(&BEAST_HUNTER, &hand, 8, 5, DamageContext::new(true));
        assert_eq!(combo.total, 8);

        assert!(kill_from_hand(&BEAST_HUNTER, &hand, 9, 5, DamageContext::new(true)).is_empty());
    }
}
