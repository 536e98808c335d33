//! Combat choices: value trades and taunt attackers

use crate::core::CardDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which minion-into-minion attacks count as value trades
///
/// Both policies require the attack to kill the enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradePolicy {
    /// The friendly minion must survive
    Strict,
    /// The friendly minion survives, or it is the weaker attacker anyway
    #[default]
    Lenient,
}

impl TradePolicy {
    pub fn is_value_trade(self, friendly: &CardDefinition, enemy: &CardDefinition) -> bool {
        if enemy.health > friendly.attack {
            return false;
        }
        let survives = friendly.health > enemy.attack;
        match self {
            TradePolicy::Strict => survives,
            TradePolicy::Lenient => survives || friendly.attack < enemy.attack,
        }
    }
}

impl FromStr for TradePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(TradePolicy::Strict),
            "lenient" => Ok(TradePolicy::Lenient),
            _ => Err(format!("Invalid trade policy: {s} (expected strict or lenient)")),
        }
    }
}

impl fmt::Display for TradePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradePolicy::Strict => write!(f, "strict"),
            TradePolicy::Lenient => write!(f, "lenient"),
        }
    }
}

/// Index of the most expensive enemy `friendly` can value-trade into
///
/// Only enemies passing `eligible` are considered; the first one wins a cost tie.
pub fn value_trade_target(
    policy: TradePolicy,
    friendly: &CardDefinition,
    enemies: &[Arc<CardDefinition>],
    eligible: impl Fn(&CardDefinition) -> bool,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, enemy) in enemies.iter().enumerate() {
        if !eligible(&**enemy) || !policy.is_value_trade(friendly, enemy) {
            continue;
        }
        match best {
            Some(b) if enemies[b].cost >= enemy.cost => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Attackers that together deal at least `needed` to a taunt with `taunt_attack`
///
/// `candidates` pairs board indices with minions still free to attack.
/// Preference: the weakest single attacker that kills and survives, then the
/// weakest single attacker that kills, then the strongest attackers summed
/// until the damage is enough. `None` if even all of them fall short.
pub fn assign_attackers(candidates: &[(usize, &CardDefinition)], needed: u32, taunt_attack: u8) -> Option<Vec<usize>> {
    if needed == 0 {
        return Some(Vec::new());
    }

    let kills = |c: &CardDefinition| u32::from(c.attack) >= needed;

    let single = candidates
        .iter()
        .filter(|(_, c)| kills(*c) && c.health > taunt_attack)
        .min_by_key(|(_, c)| c.attack)
        .or_else(|| candidates.iter().filter(|(_, c)| kills(*c)).min_by_key(|(_, c)| c.attack));
    if let Some(&(index, _)) = single {
        return Some(vec![index]);
    }

    let mut by_attack: Vec<_> = candidates.iter().filter(|(_, c)| c.attack > 0).collect();
    by_attack.sort_by(|a, b| b.1.attack.cmp(&a.1.attack));

    let mut chosen = Vec::new();
    let mut dealt = 0u32;
    for &&(index, card) in &by_attack {
        chosen.push(index);
        dealt += u32::from(card.attack);
        if dealt >= needed {
            return Some(chosen);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardCategory;

    fn minion(name: &str, cost: u8, attack: u8, health: u8) -> CardDefinition {
        CardDefinition::new(name, name, CardCategory::Minion, cost).with_stats(attack, health)
    }

    #[test]
    fn test_trade_policies() {
        let hyena = minion("Hecklefang Hyena", 2, 2, 4);
        let ooze = minion("Acidic Swamp Ooze", 2, 3, 2);
        // Kills the ooze and survives
        assert!(TradePolicy::Strict.is_value_trade(&hyena, &ooze));

        let bat = minion("Fiery Bat", 1, 2, 1);
        // Kills the ooze but dies; bat is the weaker attacker
        assert!(!TradePolicy::Strict.is_value_trade(&bat, &ooze));
        assert!(TradePolicy::Lenient.is_value_trade(&bat, &ooze));

        let yeti = minion("Chillwind Yeti", 4, 4, 5);
        // Cannot kill the yeti at all
        assert!(!TradePolicy::Lenient.is_value_trade(&hyena, &yeti));
    }

    #[test]
    fn test_target_prefers_expensive_enemy() {
        let albatross = minion("Bad Luck Albatross", 3, 4, 3);
        let enemies = vec![
            Arc::new(minion("Murloc Raider", 1, 2, 1)),
            Arc::new(minion("River Crocolisk", 2, 2, 3)),
            Arc::new(minion("Bloodfen Raptor", 2, 3, 2)),
        ];
        let target = value_trade_target(TradePolicy::Strict, &albatross, &enemies, |_| true);
        assert_eq!(target, Some(1));

        let none = value_trade_target(TradePolicy::Strict, &albatross, &enemies, |e| e.cost > 2);
        assert_eq!(none, None);
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("Strict".parse::<TradePolicy>(), Ok(TradePolicy::Strict));
        assert_eq!(TradePolicy::default(), TradePolicy::Lenient);
        assert!("greedy".parse::<TradePolicy>().is_err());
        assert_eq!(serde_json::to_string(&TradePolicy::Lenient).unwrap(), "\"lenient\"");
    }

    #[test]
    fn test_assign_single_surviving_attacker() {
        let big = minion("Big", 5, 5, 6);
        let small = minion("Small", 4, 4, 1);
        let candidates = vec![(0, &big), (1, &small)];
        // Small kills but dies to 2 attack; Big kills and survives
        assert_eq!(assign_attackers(&candidates, 4, 2), Some(vec![0]));
        // Nobody survives 7 attack: weakest sufficient attacker
        assert_eq!(assign_attackers(&candidates, 4, 7), Some(vec![1]));
    }

    #[test]
    fn test_assign_accumulates() {
        let a = minion("A", 1, 2, 1);
        let b = minion("B", 1, 3, 1);
        let c = minion("C", 1, 1, 1);
        let candidates = vec![(0, &a), (1, &b), (2, &c)];
        assert_eq!(assign_attackers(&candidates, 5, 1), Some(vec![1, 0]));
        assert_eq!(assign_attackers(&candidates, 7, 1), None);
        assert_eq!(assign_attackers(&candidates, 0, 1), Some(vec![]));
    }
}
