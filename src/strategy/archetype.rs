//! Deck archetype tables
//!
//! Everything deck-specific the planner knows lives here as data: priority
//! tiers, the ordered damage-source table, removal brackets and draw
//! triggers. Supporting another deck means writing another `Archetype`.

use crate::core::CardDefinition;

/// Card ids used by the Beast Hunter list
pub mod ids {
    pub const ALLEYCAT: &str = "CFM_315";
    pub const DIRE_MOLE: &str = "LOOT_258";
    pub const FIERY_BAT: &str = "OG_179";
    pub const SUNSCALE_RAPTOR: &str = "BAR_031";
    pub const TIMBER_WOLF: &str = "DS1_175";
    pub const WOLPERTINGER: &str = "SCH_133";
    pub const BAD_LUCK_ALBATROSS: &str = "DRG_071";
    pub const FREEZING_TRAP: &str = "EX1_611";
    pub const HECKLEFANG_HYENA: &str = "BAR_745";
    pub const QUICK_SHOT: &str = "CORE_BRM_013";
    pub const SCAVENGING_HYENA: &str = "CORE_EX1_531";
    pub const STARVING_BUZZARD: &str = "CS2_237";
    pub const EAGLEHORN_BOW: &str = "EX1_536";
    pub const KILL_COMMAND: &str = "EX1_539";
    pub const MASTERS_CALL: &str = "TRL_339";
    pub const TUNDRA_RHINO: &str = "DS1_178";
    pub const THE_COIN: &str = "GAME_005";
}

use ids::*;

/// Whether a damage entry needs the qualifying creature type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceCondition {
    Any,
    Present,
    Absent,
}

impl RaceCondition {
    pub fn holds(self, race_present: bool) -> bool {
        match self {
            RaceCondition::Any => true,
            RaceCondition::Present => race_present,
            RaceCondition::Absent => !race_present,
        }
    }
}

/// How a damage source reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Cast at the target
    Spell,
    /// Equip, then attack with the hero
    Weapon,
    /// Play the minion and attack with it immediately
    Charge,
}

/// One row of the damage table
#[derive(Debug, Clone, Copy)]
pub struct DamageSource {
    pub card_id: &'static str,
    pub damage: u32,
    pub condition: RaceCondition,
    pub delivery: Delivery,
}

/// A fixed card set tried by removal sizing
#[derive(Debug, Clone, Copy)]
pub struct KillOption {
    pub cards: &'static [&'static str],
}

/// Removal options for targets whose health falls in `min..=max`
///
/// An empty option list means "use the greedy damage driver".
#[derive(Debug, Clone, Copy)]
pub struct KillBracket {
    pub min_health: u32,
    pub max_health: u32,
    pub options: &'static [KillOption],
}

impl KillBracket {
    pub fn contains(&self, health: u32) -> bool {
        (self.min_health..=self.max_health).contains(&health)
    }
}

/// When playing a card draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTrigger {
    /// Always draws this many
    Fixed(u8),
    /// Draws only when the hand is empty after the card leaves it
    IfHandEmpty(u8),
}

#[derive(Debug, Clone, Copy)]
pub struct DrawCard {
    pub card_id: &'static str,
    pub trigger: DrawTrigger,
}

/// A minion that draws whenever another qualifying minion is summoned
#[derive(Debug, Clone, Copy)]
pub struct DrawEnabler {
    pub card_id: &'static str,
    pub draws_per_summon: u8,
    /// Largest friendly board on which the engine is started
    pub max_board: usize,
    pub min_mana: u8,
    pub max_hand: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    /// Creature type the conditional removal and draw engine care about
    pub qualifying_race: &'static str,
    /// (card id, tier); lower tier = higher priority
    pub tiers: &'static [(&'static str, u8)],
    /// Ordered most efficient first
    pub damage_sources: &'static [DamageSource],
    pub kill_brackets: &'static [KillBracket],
    pub draw_cards: &'static [DrawCard],
    pub draw_enabler: Option<DrawEnabler>,
    /// Minion whose presence lets freshly played minions attack
    pub charge_enabler: Option<&'static str>,
}

impl Archetype {
    pub fn tier(&self, card_id: &str) -> Option<u8> {
        self.tiers.iter().find(|(id, _)| *id == card_id).map(|&(_, tier)| tier)
    }

    pub fn is_damage_source(&self, card_id: &str) -> bool {
        self.damage_sources.iter().any(|s| s.card_id == card_id)
    }

    /// Effective damage of a card given whether the qualifying race is present
    pub fn damage_of(&self, card_id: &str, race_present: bool) -> Option<(u32, Delivery)> {
        self.damage_sources
            .iter()
            .find(|s| s.card_id == card_id && s.condition.holds(race_present))
            .map(|s| (s.damage, s.delivery))
    }

    pub fn kill_bracket(&self, health: u32) -> Option<&KillBracket> {
        self.kill_brackets.iter().find(|b| b.contains(health))
    }

    pub fn draw_trigger(&self, card_id: &str) -> Option<DrawTrigger> {
        self.draw_cards
            .iter()
            .find(|d| d.card_id == card_id)
            .map(|d| d.trigger)
    }

    pub fn is_qualifying(&self, card: &CardDefinition) -> bool {
        card.is_minion() && card.is_race(self.qualifying_race)
    }

    pub fn is_charge_enabler(&self, card: &CardDefinition) -> bool {
        self.charge_enabler == Some(card.card_id.as_str())
    }
}

const fn cards(cards: &'static [&'static str]) -> KillOption {
    KillOption { cards }
}

pub static BEAST_HUNTER: Archetype = Archetype {
    name: "beast-hunter",
    qualifying_race: "Beast",
    tiers: &[
        (ALLEYCAT, 1),
        (WOLPERTINGER, 1),
        (HECKLEFANG_HYENA, 1),
        (BAD_LUCK_ALBATROSS, 1),
        (FIERY_BAT, 2),
        (STARVING_BUZZARD, 2),
        (MASTERS_CALL, 2),
        (SUNSCALE_RAPTOR, 3),
        (EAGLEHORN_BOW, 3),
        (KILL_COMMAND, 3),
        (DIRE_MOLE, 4),
        (SCAVENGING_HYENA, 4),
        (TUNDRA_RHINO, 4),
        (TIMBER_WOLF, 5),
        (QUICK_SHOT, 5),
        (FREEZING_TRAP, 6),
    ],
    damage_sources: &[
        DamageSource {
            card_id: KILL_COMMAND,
            damage: 5,
            condition: RaceCondition::Present,
            delivery: Delivery::Spell,
        },
        DamageSource {
            card_id: QUICK_SHOT,
            damage: 3,
            condition: RaceCondition::Any,
            delivery: Delivery::Spell,
        },
        DamageSource {
            card_id: EAGLEHORN_BOW,
            damage: 3,
            condition: RaceCondition::Any,
            delivery: Delivery::Weapon,
        },
        DamageSource {
            card_id: KILL_COMMAND,
            damage: 3,
            condition: RaceCondition::Absent,
            delivery: Delivery::Spell,
        },
        DamageSource {
            card_id: TUNDRA_RHINO,
            damage: 2,
            condition: RaceCondition::Any,
            delivery: Delivery::Charge,
        },
    ],
    kill_brackets: &[
        KillBracket {
            min_health: 0,
            max_health: 2,
            options: &[cards(&[TUNDRA_RHINO]), cards(&[QUICK_SHOT]), cards(&[KILL_COMMAND])],
        },
        KillBracket {
            min_health: 3,
            max_health: 3,
            options: &[cards(&[QUICK_SHOT]), cards(&[KILL_COMMAND])],
        },
        KillBracket {
            min_health: 4,
            max_health: 5,
            options: &[
                cards(&[KILL_COMMAND]),
                cards(&[QUICK_SHOT, QUICK_SHOT]),
                cards(&[QUICK_SHOT, TUNDRA_RHINO]),
                cards(&[KILL_COMMAND, TUNDRA_RHINO]),
                cards(&[KILL_COMMAND, KILL_COMMAND]),
            ],
        },
        KillBracket {
            min_health: 6,
            max_health: u32::MAX,
            options: &[],
        },
    ],
    draw_cards: &[
        DrawCard {
            card_id: MASTERS_CALL,
            trigger: DrawTrigger::Fixed(3),
        },
        DrawCard {
            card_id: QUICK_SHOT,
            trigger: DrawTrigger::IfHandEmpty(1),
        },
    ],
    draw_enabler: Some(DrawEnabler {
        card_id: STARVING_BUZZARD,
        draws_per_summon: 1,
        max_board: 4,
        min_mana: 4,
        max_hand: 6,
    }),
    charge_enabler: Some(TUNDRA_RHINO),
};
