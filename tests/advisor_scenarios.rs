//! Advice scenarios driven through the public API
//!
//! Tracker scenarios feed classified events; planner scenarios hand the
//! engine a snapshot directly.

use deck_advisor::config::AdvisorConfig;
use deck_advisor::core::{CardCategory, CardDefinition};
use deck_advisor::events::{CardRef, ZoneEvent};
use deck_advisor::game::{AdvisorLogger, GamePhase, ZoneSnapshot, ZoneTracker};
use deck_advisor::loader::JsonCatalog;
use deck_advisor::strategy::archetype::ids;
use deck_advisor::strategy::{CardRankings, Plan, PlanView, Planner, StrategyEngine, TradePolicy, BEAST_HUNTER};
use deck_advisor::zones::{Zone, ZoneKind, ZoneLocation};
use similar_asserts::assert_eq;
use std::path::PathBuf;

type Tracker = ZoneTracker<JsonCatalog, StrategyEngine>;

fn engine() -> StrategyEngine {
    StrategyEngine::new(&BEAST_HUNTER, CardRankings::from_archetype(&BEAST_HUNTER))
}

fn tracker() -> Tracker {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("cards/beast_hunter.json");
    let catalog = JsonCatalog::load_file(&path).unwrap();
    let mut logger = AdvisorLogger::new();
    logger.enable_capture();
    ZoneTracker::new(catalog, engine(), AdvisorConfig::default()).with_logger(logger)
}

fn friendly(card_id: &str, tag: u32, zone: ZoneKind) -> ZoneEvent {
    ZoneEvent::transition(CardRef::new(card_id).with_tag(tag), None, ZoneLocation::friendly(zone))
}

fn draw(t: &mut Tracker, card_id: &str, tag: u32) {
    t.apply(friendly(card_id, tag, ZoneKind::Hand)).unwrap();
}

/// Mulligan with `opening`, then start the game with the opponent holding `opponent_cards`
fn open_game(t: &mut Tracker, opening: &[(&str, u32)], opponent_cards: u32) {
    t.apply(ZoneEvent::MulliganMarker).unwrap();
    t.apply(ZoneEvent::MulliganMarker).unwrap();
    for &(card_id, tag) in opening {
        draw(t, card_id, tag);
    }
    for _ in 0..opponent_cards {
        t.apply(ZoneEvent::OpponentHandAdd(None)).unwrap();
    }
    t.apply(ZoneEvent::MulliganMarker).unwrap();
    t.apply(ZoneEvent::FirstDrawMarker).unwrap();
}

fn beast(id: &str, name: &str, cost: u8, attack: u8, health: u8) -> CardDefinition {
    CardDefinition::new(id, name, CardCategory::Minion, cost)
        .with_stats(attack, health)
        .with_race("Beast")
}

fn spell(id: &str, name: &str, cost: u8) -> CardDefinition {
    CardDefinition::new(id, name, CardCategory::Spell, cost)
}

fn plan_for(engine: &StrategyEngine, snapshot: &ZoneSnapshot, mana: u8) -> Plan {
    let logger = AdvisorLogger::new();
    let view = PlanView::new(snapshot, &logger);
    engine.plan_turn(&view, mana, false).unwrap()
}

#[test]
fn test_mulligan_sends_back_the_weaker_one_drop() {
    let mut t = tracker();
    t.apply(ZoneEvent::MulliganMarker).unwrap();
    t.apply(ZoneEvent::MulliganMarker).unwrap();
    draw(&mut t, ids::FIERY_BAT, 4);
    draw(&mut t, ids::ALLEYCAT, 5);
    draw(&mut t, ids::HECKLEFANG_HYENA, 6);
    assert!(!t.has_message());

    t.apply(ZoneEvent::MulliganMarker).unwrap();
    assert_eq!(t.drain_messages(), vec!["Mulligan Fiery Bat away.", "Mulligan complete."]);
    assert_eq!(t.phase(), GamePhase::Mulligan);
}

#[test]
fn test_burn_face_then_resume_after_the_draw() {
    let mut t = tracker();
    open_game(&mut t, &[(ids::TIMBER_WOLF, 4)], 4);
    assert_eq!(t.drain_messages(), vec!["Keep your entire opening hand."]);
    assert_eq!(t.mana(), 1);

    draw(&mut t, ids::SUNSCALE_RAPTOR, 5);
    assert_eq!(t.drain_messages(), vec!["Play Sunscale Raptor.", "Pass the turn."]);
    t.apply(friendly(ids::SUNSCALE_RAPTOR, 5, ZoneKind::Play)).unwrap();
    t.apply(ZoneEvent::OpponentHandAdd(None)).unwrap();

    draw(&mut t, ids::ALLEYCAT, 6);
    assert_eq!(
        t.drain_messages(),
        vec![
            "Attack the opponent's face with your Sunscale Raptor.",
            "Play Alleycat.",
            "Play Timber Wolf.",
            "Pass the turn.",
        ]
    );
    t.apply(friendly(ids::ALLEYCAT, 6, ZoneKind::Play)).unwrap();
    t.apply(friendly(ids::TIMBER_WOLF, 4, ZoneKind::Play)).unwrap();
    t.apply(ZoneEvent::OpponentHandAdd(None)).unwrap();

    // Turn 3: three ready beasts and a lone Quick Shot that will draw
    draw(&mut t, ids::QUICK_SHOT, 7);
    assert_eq!(t.turn_count(), 3);
    assert_eq!(t.mana(), 3);
    assert_eq!(
        t.drain_messages(),
        vec![
            "Attack the opponent's face with your Sunscale Raptor.",
            "Attack the opponent's face with your Alleycat.",
            "Attack the opponent's face with your Timber Wolf.",
            "Use Quick Shot on the opponent's face.",
        ]
    );
    assert_eq!(t.opponent_life(), 23);
    let pending = t.pending().unwrap();
    assert_eq!(pending.remaining(), 1);
    assert_eq!(pending.mana(), 1);

    t.apply(friendly(ids::QUICK_SHOT, 7, ZoneKind::Graveyard)).unwrap();
    draw(&mut t, ids::FIERY_BAT, 8);
    assert_eq!(t.drain_messages(), vec!["Play Fiery Bat.", "Pass the turn."]);
    assert!(t.pending().is_none());
    assert_eq!(t.turn_count(), 3);
}

#[test]
fn test_going_second_waits_for_the_opponent() {
    let mut t = tracker();
    open_game(&mut t, &[(ids::ALLEYCAT, 4)], 3);
    t.drain_messages();
    assert!(!t.players_turn());
    assert_eq!(t.mana(), 0);

    draw(&mut t, ids::THE_COIN, 5);
    assert!(!t.has_message());

    draw(&mut t, ids::WOLPERTINGER, 6);
    assert_eq!(t.mana(), 1);
    assert_eq!(t.turn_count(), 1);
    assert_eq!(t.drain_messages(), vec!["Play Alleycat.", "Pass the turn."]);
}

#[test]
fn test_hand_and_board_conserve_cards() {
    let mut t = tracker();
    open_game(&mut t, &[(ids::ALLEYCAT, 4), (ids::FIERY_BAT, 5), (ids::QUICK_SHOT, 6)], 4);
    t.apply(friendly(ids::ALLEYCAT, 4, ZoneKind::Play)).unwrap();
    t.apply(friendly(ids::FIERY_BAT, 5, ZoneKind::Play)).unwrap();
    t.apply(friendly(ids::FIERY_BAT, 5, ZoneKind::Graveyard)).unwrap();
    t.apply(friendly(ids::QUICK_SHOT, 6, ZoneKind::Graveyard)).unwrap();

    assert_eq!(t.zones().friendly_count(), 3);
    assert_eq!(t.zone(Zone::Hand).len(), 0);
    assert_eq!(t.zone(Zone::Board).len(), 1);
    assert_eq!(t.zone(Zone::Graveyard).len(), 2);
}

#[test]
fn test_kill_command_clears_taunt_then_face() {
    let snapshot = ZoneSnapshot::new()
        .with_hand([spell(ids::KILL_COMMAND, "Kill Command", 3)])
        .with_board([beast(ids::HECKLEFANG_HYENA, "Hecklefang Hyena", 2, 2, 4)])
        .with_opponent_board([CardDefinition::new("CS2_179", "Sen'jin Shieldmasta", CardCategory::Minion, 4)
            .with_stats(3, 5)
            .with_mechanic("Taunt")]);
    let plan = plan_for(&engine(), &snapshot, 3);
    assert_eq!(
        plan.messages,
        vec![
            "Use Kill Command on the opponent's Sen'jin Shieldmasta.",
            "Attack the opponent's face with your Hecklefang Hyena.",
            "Pass the turn.",
        ]
    );
    assert_eq!(plan.face_damage(), 2);
}

#[test]
fn test_strict_policy_declines_losing_trades() {
    let snapshot = ZoneSnapshot::new()
        .with_board([beast(ids::SCAVENGING_HYENA, "Scavenging Hyena", 2, 2, 2)])
        .with_opponent_board([CardDefinition::new("EX1_066", "Acidic Swamp Ooze", CardCategory::Minion, 2)
            .with_stats(3, 2)]);

    let lenient = plan_for(&engine().with_trade_policy(TradePolicy::Lenient), &snapshot, 0);
    assert_eq!(
        lenient.messages,
        vec!["Attack the opponent's Acidic Swamp Ooze with your Scavenging Hyena.", "Pass the turn."]
    );

    let strict = plan_for(&engine().with_trade_policy(TradePolicy::Strict), &snapshot, 0);
    assert_eq!(
        strict.messages,
        vec!["Attack the opponent's face with your Scavenging Hyena.", "Pass the turn."]
    );
}
