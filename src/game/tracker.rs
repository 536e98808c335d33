//! Zone tracker: the authoritative per-game state
//!
//! Consumes zone events one at a time, keeps every tracked card as an
//! instance handle in exactly one zone, runs the phase machine and calls
//! the planner at its trigger points (third mulligan marker, each drawn card,
//! each resolved continuation). Planner output comes back as a `Plan` and is
//! applied here: messages first, then directives.

use crate::config::AdvisorConfig;
use crate::core::{CardDefinition, CardId, EntityTag, InstanceId, InstanceStore};
use crate::events::{classify_line, CardRef, GameOutcome, Transition, ZoneEvent};
use crate::game::continuation::PendingContinuation;
use crate::game::logger::AdvisorLogger;
use crate::game::messages::MessageQueue;
use crate::game::phase::GamePhase;
use crate::game::snapshot::ZoneSnapshot;
use crate::loader::{CachedCatalog, CardCatalog};
use crate::strategy::archetype::ids::THE_COIN;
use crate::strategy::{Directive, Plan, PlanView, Planner};
use crate::zones::{Side, TrackedZones, Zone, ZoneKind, ZoneLocation};
use crate::{AdvisorError, Result};
use std::sync::Arc;

/// Marker count that enters the mulligan phase
const MULLIGAN_ENTER_MARKER: u8 = 2;
/// Marker count that triggers mulligan advice
const MULLIGAN_ADVICE_MARKER: u8 = 3;
/// Opponent opening hand size when the opponent goes first
const FIRST_PLAYER_HAND: u32 = 3;

pub struct ZoneTracker<C, P> {
    catalog: CachedCatalog<C>,
    planner: P,
    config: AdvisorConfig,
    store: InstanceStore,
    zones: TrackedZones,
    phase: GamePhase,
    mulligan_markers: u8,
    /// Mana crystals this turn
    mana: u8,
    players_turn: bool,
    turn_count: u32,
    opponent_hand_size: u32,
    opponent_life: i32,
    pending: Option<PendingContinuation>,
    messages: MessageQueue,
    logger: AdvisorLogger,
    invariant_violations: u32,
    last_outcome: Option<GameOutcome>,
}

impl<C: CardCatalog, P: Planner> ZoneTracker<C, P> {
    pub fn new(catalog: C, planner: P, config: AdvisorConfig) -> Self {
        ZoneTracker {
            catalog: CachedCatalog::with_retries(catalog, config.catalog_retries),
            planner,
            store: InstanceStore::new(),
            zones: TrackedZones::new(),
            phase: GamePhase::Idle,
            mulligan_markers: 0,
            mana: 0,
            players_turn: true,
            turn_count: 0,
            opponent_hand_size: 0,
            opponent_life: config.opponent_starting_life,
            pending: None,
            messages: MessageQueue::new(),
            logger: AdvisorLogger::new(),
            invariant_violations: 0,
            last_outcome: None,
            config,
        }
    }

    pub fn with_logger(mut self, logger: AdvisorLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Warm the catalog cache, failing on the first card it cannot supply
    pub fn preload<'a>(&mut self, card_ids: impl IntoIterator<Item = &'a CardId>) -> Result<usize> {
        Ok(self.catalog.preload(card_ids)?.len())
    }

    pub fn logger(&self) -> &AdvisorLogger {
        &self.logger
    }

    /// Classify one raw log line and apply it
    ///
    /// Noise lines are ignored. A malformed line is logged and returned as
    /// an error; tracker state is left unchanged.
    pub fn apply_line(&mut self, line: &str) -> Result<()> {
        match classify_line(line) {
            Ok(Some(event)) => self.apply(event),
            Ok(None) => Ok(()),
            Err(e) => {
                self.logger.normal(&format!("Dropping log line: {e}"));
                Err(e)
            }
        }
    }

    /// Apply one classified event
    pub fn apply(&mut self, event: ZoneEvent) -> Result<()> {
        self.logger.event(&event.to_string());
        match event {
            ZoneEvent::MulliganMarker => self.begin_mulligan_phase(),
            ZoneEvent::FirstDrawMarker => {
                if self.phase == GamePhase::Mulligan {
                    self.begin_active_game();
                }
                Ok(())
            }
            ZoneEvent::Transition(transition) => self.transition_card(&transition),
            ZoneEvent::OpponentHandAdd(tag) => {
                self.opponent_hand_add(tag);
                Ok(())
            }
            ZoneEvent::DrawResolved => self.notify_draw_resolved(),
            ZoneEvent::GameEnd(outcome) => {
                self.logger.minimal(match outcome {
                    GameOutcome::Victory => "Game over, victory!",
                    GameOutcome::Defeat => "Game over, defeat.",
                });
                self.last_outcome = Some(outcome);
                self.end_game();
                Ok(())
            }
        }
    }

    /// Count a mulligan marker; the client prints it several times per game
    pub fn begin_mulligan_phase(&mut self) -> Result<()> {
        match self.phase {
            GamePhase::Ended => self.phase = GamePhase::Idle,
            GamePhase::Active => {
                self.logger.normal("Mulligan marker during an active game, resetting");
                self.end_game();
                self.phase = GamePhase::Idle;
            }
            GamePhase::Idle | GamePhase::Mulligan => {}
        }
        debug_assert!(self.phase.accepts_mulligan_marker());

        self.mulligan_markers = self.mulligan_markers.saturating_add(1);
        match self.mulligan_markers {
            MULLIGAN_ENTER_MARKER => {
                self.phase = GamePhase::Mulligan;
                self.logger.normal("Mulligan phase");
                Ok(())
            }
            MULLIGAN_ADVICE_MARKER => {
                self.mulligan_markers = 0;
                self.run_mulligan_plan()
            }
            _ => Ok(()),
        }
    }

    /// Leave the mulligan; who goes first follows from the opponent's hand size
    pub fn begin_active_game(&mut self) {
        if self.phase != GamePhase::Mulligan {
            return;
        }
        self.phase = GamePhase::Active;
        if self.opponent_hand_size == FIRST_PLAYER_HAND {
            self.players_turn = false;
            self.logger.normal("Game started, opponent goes first");
        } else {
            self.players_turn = true;
            self.mana = 1;
            self.logger.normal("Game started, you go first");
        }
    }

    /// Move a card between zones
    ///
    /// Catalog failures are returned before anything is mutated.
    pub fn transition_card(&mut self, transition: &Transition) -> Result<()> {
        match transition.to.side {
            Side::Friendly => self.friendly_transition(transition),
            Side::Opposing => self.opposing_transition(transition),
        }
    }

    /// One draw has resolved: tick the continuation or start a turn plan
    pub fn notify_draw_resolved(&mut self) -> Result<()> {
        if !self.phase.is_active() {
            return Ok(());
        }

        if let Some(pending) = self.pending.as_mut() {
            if !pending.resolve_draw() {
                return Ok(());
            }
            let mana = pending.mana();
            self.pending = None;
            self.logger.verbose("Expected draws arrived, resuming plan");
            return self.run_turn_plan(mana, true);
        }

        if !self.players_turn {
            self.players_turn = true;
            self.mana = self.mana.saturating_add(1).min(self.config.max_mana);
        }
        self.turn_count += 1;
        self.logger.normal(&format!("--- BEGIN TURN {} ---", self.turn_count));
        self.run_turn_plan(self.mana, false)
    }

    /// Reset everything per-game; the message queue and catalog cache survive
    pub fn end_game(&mut self) {
        self.zones.clear();
        self.store.clear();
        self.phase = GamePhase::Ended;
        self.mulligan_markers = 0;
        self.mana = 0;
        self.players_turn = true;
        self.turn_count = 0;
        self.opponent_hand_size = 0;
        self.opponent_life = self.config.opponent_starting_life;
        self.pending = None;
        self.logger.normal("Game state reset");
    }

    /// A card went into the opponent's hand
    ///
    /// A tag we already track is a bounce: the instance leaves its zone and
    /// the turn does not change hands.
    pub fn opponent_hand_add(&mut self, tag: Option<EntityTag>) {
        self.opponent_hand_size += 1;
        if let Some(id) = tag.and_then(|tag| self.store.find_by_tag(tag)) {
            self.detach(id);
            self.store.remove(id);
            return;
        }
        self.players_turn = false;
    }

    /// Hold planning until `draws` more draws resolve
    ///
    /// A second request while one is pending is rejected and the first kept.
    pub fn suspend_for_draws(&mut self, draws: u8, mana: u8) -> Result<()> {
        if draws == 0 {
            return Ok(());
        }
        if let Some(pending) = self.pending {
            let err = AdvisorError::ContinuationPending {
                remaining: pending.remaining(),
            };
            self.logger.invariant(&err.to_string());
            return Err(err);
        }
        self.logger
            .verbose(&format!("Waiting for {draws} draw(s) with {mana} mana left"));
        self.pending = Some(PendingContinuation::new(draws, mana));
        Ok(())
    }

    fn friendly_transition(&mut self, transition: &Transition) -> Result<()> {
        let card_ref = &transition.card;
        match transition.to.zone {
            ZoneKind::Deck => {
                // Mulliganed card going back; the deck itself is not tracked
                if let Some(id) = self.locate_instance(card_ref, &[Zone::Hand]) {
                    self.detach(id);
                    self.store.remove(id);
                }
                return Ok(());
            }
            ZoneKind::SetAside | ZoneKind::RemovedFromGame => {
                self.forget_tagged(card_ref);
                return Ok(());
            }
            ZoneKind::Hand | ZoneKind::Play | ZoneKind::Secret | ZoneKind::Graveyard => {}
        }

        let card = self.catalog.get(&card_ref.card_id)?;
        if card.is_hero() {
            return Ok(());
        }

        let dest = match transition.to.zone {
            ZoneKind::Hand => Zone::Hand,
            ZoneKind::Secret => Zone::Secrets,
            ZoneKind::Play if card.is_weapon() => Zone::Weapon,
            ZoneKind::Play if card.is_minion() => Zone::Board,
            _ => Zone::Graveyard,
        };
        let sources: &[Zone] = match dest {
            Zone::Board | Zone::Weapon | Zone::Secrets => &[Zone::Hand],
            Zone::Graveyard => &[Zone::Board, Zone::Secrets, Zone::Weapon, Zone::Hand],
            Zone::Hand | Zone::OpponentBoard => &[],
        };

        let (id, origin) = match self.locate_instance(card_ref, sources) {
            Some(id) => (id, self.detach(id)),
            None => (self.store.create(Arc::clone(&card), card_ref.tag), None),
        };

        if dest == Zone::Weapon {
            let replaced: Vec<InstanceId> = self.zones.weapon.cards.drain(..).collect();
            for old in replaced {
                self.zones.graveyard.add(old);
            }
        }
        self.zones.get_zone_mut(dest).add(id);
        self.logger
            .verbose(&format!("{} -> {:?} (instance {id})", card.name, dest));

        if dest == Zone::Hand && origin != Some(Zone::Hand) {
            if card.card_id == THE_COIN {
                self.players_turn = false;
                return Ok(());
            }
            return self.notify_draw_resolved();
        }
        Ok(())
    }

    fn opposing_transition(&mut self, transition: &Transition) -> Result<()> {
        let card_ref = &transition.card;
        let from_hand = matches!(
            transition.from,
            None | Some(ZoneLocation {
                side: Side::Opposing,
                zone: ZoneKind::Hand
            })
        );

        match transition.to.zone {
            ZoneKind::Play => {
                let card = self.catalog.get(&card_ref.card_id)?;
                if card.is_hero() {
                    return Ok(());
                }
                let known = self.locate_instance(card_ref, &[]);
                if known.is_none() && from_hand {
                    self.opponent_hand_size = self.opponent_hand_size.saturating_sub(1);
                }
                if card.is_minion() {
                    let id = match known {
                        Some(id) => {
                            self.detach(id);
                            id
                        }
                        None => self.store.create(card, card_ref.tag),
                    };
                    self.zones.opponent_board.add(id);
                }
            }
            ZoneKind::Graveyard => {
                if let Some(id) = self.locate_instance(card_ref, &[]) {
                    self.detach(id);
                    self.store.remove(id);
                    return Ok(());
                }
                if card_ref.card_id.as_str().is_empty() {
                    return Ok(());
                }
                let card = self.catalog.get(&card_ref.card_id)?;
                if card.is_minion() {
                    if let Some(id) = self.zones.opponent_board.find_card(&card.card_id, &self.store) {
                        self.zones.opponent_board.remove(id);
                        self.store.remove(id);
                    }
                } else if transition.from == Some(ZoneLocation::opposing(ZoneKind::Hand)) {
                    self.opponent_hand_size = self.opponent_hand_size.saturating_sub(1);
                }
            }
            ZoneKind::Secret => {
                self.opponent_hand_size = self.opponent_hand_size.saturating_sub(1);
            }
            ZoneKind::Hand => self.opponent_hand_add(card_ref.tag),
            ZoneKind::Deck | ZoneKind::SetAside | ZoneKind::RemovedFromGame => self.forget_tagged(card_ref),
        }
        Ok(())
    }

    /// Instance for a card reference: by entity tag, else by card id in `fallback`
    ///
    /// An unknown tag means a new copy, so it never falls back.
    fn locate_instance(&self, card_ref: &CardRef, fallback: &[Zone]) -> Option<InstanceId> {
        if let Some(tag) = card_ref.tag {
            return self.store.find_by_tag(tag);
        }
        fallback
            .iter()
            .find_map(|&zone| self.zones.get_zone(zone).find_card(&card_ref.card_id, &self.store))
    }

    /// Take a handle out of whatever zone holds it
    fn detach(&mut self, id: InstanceId) -> Option<Zone> {
        let zone = self.zones.locate(id)?;
        self.zones.get_zone_mut(zone).remove(id);
        Some(zone)
    }

    fn forget_tagged(&mut self, card_ref: &CardRef) {
        if let Some(id) = card_ref.tag.and_then(|tag| self.store.find_by_tag(tag)) {
            self.detach(id);
            self.store.remove(id);
        }
    }

    fn run_mulligan_plan(&mut self) -> Result<()> {
        let result = {
            let snapshot = self.snapshot();
            let view = PlanView::new(&snapshot, &self.logger);
            self.planner.plan_mulligan(&view)
        };
        self.finish_plan(result)
    }

    fn run_turn_plan(&mut self, mana: u8, already_attacked: bool) -> Result<()> {
        let result = {
            let mut snapshot = self.snapshot();
            snapshot.mana = mana;
            let view = PlanView::new(&snapshot, &self.logger);
            self.planner.plan_turn(&view, mana, already_attacked)
        };
        self.finish_plan(result)
    }

    fn finish_plan(&mut self, result: Result<Plan>) -> Result<()> {
        match result {
            Ok(plan) => self.apply_plan(plan),
            Err(e @ AdvisorError::RankingMissing(_)) => {
                self.invariant_violations += 1;
                self.logger.invariant(&e.to_string());
                Err(e)
            }
            Err(e) => {
                self.logger
                    .normal(&format!("[{}] no advice this time: {e}", self.planner.name()));
                Err(e)
            }
        }
    }

    fn apply_plan(&mut self, plan: Plan) -> Result<()> {
        for message in plan.messages {
            self.messages.push(message);
        }
        for directive in plan.directives {
            match directive {
                Directive::DamageOpponent(amount) => {
                    let amount = i32::try_from(amount).unwrap_or(i32::MAX);
                    self.opponent_life = self.opponent_life.saturating_sub(amount);
                }
                Directive::SuspendForDraws { draws, mana } => self.suspend_for_draws(draws, mana)?,
            }
        }
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn mana(&self) -> u8 {
        self.mana
    }

    pub fn players_turn(&self) -> bool {
        self.players_turn
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn opponent_hand_size(&self) -> u32 {
        self.opponent_hand_size
    }

    pub fn opponent_life(&self) -> i32 {
        self.opponent_life
    }

    pub fn pending(&self) -> Option<PendingContinuation> {
        self.pending
    }

    pub fn weapon_equipped(&self) -> bool {
        !self.zones.weapon.is_empty()
    }

    pub fn invariant_violations(&self) -> u32 {
        self.invariant_violations
    }

    pub fn last_outcome(&self) -> Option<GameOutcome> {
        self.last_outcome
    }

    /// Copy of one zone's card definitions, in zone order
    pub fn zone(&self, zone: Zone) -> Vec<Arc<CardDefinition>> {
        self.zones
            .get_zone(zone)
            .cards
            .iter()
            .filter_map(|&id| self.store.card(id).cloned())
            .collect()
    }

    pub fn zones(&self) -> &TrackedZones {
        &self.zones
    }

    pub fn snapshot(&self) -> ZoneSnapshot {
        ZoneSnapshot {
            hand: self.zone(Zone::Hand),
            board: self.zone(Zone::Board),
            secrets: self.zone(Zone::Secrets),
            opponent_board: self.zone(Zone::OpponentBoard),
            opponent_hand_size: self.opponent_hand_size,
            mana: self.mana,
            weapon: self.zone(Zone::Weapon).into_iter().next(),
            opponent_life: self.opponent_life,
        }
    }

    pub fn has_message(&self) -> bool {
        self.messages.has_message()
    }

    pub fn next_message(&mut self) -> Option<String> {
        self.messages.next_message()
    }

    pub fn drain_messages(&mut self) -> Vec<String> {
        self.messages.drain()
    }

    pub fn catalog(&self) -> &CachedCatalog<C> {
        &self.catalog
    }

    pub fn planner(&self) -> &P {
        &self.planner
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardCategory;
    use crate::loader::JsonCatalog;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Replays canned plans and records how it was called
    #[derive(Default)]
    struct ScriptedPlanner {
        turns: RefCell<VecDeque<Result<Plan>>>,
        calls: RefCell<Vec<(u8, bool)>>,
        mulligans: Cell<u32>,
    }

    impl ScriptedPlanner {
        fn then(self, plan: Result<Plan>) -> Self {
            self.turns.borrow_mut().push_back(plan);
            self
        }
    }

    impl Planner for ScriptedPlanner {
        fn name(&self) -> &str {
            "scripted"
        }

        fn plan_mulligan(&self, _view: &PlanView<'_>) -> Result<Plan> {
            self.mulligans.set(self.mulligans.get() + 1);
            let mut plan = Plan::new();
            plan.say("Keep your entire opening hand.");
            Ok(plan)
        }

        fn plan_turn(&self, _view: &PlanView<'_>, mana: u8, already_attacked: bool) -> Result<Plan> {
            self.calls.borrow_mut().push((mana, already_attacked));
            self.turns.borrow_mut().pop_front().unwrap_or_else(|| Ok(Plan::new()))
        }
    }

    fn catalog() -> JsonCatalog {
        JsonCatalog::from_cards([
            CardDefinition::new("CFM_315", "Alleycat", CardCategory::Minion, 1)
                .with_stats(1, 1)
                .with_race("Beast"),
            CardDefinition::new("CORE_BRM_013", "Quick Shot", CardCategory::Spell, 2),
            CardDefinition::new("EX1_536", "Eaglehorn Bow", CardCategory::Weapon, 3).with_stats(3, 2),
            CardDefinition::new("GAME_005", "The Coin", CardCategory::Spell, 0),
            CardDefinition::new("CS2_121", "Frostwolf Grunt", CardCategory::Minion, 2)
                .with_stats(2, 2)
                .with_mechanic("Taunt"),
        ])
    }

    fn tracker(planner: ScriptedPlanner) -> ZoneTracker<JsonCatalog, ScriptedPlanner> {
        let mut logger = AdvisorLogger::new();
        logger.set_output_mode(crate::game::OutputMode::Memory);
        ZoneTracker::new(catalog(), planner, AdvisorConfig::default()).with_logger(logger)
    }

    fn to_friendly(id: &str, tag: u32, zone: ZoneKind) -> ZoneEvent {
        ZoneEvent::transition(CardRef::new(id).with_tag(tag), None, ZoneLocation::friendly(zone))
    }

    fn start_game(t: &mut ZoneTracker<JsonCatalog, ScriptedPlanner>) {
        for _ in 0..3 {
            t.apply(ZoneEvent::MulliganMarker).unwrap();
        }
        t.apply(ZoneEvent::FirstDrawMarker).unwrap();
    }

    #[test]
    fn test_mulligan_marker_debounce() {
        let mut t = tracker(ScriptedPlanner::default());
        t.apply(ZoneEvent::MulliganMarker).unwrap();
        assert_eq!(t.phase(), GamePhase::Idle);
        t.apply(ZoneEvent::MulliganMarker).unwrap();
        assert_eq!(t.phase(), GamePhase::Mulligan);
        assert_eq!(t.planner().mulligans.get(), 0);
        t.apply(ZoneEvent::MulliganMarker).unwrap();
        assert_eq!(t.planner().mulligans.get(), 1);
        assert_eq!(t.next_message().as_deref(), Some("Keep your entire opening hand."));
    }

    #[test]
    fn test_priority_from_opponent_hand() {
        let mut t = tracker(ScriptedPlanner::default());
        start_game(&mut t);
        assert_eq!(t.phase(), GamePhase::Active);
        assert!(t.players_turn());
        assert_eq!(t.mana(), 1);

        let mut t = tracker(ScriptedPlanner::default());
        for _ in 0..3 {
            t.apply(ZoneEvent::OpponentHandAdd(None)).unwrap();
        }
        start_game(&mut t);
        assert!(!t.players_turn());
        assert_eq!(t.mana(), 0);

        // Our first draw starts turn 1 with one crystal
        t.apply(to_friendly("CFM_315", 10, ZoneKind::Hand)).unwrap();
        assert_eq!(t.mana(), 1);
        assert_eq!(t.turn_count(), 1);
        assert_eq!(t.planner().calls.borrow().as_slice(), &[(1, false)]);
    }

    #[test]
    fn test_mulligan_hand_adds_do_not_plan() {
        let mut t = tracker(ScriptedPlanner::default());
        t.apply(ZoneEvent::MulliganMarker).unwrap();
        t.apply(ZoneEvent::MulliganMarker).unwrap();
        t.apply(to_friendly("CFM_315", 10, ZoneKind::Hand)).unwrap();
        assert_eq!(t.zone(Zone::Hand).len(), 1);
        assert!(t.planner().calls.borrow().is_empty());
    }

    #[test]
    fn test_continuation_resumes_once() {
        let mut suspend = Plan::new();
        suspend.suspend(2, 3);
        let planner = ScriptedPlanner::default().then(Ok(suspend));
        let mut t = tracker(planner);
        start_game(&mut t);

        t.apply(to_friendly("CFM_315", 10, ZoneKind::Hand)).unwrap();
        assert_eq!(t.pending(), Some(PendingContinuation::new(2, 3)));

        t.apply(to_friendly("CFM_315", 11, ZoneKind::Hand)).unwrap();
        assert_eq!(t.planner().calls.borrow().len(), 1);
        t.apply(to_friendly("CFM_315", 12, ZoneKind::Hand)).unwrap();
        assert_eq!(t.planner().calls.borrow().as_slice(), &[(1, false), (3, true)]);
        assert_eq!(t.pending(), None);
        assert_eq!(t.turn_count(), 1);
    }

    #[test]
    fn test_double_suspend_rejected() {
        let mut t = tracker(ScriptedPlanner::default());
        t.suspend_for_draws(1, 4).unwrap();
        let err = t.suspend_for_draws(2, 0).unwrap_err();
        assert!(matches!(err, AdvisorError::ContinuationPending { remaining: 1 }));
        assert_eq!(t.pending(), Some(PendingContinuation::new(1, 4)));
    }

    #[test]
    fn test_catalog_miss_leaves_state() {
        let mut t = tracker(ScriptedPlanner::default());
        start_game(&mut t);
        let err = t.apply(to_friendly("NOPE_001", 10, ZoneKind::Hand)).unwrap_err();
        assert!(matches!(err, AdvisorError::CardNotFound(_)));
        assert!(t.zone(Zone::Hand).is_empty());
        assert_eq!(t.turn_count(), 0);
    }

    #[test]
    fn test_coin_means_going_second() {
        let mut t = tracker(ScriptedPlanner::default());
        start_game(&mut t);
        t.apply(to_friendly("GAME_005", 68, ZoneKind::Hand)).unwrap();
        assert!(!t.players_turn());
        assert!(t.planner().calls.borrow().is_empty());
    }

    #[test]
    fn test_moves_track_instances() {
        let mut t = tracker(ScriptedPlanner::default());
        t.apply(to_friendly("CFM_315", 10, ZoneKind::Hand)).unwrap();
        t.apply(to_friendly("CFM_315", 11, ZoneKind::Hand)).unwrap();
        t.apply(to_friendly("CFM_315", 11, ZoneKind::Play)).unwrap();
        assert_eq!(t.zone(Zone::Hand).len(), 1);
        assert_eq!(t.zone(Zone::Board).len(), 1);

        t.apply(to_friendly("CFM_315", 11, ZoneKind::Graveyard)).unwrap();
        assert!(t.zone(Zone::Board).is_empty());
        assert_eq!(t.zone(Zone::Graveyard).len(), 1);
        assert_eq!(t.zones().friendly_count(), 2);
    }

    #[test]
    fn test_weapon_slot_replaced() {
        let mut t = tracker(ScriptedPlanner::default());
        t.apply(to_friendly("EX1_536", 20, ZoneKind::Play)).unwrap();
        assert!(t.weapon_equipped());
        assert!(t.zone(Zone::Board).is_empty());
        t.apply(to_friendly("EX1_536", 21, ZoneKind::Play)).unwrap();
        assert_eq!(t.zone(Zone::Weapon).len(), 1);
        assert_eq!(t.zone(Zone::Graveyard).len(), 1);
    }

    #[test]
    fn test_opponent_board_and_hand() {
        let mut t = tracker(ScriptedPlanner::default());
        t.apply(ZoneEvent::OpponentHandAdd(None)).unwrap();
        t.apply(ZoneEvent::OpponentHandAdd(None)).unwrap();
        let play = ZoneEvent::transition(
            CardRef::new("CS2_121").with_tag(40),
            None,
            ZoneLocation::opposing(ZoneKind::Play),
        );
        t.apply(play).unwrap();
        assert_eq!(t.opponent_hand_size(), 1);
        assert_eq!(t.snapshot().opponent_board.len(), 1);

        let dies = ZoneEvent::transition(
            CardRef::new("CS2_121").with_tag(40),
            None,
            ZoneLocation::opposing(ZoneKind::Graveyard),
        );
        t.apply(dies).unwrap();
        assert!(t.snapshot().opponent_board.is_empty());
        assert_eq!(t.opponent_hand_size(), 1);
    }

    #[test]
    fn test_bounced_minion_leaves_opponent_board() {
        let mut t = tracker(ScriptedPlanner::default());
        start_game(&mut t);
        let played = "D 19:05:02.1 ZoneChangeList.ProcessChanges() - TRANSITIONING card \
            [entityName=Frostwolf Grunt id=41 zone=PLAY zonePos=1 cardId=CS2_121 player=2] to OPPOSING PLAY";
        let bounced = "D 19:05:40.7 ZoneChangeList.ProcessChanges() - TRANSITIONING card \
            [entityName=Frostwolf Grunt id=41 zone=HAND zonePos=3 cardId=CS2_121 player=2] to OPPOSING HAND";

        t.apply_line(played).unwrap();
        assert_eq!(t.zone(Zone::OpponentBoard).len(), 1);
        assert_eq!(t.opponent_hand_size(), 0);

        t.apply_line(bounced).unwrap();
        assert!(t.zone(Zone::OpponentBoard).is_empty());
        assert!(t.snapshot().opponent_board.is_empty());
        assert_eq!(t.opponent_hand_size(), 1);
        // Bounces happen mid-turn; they are not the opponent's draw
        assert!(t.players_turn());

        // Replaying it later is a fresh copy out of hand
        t.apply_line(played).unwrap();
        assert_eq!(t.zone(Zone::OpponentBoard).len(), 1);
        assert_eq!(t.opponent_hand_size(), 0);
    }

    #[test]
    fn test_damage_directive_and_reset() {
        let mut burn = Plan::new();
        burn.say("Use Quick Shot on the opponent's face.");
        burn.damage_opponent(3);
        let mut t = tracker(ScriptedPlanner::default().then(Ok(burn)));
        start_game(&mut t);
        t.apply(to_friendly("CORE_BRM_013", 10, ZoneKind::Hand)).unwrap();
        assert_eq!(t.opponent_life(), 27);

        t.apply(ZoneEvent::GameEnd(GameOutcome::Victory)).unwrap();
        assert_eq!(t.phase(), GamePhase::Ended);
        assert_eq!(t.opponent_life(), 30);
        assert!(t.zone(Zone::Hand).is_empty());
        assert_eq!(t.last_outcome(), Some(GameOutcome::Victory));
        // Queued advice survives the reset
        assert_eq!(
            t.drain_messages(),
            vec!["Keep your entire opening hand.", "Use Quick Shot on the opponent's face."]
        );
    }

    #[test]
    fn test_ranking_miss_is_counted() {
        let planner = ScriptedPlanner::default().then(Err(AdvisorError::RankingMissing("CFM_315".into())));
        let mut t = tracker(planner);
        start_game(&mut t);
        let err = t.apply(to_friendly("CFM_315", 10, ZoneKind::Hand)).unwrap_err();
        assert!(matches!(err, AdvisorError::RankingMissing(_)));
        assert_eq!(t.invariant_violations(), 1);
        assert_eq!(t.logger().logs().in_category("invariant").count(), 1);
        // The card still landed in hand
        assert_eq!(t.zone(Zone::Hand).len(), 1);
    }

    #[test]
    fn test_malformed_line_dropped() {
        let mut t = tracker(ScriptedPlanner::default());
        let line = "D 12:00:00.0000000 ZoneChangeList.ProcessChanges() - TRANSITIONING card [entityName=Alleycat id=x] to FRIENDLY HAND";
        assert!(t.apply_line(line).is_err());
        assert!(t.zone(Zone::Hand).is_empty());
        assert!(t.apply_line("D 12:00:00.0000000 unrelated noise").is_ok());
    }
}
