//! Turn planner for a single archetype
//!
//! A plan runs in four stages on a private copy of the snapshot:
//! combat (taunts, value trades, face), the draw engine, board development
//! with a burn fallback, and the terminal hero power / pass. Any stage that
//! triggers draws ends the pass with a suspend directive; the tracker resumes
//! it with `already_attacked` set once the draws resolve.

use crate::config::AdvisorConfig;
use crate::core::CardDefinition;
use crate::game::snapshot::CardRefs;
use crate::game::AdvisorLogger;
use crate::loader::DeckList;
use crate::strategy::archetype::{Archetype, Delivery, DrawTrigger};
use crate::strategy::combat::{assign_attackers, value_trade_target, TradePolicy};
use crate::strategy::combo::{damage_from_hand, greedy_combo, race_present, ComboPick, DamageContext};
use crate::strategy::mulligan::select_mulligan;
use crate::strategy::planner::{Plan, PlanView, Planner};
use crate::strategy::rankings::CardRankings;
use crate::strategy::removal::kill_from_hand;
use crate::Result;
use std::fmt;
use std::sync::Arc;

/// Verbose planner tracing, compiled out without the `verbose-logging` feature
macro_rules! log_if_verbose {
    ($logger:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$logger;
        }
    };
}

/// Who an attack or spell is aimed at
enum Target<'a> {
    Face,
    Minion(&'a str),
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Face => write!(f, "the opponent's face"),
            Target::Minion(name) => write!(f, "the opponent's {name}"),
        }
    }
}

#[derive(Debug, Clone)]
struct BoardSlot {
    card: Arc<CardDefinition>,
    exhausted: bool,
    dead: bool,
}

impl BoardSlot {
    fn new(card: Arc<CardDefinition>, exhausted: bool) -> Self {
        BoardSlot {
            card,
            exhausted,
            dead: false,
        }
    }
}

/// Working copy of the zones for one planning pass
#[derive(Debug, Clone)]
struct TurnState {
    hand: CardRefs,
    board: Vec<BoardSlot>,
    secrets: CardRefs,
    enemies: CardRefs,
    weapon: Option<Arc<CardDefinition>>,
    mana: u8,
    hero_attacked: bool,
    /// Freshly played qualifying minions may attack
    charge: bool,
    draws: u8,
    plan: Plan,
}

impl TurnState {
    fn board_count(&self) -> usize {
        self.board.iter().filter(|s| !s.dead).count()
    }

    fn has_live_taunt(&self) -> bool {
        self.enemies.iter().any(|e| e.has_taunt())
    }

    /// Index of the taunt with the most health; the first one wins a tie
    fn strongest_taunt(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, enemy) in self.enemies.iter().enumerate() {
            if !enemy.has_taunt() {
                continue;
            }
            match best {
                Some(b) if self.enemies[b].health >= enemy.health => {}
                _ => best = Some(i),
            }
        }
        best
    }

    fn take_from_hand(&mut self, index: usize) -> Arc<CardDefinition> {
        let card = self.hand.remove(index);
        self.mana = self.mana.saturating_sub(card.cost);
        card
    }

    /// Mark an attacker as spent; it dies if the defender hits back hard enough
    fn strike(&mut self, index: usize, defender_attack: u8) {
        let slot = &mut self.board[index];
        slot.exhausted = true;
        if defender_attack >= slot.card.health {
            slot.dead = true;
        }
    }

    fn bury(&mut self) {
        self.board.retain(|s| !s.dead);
    }

    fn into_plan(mut self) -> Plan {
        if self.draws > 0 {
            self.plan.suspend(self.draws, self.mana);
        }
        self.plan
    }
}

/// Heuristic planner driven by an `Archetype` table
#[derive(Debug, Clone)]
pub struct StrategyEngine {
    archetype: &'static Archetype,
    rankings: CardRankings,
    trade_policy: TradePolicy,
    hero_power_cost: u8,
    max_board_size: usize,
}

impl StrategyEngine {
    pub fn new(archetype: &'static Archetype, rankings: CardRankings) -> Self {
        let defaults = AdvisorConfig::default();
        StrategyEngine {
            archetype,
            rankings,
            trade_policy: defaults.trade_policy,
            hero_power_cost: defaults.hero_power_cost,
            max_board_size: defaults.max_board_size,
        }
    }

    /// Engine for a deck list; fails if any deck card has no tier
    pub fn for_deck(archetype: &'static Archetype, deck: &DeckList) -> Result<Self> {
        Ok(Self::new(archetype, CardRankings::from_deck(deck, archetype)?))
    }

    pub fn with_config(mut self, config: &AdvisorConfig) -> Self {
        self.trade_policy = config.trade_policy;
        self.hero_power_cost = config.hero_power_cost;
        self.max_board_size = config.max_board_size;
        self
    }

    pub fn with_trade_policy(mut self, policy: TradePolicy) -> Self {
        self.trade_policy = policy;
        self
    }

    pub fn archetype(&self) -> &'static Archetype {
        self.archetype
    }

    pub fn rankings(&self) -> &CardRankings {
        &self.rankings
    }

    pub fn trade_policy(&self) -> TradePolicy {
        self.trade_policy
    }

    /// A resumed pass starts with the hero's attack already spent
    fn start_turn(&self, view: &PlanView<'_>, mana: u8, already_attacked: bool) -> TurnState {
        let snapshot = view.snapshot();
        let board: Vec<BoardSlot> = snapshot
            .board
            .iter()
            .map(|c| BoardSlot::new(Arc::clone(c), false))
            .collect();
        let charge = board.iter().any(|s| self.archetype.is_charge_enabler(&s.card));
        TurnState {
            hand: snapshot.hand.clone(),
            board,
            secrets: snapshot.secrets.clone(),
            enemies: snapshot.opponent_board.clone(),
            weapon: snapshot.weapon.clone(),
            mana,
            hero_attacked: already_attacked,
            charge,
            draws: 0,
            plan: Plan::new(),
        }
    }

    fn damage_context(&self, turn: &TurnState, allow_attacks: bool) -> DamageContext {
        let board: Vec<Arc<CardDefinition>> = turn.board.iter().filter(|s| !s.dead).map(|s| Arc::clone(&s.card)).collect();
        DamageContext {
            race_present: race_present(self.archetype, &turn.hand, &board),
            allow_attacks,
            board_space: turn.board_count() < self.max_board_size,
            hero_can_attack: !turn.hero_attacked,
        }
    }

    /// Whether `candidate` beats `current`: higher cost, then lower tier
    fn prefer(&self, candidate: &CardDefinition, current: &CardDefinition) -> Result<bool> {
        if candidate.cost != current.cost {
            return Ok(candidate.cost > current.cost);
        }
        if candidate.card_id == current.card_id {
            return Ok(false);
        }
        Ok(self.rankings.rank(&candidate.card_id)? < self.rankings.rank(&current.card_id)?)
    }

    /// Draws caused by `card` leaving the hand and resolving
    fn draws_for(&self, turn: &TurnState, card: &CardDefinition) -> u8 {
        let mut draws = match self.archetype.draw_trigger(card.card_id.as_str()) {
            Some(DrawTrigger::Fixed(n)) => n,
            Some(DrawTrigger::IfHandEmpty(n)) if turn.hand.is_empty() => n,
            _ => 0,
        };
        if let Some(enabler) = self.archetype.draw_enabler {
            if self.archetype.is_qualifying(card) {
                let engines = turn
                    .board
                    .iter()
                    .filter(|s| !s.dead && s.card.card_id == enabler.card_id)
                    .count();
                let engines = u8::try_from(engines).unwrap_or(u8::MAX);
                draws = draws.saturating_add(engines.saturating_mul(enabler.draws_per_summon));
            }
        }
        draws
    }

    /// Commit one damage card from a combo against `target`
    fn deliver(&self, turn: &mut TurnState, pick: &ComboPick, target: &Target<'_>) {
        let Some(index) = turn.hand.iter().position(|c| Arc::ptr_eq(c, &pick.card)) else {
            return;
        };
        let card = turn.take_from_hand(index);
        let draws = self.draws_for(turn, &card);
        turn.draws = turn.draws.saturating_add(draws);

        match pick.delivery {
            Delivery::Spell => {
                turn.plan.say(format!("Use {} on {target}.", card.name));
            }
            Delivery::Weapon => {
                turn.plan.say(format!("Equip {}.", card.name));
                turn.plan.say(format!("Attack {target} with your {}.", card.name));
                turn.hero_attacked = true;
                turn.weapon = Some(card);
            }
            Delivery::Charge => {
                turn.plan.say(format!("Play {}.", card.name));
                turn.plan.say(format!("Attack {target} with your {}.", card.name));
                if self.archetype.is_charge_enabler(&card) {
                    turn.charge = true;
                }
                turn.board.push(BoardSlot::new(card, true));
            }
        }

        if matches!(target, Target::Face) {
            turn.plan.damage_opponent(pick.damage);
        }
    }

    /// Play a card from hand as board development
    fn play_from_hand(&self, turn: &mut TurnState, index: usize) {
        let card = turn.take_from_hand(index);
        let draws = self.draws_for(turn, &card);
        turn.draws = turn.draws.saturating_add(draws);
        turn.plan.say(format!("Play {}.", card.name));

        if card.is_minion() {
            if self.archetype.is_charge_enabler(&card) {
                turn.charge = true;
            }
            if turn.charge && self.archetype.is_qualifying(&card) && card.attack > 0 && !turn.has_live_taunt() {
                turn.plan.say(format!("Attack {} with your {}.", Target::Face, card.name));
                turn.plan.damage_opponent(u32::from(card.attack));
            }
            turn.board.push(BoardSlot::new(card, true));
        } else if card.is_weapon() {
            turn.weapon = Some(card);
        } else if card.has_secret() {
            turn.secrets.push(card);
        }
    }

    /// Spend hand damage on taunts, strongest first, while removal sizing finds a kill
    fn burn_taunts(&self, turn: &mut TurnState, logger: &AdvisorLogger) {
        let taunt_health: u32 = turn
            .enemies
            .iter()
            .filter(|e| e.has_taunt())
            .map(|e| u32::from(e.health))
            .sum();
        if taunt_health == 0 {
            return;
        }
        let available = damage_from_hand(self.archetype, &turn.hand, turn.mana, self.damage_context(turn, true));
        if available < taunt_health {
            log_if_verbose!(logger, "hand damage {available} short of taunt health {taunt_health}");
            return;
        }

        while let Some(t) = turn.strongest_taunt() {
            let taunt = Arc::clone(&turn.enemies[t]);
            let ctx = self.damage_context(turn, true);
            let combo = kill_from_hand(self.archetype, &turn.hand, u32::from(taunt.health), turn.mana, ctx);
            if combo.is_empty() {
                break;
            }
            logger.plan_choice(
                self.name(),
                &format!("removing {} with {}", taunt.name, combo.card_names().join(" + ")),
            );
            for pick in &combo.picks {
                self.deliver(turn, pick, &Target::Minion(&taunt.name));
            }
            turn.enemies.remove(t);
        }
    }

    /// Clear every remaining taunt with hand damage plus board attacks
    ///
    /// Returns false, possibly leaving `turn` half-updated, if some taunt
    /// cannot be cleared. Callers run it on a copy.
    fn clear_taunts_with_board(&self, turn: &mut TurnState) -> bool {
        while let Some(t) = turn.strongest_taunt() {
            let taunt = Arc::clone(&turn.enemies[t]);
            let health = u32::from(taunt.health);
            let ctx = self.damage_context(turn, true);
            let combo = greedy_combo(self.archetype, &turn.hand, turn.mana, ctx, Some(health));
            let remaining = health.saturating_sub(combo.total);

            let attackers = {
                let candidates: Vec<(usize, &CardDefinition)> = turn
                    .board
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| !s.exhausted && !s.dead && s.card.attack > 0)
                    .map(|(i, s)| (i, &*s.card))
                    .collect();
                assign_attackers(&candidates, remaining, taunt.attack)
            };
            let Some(attackers) = attackers else {
                return false;
            };

            for pick in &combo.picks {
                self.deliver(turn, pick, &Target::Minion(&taunt.name));
            }
            for index in attackers {
                let name = turn.board[index].card.name.clone();
                turn.plan.say(format!("Attack the opponent's {} with your {name}.", taunt.name));
                turn.strike(index, taunt.attack);
            }
            turn.enemies.remove(t);
        }
        true
    }

    /// Every ready minion trades into its best value target, or goes face
    ///
    /// While a taunt is alive only taunts are legal targets and nothing goes face.
    fn trade_or_face(&self, turn: &mut TurnState, logger: &AdvisorLogger) {
        for index in 0..turn.board.len() {
            let slot = &turn.board[index];
            if slot.exhausted || slot.dead || slot.card.attack == 0 {
                continue;
            }
            let attacker = Arc::clone(&slot.card);
            let taunted = turn.has_live_taunt();

            match value_trade_target(self.trade_policy, &attacker, &turn.enemies, |e| !taunted || e.has_taunt()) {
                Some(t) => {
                    let enemy = turn.enemies.remove(t);
                    logger.plan_choice(
                        self.name(),
                        &format!("value trade {} into {} ({})", attacker.name, enemy.name, self.trade_policy),
                    );
                    turn.plan.say(format!("Attack the opponent's {} with your {}.", enemy.name, attacker.name));
                    turn.strike(index, enemy.attack);
                }
                None if !taunted => {
                    turn.plan.say(format!("Attack {} with your {}.", Target::Face, attacker.name));
                    turn.plan.damage_opponent(u32::from(attacker.attack));
                    turn.board[index].exhausted = true;
                }
                None => {}
            }
        }
    }

    fn resolve_combat(&self, turn: &mut TurnState, logger: &AdvisorLogger) {
        self.burn_taunts(turn, logger);

        if turn.has_live_taunt() {
            let mut trial = turn.clone();
            if self.clear_taunts_with_board(&mut trial) {
                *turn = trial;
            } else {
                log_if_verbose!(logger, "taunt cannot be cleared this turn");
            }
        }

        self.trade_or_face(turn, logger);

        if !turn.has_live_taunt() && !turn.hero_attacked {
            if let Some(weapon) = turn.weapon.clone().filter(|w| w.attack > 0) {
                turn.plan.say(format!("Attack {} with your {}.", Target::Face, weapon.name));
                turn.plan.damage_opponent(u32::from(weapon.attack));
                turn.hero_attacked = true;
            }
        }

        turn.bury();
    }

    /// Play the draw enabler plus the best qualifying minion behind it
    fn try_draw_engine(&self, turn: &mut TurnState, logger: &AdvisorLogger) -> Result<bool> {
        let Some(enabler) = self.archetype.draw_enabler else {
            return Ok(false);
        };
        let board = turn.board_count();
        if board > enabler.max_board
            || board + 2 > self.max_board_size
            || turn.mana < enabler.min_mana
            || turn.hand.len() > enabler.max_hand
        {
            return Ok(false);
        }
        let Some(e) = turn
            .hand
            .iter()
            .position(|c| c.card_id == enabler.card_id && c.cost <= turn.mana)
        else {
            return Ok(false);
        };

        let budget = turn.mana - turn.hand[e].cost;
        let mut best: Option<usize> = None;
        for (i, card) in turn.hand.iter().enumerate() {
            if i == e || !self.archetype.is_qualifying(card) || card.cost > budget {
                continue;
            }
            best = match best {
                Some(b) if !self.prefer(card, &turn.hand[b])? => Some(b),
                _ => Some(i),
            };
        }
        let Some(b) = best else {
            return Ok(false);
        };

        logger.plan_choice(
            self.name(),
            &format!("draw engine: {} then {}", turn.hand[e].name, turn.hand[b].name),
        );
        self.play_from_hand(turn, e);
        self.play_from_hand(turn, if b > e { b - 1 } else { b });
        Ok(true)
    }

    fn is_playable(&self, turn: &TurnState, card: &CardDefinition) -> bool {
        if card.cost == 0 || card.cost > turn.mana {
            return false;
        }
        if card.is_minion() {
            return turn.board_count() < self.max_board_size;
        }
        !card.is_hero()
            && !self.archetype.is_damage_source(card.card_id.as_str())
            && !(card.has_secret() && turn.secrets.iter().any(|s| s.card_id == card.card_id))
    }

    fn best_playable(&self, turn: &TurnState) -> Result<Option<usize>> {
        let mut best: Option<usize> = None;
        for (i, card) in turn.hand.iter().enumerate() {
            if !self.is_playable(turn, card) {
                continue;
            }
            best = match best {
                Some(b) if !self.prefer(card, &turn.hand[b])? => Some(b),
                _ => Some(i),
            };
        }
        Ok(best)
    }

    /// Spend mana on the most expensive cards; burn face once nothing else fits
    fn develop(&self, turn: &mut TurnState, logger: &AdvisorLogger) -> Result<()> {
        while turn.mana > 0 {
            if let Some(index) = self.best_playable(turn)? {
                self.play_from_hand(turn, index);
                if turn.draws > 0 {
                    return Ok(());
                }
                continue;
            }

            let ctx = self.damage_context(turn, !turn.has_live_taunt());
            let combo = greedy_combo(self.archetype, &turn.hand, turn.mana, ctx, None);
            if !combo.is_empty() {
                logger.plan_choice(
                    self.name(),
                    &format!("burn face for {} with {}", combo.total, combo.card_names().join(" + ")),
                );
                for pick in &combo.picks {
                    self.deliver(turn, pick, &Target::Face);
                }
            }
            break;
        }
        Ok(())
    }
}

impl Planner for StrategyEngine {
    fn name(&self) -> &str {
        self.archetype.name
    }

    fn plan_mulligan(&self, view: &PlanView<'_>) -> Result<Plan> {
        let hand = &view.snapshot().hand;
        let marked = select_mulligan(hand, &self.rankings)?;

        let mut plan = Plan::new();
        if marked.is_empty() {
            plan.say("Keep your entire opening hand.");
        } else {
            for &index in &marked {
                plan.say(format!("Mulligan {} away.", hand[index].name));
            }
            plan.say("Mulligan complete.");
        }
        view.logger()
            .plan_choice(self.name(), &format!("mulligan {} of {} cards", marked.len(), hand.len()));
        Ok(plan)
    }

    fn plan_turn(&self, view: &PlanView<'_>, mana: u8, already_attacked: bool) -> Result<Plan> {
        let logger = view.logger();
        let mut turn = self.start_turn(view, mana, already_attacked);
        log_if_verbose!(
            logger,
            "planning with {mana} mana, hand {}, board {}, enemies {}",
            turn.hand.len(),
            turn.board.len(),
            turn.enemies.len()
        );

        if !already_attacked {
            self.resolve_combat(&mut turn, logger);
            if turn.draws > 0 {
                return Ok(turn.into_plan());
            }
        }

        if self.try_draw_engine(&mut turn, logger)? || turn.draws > 0 {
            return Ok(turn.into_plan());
        }

        self.develop(&mut turn, logger)?;
        if turn.draws > 0 {
            return Ok(turn.into_plan());
        }

        if turn.mana >= self.hero_power_cost {
            turn.mana -= self.hero_power_cost;
            turn.plan.say("Use your hero power.");
        }
        turn.plan.say("Pass the turn.");
        Ok(turn.into_plan())
    }
}
