//! Planner trait and plan output
//!
//! The tracker owns all state. A planner gets a read-only `PlanView` and
//! answers with a `Plan`: advice text plus directives the tracker applies
//! afterwards. Planners never reach back into the tracker.

use crate::game::{AdvisorLogger, ZoneSnapshot};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Read-only view of the tracked game for one planning pass
pub struct PlanView<'a> {
    snapshot: &'a ZoneSnapshot,
    logger: &'a AdvisorLogger,
}

impl<'a> PlanView<'a> {
    pub fn new(snapshot: &'a ZoneSnapshot, logger: &'a AdvisorLogger) -> Self {
        PlanView { snapshot, logger }
    }

    pub fn snapshot(&self) -> &'a ZoneSnapshot {
        self.snapshot
    }

    pub fn logger(&self) -> &'a AdvisorLogger {
        self.logger
    }
}

/// State change requested by a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Damage the advice sends at the opponent's hero
    DamageOpponent(u32),
    /// Stop planning until `draws` more draws resolve, then resume with `mana`
    SuspendForDraws { draws: u8, mana: u8 },
}

/// Output of one planning pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub messages: Vec<String>,
    pub directives: Vec<Directive>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn damage_opponent(&mut self, amount: u32) {
        if amount > 0 {
            self.directives.push(Directive::DamageOpponent(amount));
        }
    }

    pub fn suspend(&mut self, draws: u8, mana: u8) {
        self.directives.push(Directive::SuspendForDraws { draws, mana });
    }

    pub fn is_suspended(&self) -> bool {
        self.directives
            .iter()
            .any(|d| matches!(d, Directive::SuspendForDraws { .. }))
    }

    /// Sum of all `DamageOpponent` directives
    pub fn face_damage(&self) -> u32 {
        self.directives
            .iter()
            .map(|d| match d {
                Directive::DamageOpponent(n) => *n,
                Directive::SuspendForDraws { .. } => 0,
            })
            .sum()
    }
}

/// A deck-specific advisor
///
/// Called by the tracker at its trigger points. Implementations must be
/// deterministic for a given view.
pub trait Planner {
    /// Short name used in log entries
    fn name(&self) -> &str;

    /// Advice for the opening hand in `view.snapshot().hand`
    fn plan_mulligan(&self, view: &PlanView<'_>) -> Result<Plan>;

    /// Advice for a fresh turn, or for the rest of a suspended one
    fn plan_turn(&self, view: &PlanView<'_>, mana: u8, already_attacked: bool) -> Result<Plan>;
}

impl<P: Planner + ?Sized> Planner for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn plan_mulligan(&self, view: &PlanView<'_>) -> Result<Plan> {
        (**self).plan_mulligan(view)
    }

    fn plan_turn(&self, view: &PlanView<'_>, mana: u8, already_attacked: bool) -> Result<Plan> {
        (**self).plan_turn(view, mana, already_attacked)
    }
}
