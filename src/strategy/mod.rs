//! Deck-specific planning
//!
//! `archetype` holds the data tables; `combo`, `removal` and `combat` are the
//! small drivers that read them; `engine` strings everything together behind
//! the `Planner` trait the tracker calls.

pub mod archetype;
pub mod combat;
pub mod combo;
pub mod engine;
pub mod mulligan;
pub mod planner;
pub mod rankings;
pub mod removal;

pub use archetype::{Archetype, Delivery, BEAST_HUNTER};
pub use combat::TradePolicy;
pub use combo::{damage_from_hand, greedy_combo, Combo, ComboPick, DamageContext};
pub use engine::StrategyEngine;
pub use mulligan::select_mulligan;
pub use planner::{Directive, Plan, PlanView, Planner};
pub use rankings::CardRankings;
pub use removal::kill_from_hand;
