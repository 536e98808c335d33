//! Per-game state: the zone tracker and what it hands to the planner

pub mod continuation;
pub mod logger;
pub mod messages;
pub mod phase;
pub mod snapshot;
pub mod tracker;

pub use continuation::PendingContinuation;
pub use logger::{AdvisorLogger, LogEntry, OutputMode, VerbosityLevel};
pub use messages::MessageQueue;
pub use phase::GamePhase;
pub use snapshot::{CardRefs, ZoneSnapshot};
pub use tracker::ZoneTracker;
