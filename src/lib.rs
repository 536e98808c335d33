//! Deck advisor - real-time turn advice for a pre-analyzed constructed deck
//!
//! Follows the game's zone log, reconstructs the visible game state and
//! queues plain-text recommendations for the current turn.

pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod game;
pub mod loader;
pub mod strategy;
pub mod zones;

pub use error::{AdvisorError, Result};
