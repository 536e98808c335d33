//! Core types: card identifiers, definitions and play-instance handles

pub mod card;
pub mod entity;
pub mod types;

pub use card::{CardCategory, CardDefinition};
pub use entity::{CardInstance, InstanceId, InstanceStore};
pub use types::{CardId, EntityTag};
