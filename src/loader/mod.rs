//! Card catalog and deck loaders

pub mod card;
pub mod catalog;
pub mod deck;

pub use card::CardLoader;
pub use catalog::{CachedCatalog, CardCatalog, DirectoryCatalog, JsonCatalog};
pub use deck::{DeckEntry, DeckList, DeckLoader, DECK_SIZE};
