//! Card catalog: lookup of static card attributes by card id
//!
//! Provides a synchronous `CardCatalog` trait plus two backends:
//! 1. `JsonCatalog`: every card loaded upfront from one JSON array file
//! 2. `DirectoryCatalog`: one `<CARD_ID>.json` per card, read on demand
//!
//! `CachedCatalog` sits in front of either and keeps every definition it has
//! seen for the lifetime of the process.

use crate::core::{CardDefinition, CardId};
use crate::loader::card::CardLoader;
use crate::{AdvisorError, Result};
use rustc_hash::FxHashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Source of card definitions
pub trait CardCatalog {
    /// Look up one card. `CardNotFound` is permanent; I/O and fetch failures may be retried.
    fn lookup(&self, card_id: &CardId) -> Result<CardDefinition>;
}

impl<C: CardCatalog + ?Sized> CardCatalog for Box<C> {
    fn lookup(&self, card_id: &CardId) -> Result<CardDefinition> {
        (**self).lookup(card_id)
    }
}

impl<C: CardCatalog + ?Sized> CardCatalog for &C {
    fn lookup(&self, card_id: &CardId) -> Result<CardDefinition> {
        (**self).lookup(card_id)
    }
}

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    cards: HashMap<CardId, CardDefinition>,
}

impl JsonCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every card from a JSON array file
    pub fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AdvisorError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Card catalog not found: {path:?}"),
            )));
        }
        Ok(Self::from_cards(CardLoader::load_file(path)?))
    }

    pub fn from_cards(cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut catalog = JsonCatalog::new();
        for card in cards {
            catalog.add_card(card);
        }
        catalog
    }

    /// Add a single card definition
    pub fn add_card(&mut self, card: CardDefinition) {
        self.cards.insert(card.card_id.clone(), card);
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.cards.contains_key(card_id)
    }

    /// Total number of cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardCatalog for JsonCatalog {
    fn lookup(&self, card_id: &CardId) -> Result<CardDefinition> {
        self.cards
            .get(card_id)
            .cloned()
            .ok_or_else(|| AdvisorError::CardNotFound(card_id.to_string()))
    }
}

/// Catalog backed by a directory of per-card JSON files
///
/// "EX1_539" -> "<root>/EX1_539.json". Card ids are restricted to
/// `[A-Za-z0-9_]` so a hostile log line cannot escape the directory.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    root: PathBuf,
}

impl DirectoryCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryCatalog { root: root.into() }
    }

    fn card_path(&self, card_id: &CardId) -> Option<PathBuf> {
        let id = card_id.as_str();
        let valid = !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        valid.then(|| self.root.join(format!("{id}.json")))
    }
}

impl CardCatalog for DirectoryCatalog {
    fn lookup(&self, card_id: &CardId) -> Result<CardDefinition> {
        let path = self
            .card_path(card_id)
            .ok_or_else(|| AdvisorError::CardNotFound(card_id.to_string()))?;

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AdvisorError::CardNotFound(card_id.to_string()))
            }
            Err(e) => return Err(AdvisorError::IoError(e)),
        };

        let def = CardLoader::parse_one(&content).map_err(|e| AdvisorError::CatalogFetch {
            card_id: card_id.to_string(),
            reason: e.to_string(),
        })?;

        if &def.card_id != card_id {
            return Err(AdvisorError::InvalidCardFormat(format!(
                "{} contains card {} instead",
                path.display(),
                def.card_id
            )));
        }
        Ok(def)
    }
}

/// Caching front for any catalog
///
/// Definitions are static, so the cache is never invalidated. Transient
/// failures are retried up to `retries` extra times; misses are not.
pub struct CachedCatalog<C> {
    inner: C,
    cache: FxHashMap<CardId, Arc<CardDefinition>>,
    retries: u32,
}

impl<C: CardCatalog> CachedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self::with_retries(inner, 0)
    }

    pub fn with_retries(inner: C, retries: u32) -> Self {
        CachedCatalog {
            inner,
            cache: FxHashMap::default(),
            retries,
        }
    }

    /// Cached lookup
    pub fn get(&mut self, card_id: &CardId) -> Result<Arc<CardDefinition>> {
        if let Some(card) = self.cache.get(card_id) {
            return Ok(Arc::clone(card));
        }

        let mut attempt = 0;
        let def = loop {
            match self.inner.lookup(card_id) {
                Ok(def) => break def,
                Err(e) if e.is_transient() && attempt < self.retries => attempt += 1,
                Err(e) => return Err(e),
            }
        };

        let card = Arc::new(def);
        self.cache.insert(card_id.clone(), Arc::clone(&card));
        Ok(card)
    }

    /// Fetch a list of cards upfront, failing on the first miss
    pub fn preload<'a>(&mut self, ids: impl IntoIterator<Item = &'a CardId>) -> Result<Vec<Arc<CardDefinition>>> {
        ids.into_iter().map(|id| self.get(id)).collect()
    }

    /// Peek at the cache without touching the backend
    pub fn cached(&self, card_id: &CardId) -> Option<Arc<CardDefinition>> {
        self.cache.get(card_id).cloned()
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}
