//! Play-instance handles
//!
//! Every copy of a card the tracker knows about gets its own `InstanceId`.
//! Zones hold these handles, never card definitions, so two copies of the
//! same card stay distinguishable.

use crate::core::{CardDefinition, EntityTag};
use crate::{AdvisorError, Result};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Simple integer handle for one tracked copy of a card
///
/// IDs are contiguous within a game and never reused until the store is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u32);

impl InstanceId {
    pub fn new(id: u32) -> Self {
        InstanceId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One tracked copy of a card
#[derive(Debug, Clone)]
pub struct CardInstance {
    pub id: InstanceId,
    /// Shared immutable definition from the catalog
    pub card: Arc<CardDefinition>,
    /// Entity number from the log, when the log line carried one
    pub tag: Option<EntityTag>,
}

/// Arena of card instances for the current game
///
/// Uses FxHashMap for fast hashing of integer keys. A second index maps log
/// entity tags back to instances.
#[derive(Debug, Clone, Default)]
pub struct InstanceStore {
    instances: FxHashMap<InstanceId, CardInstance>,
    by_tag: FxHashMap<EntityTag, InstanceId>,
    next_id: u32,
}

impl InstanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new instance and return its handle
    pub fn create(&mut self, card: Arc<CardDefinition>, tag: Option<EntityTag>) -> InstanceId {
        let id = InstanceId::new(self.next_id);
        self.next_id += 1;
        if let Some(tag) = tag {
            self.by_tag.insert(tag, id);
        }
        self.instances.insert(id, CardInstance { id, card, tag });
        id
    }

    pub fn get(&self, id: InstanceId) -> Result<&CardInstance> {
        self.instances
            .get(&id)
            .ok_or_else(|| AdvisorError::MalformedEvent(format!("unknown instance {id}")))
    }

    /// Definition behind a handle, if the handle is live
    pub fn card(&self, id: InstanceId) -> Option<&Arc<CardDefinition>> {
        self.instances.get(&id).map(|inst| &inst.card)
    }

    pub fn find_by_tag(&self, tag: EntityTag) -> Option<InstanceId> {
        self.by_tag.get(&tag).copied()
    }

    /// Forget an instance (e.g. shuffled back into the deck)
    pub fn remove(&mut self, id: InstanceId) -> Option<CardInstance> {
        let removed = self.instances.remove(&id)?;
        if let Some(tag) = removed.tag {
            self.by_tag.remove(&tag);
        }
        Some(removed)
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.instances.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Drop every instance and restart numbering
    pub fn clear(&mut self) {
        self.instances.clear();
        self.by_tag.clear();
        self.next_id = 0;
    }
}
