//! Suspended turn plans
//!
//! A plan that triggers draws stops early and leaves one of these behind.
//! Each resolved draw ticks it down; at zero the tracker re-enters the
//! planner with the saved mana and the "already attacked" flag set.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingContinuation {
    remaining: u8,
    mana: u8,
}

impl PendingContinuation {
    /// `draws` must be non-zero; a zero-draw suspension is never stored
    pub fn new(draws: u8, mana: u8) -> Self {
        debug_assert!(draws > 0);
        PendingContinuation { remaining: draws, mana }
    }

    /// Draws still outstanding
    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    /// Mana that was left when planning stopped
    pub fn mana(&self) -> u8 {
        self.mana
    }

    /// Count one draw; true once every expected draw has arrived
    pub fn resolve_draw(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}
