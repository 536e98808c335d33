//! Outbound advice queue

use std::collections::VecDeque;

/// FIFO of human-readable recommendations
///
/// Messages are never retracted once queued; the consumer drains them.
#[derive(Debug, Clone, Default)]
pub struct MessageQueue {
    messages: VecDeque<String>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push_back(message.into());
    }

    pub fn has_message(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Remove and return the oldest message
    pub fn next_message(&mut self) -> Option<String> {
        self.messages.pop_front()
    }

    /// Take everything queued so far, oldest first
    pub fn drain(&mut self) -> Vec<String> {
        self.messages.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
