//! Operational message sinks.
//!
//! `HeroClient` reports every completed call as one human-readable line
//! through a `Notifier`. Delivery is fire-and-forget: `add` returns nothing
//! and must never panic or block for long.

use std::sync::{Mutex, PoisonError};

/// Receives operational messages from `HeroClient`.
pub trait Notifier: Send + Sync {
    fn add(&self, message: String);
}

/// In-memory, ordered message log for display in a UI panel.
#[derive(Debug, Default)]
pub struct MessageService {
    messages: Mutex<Vec<String>>,
}

impl MessageService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for MessageService {
    fn add(&self, message: String) {
        // A poisoned lock still holds a usable Vec; keep recording.
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message);
    }
}

/// Forwards every message to `tracing` at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn add(&self, message: String) {
        tracing::info!(target: "hero_core::messages", "{message}");
    }
}
