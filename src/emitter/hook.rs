use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Description of a registry mutation, delivered to the installed
/// [`ChangeHook`] after the mutation is applied.
///
/// Ineffective operations (clearing an unknown event, unsubscribing a
/// callback that was not registered) produce no change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryChange {
    /// A callback was appended to the named event's sequence.
    Subscribed { event: String },
    /// `removed` entries matching one callback reference were dropped.
    Unsubscribed { event: String, removed: usize },
    /// The named event's entire sequence (`removed` entries) was dropped.
    Cleared { event: String, removed: usize },
    /// Every event name (`events` of them) was dropped from the registry.
    ClearedAll { events: usize },
}

impl RegistryChange {
    /// The event name this change concerns, if it concerns a single event.
    pub fn event(&self) -> Option<&str> {
        match self {
            RegistryChange::Subscribed { event }
            | RegistryChange::Unsubscribed { event, .. }
            | RegistryChange::Cleared { event, .. } => Some(event),
            RegistryChange::ClearedAll { .. } => None,
        }
    }
}

/// Observer notified after each effective registry mutation.
///
/// The hook runs outside the registry lock, so it may call back into the
/// emitter (including mutating the registry) without deadlocking. Hooks are
/// functionally inert to the emitter contract: whatever a hook does, the
/// registry state it was notified about has already been applied.
pub trait ChangeHook: Send + Sync {
    /// Handle a registry change.
    fn on_change(&self, change: &RegistryChange);
}

/// Hook that logs each change at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl ChangeHook for TracingHook {
    fn on_change(&self, change: &RegistryChange) {
        tracing::debug!(?change, "registry changed");
    }
}

/// Hook that forwards owned changes over a channel to async consumers, such
/// as an external reactivity or UI layer.
///
/// A dropped receiver is ignored: the emitter keeps working and the hook
/// silently discards further changes.
///
/// # Example
/// ```
/// use tannoy::{ChannelHook, EventEmitter};
///
/// let (tx, rx) = flume::unbounded();
/// let emitter = EventEmitter::with_change_hook(ChannelHook::new(tx));
/// drop(emitter);
/// assert!(rx.is_empty());
/// ```
pub struct ChannelHook {
    tx: flume::Sender<RegistryChange>,
}

impl ChannelHook {
    pub fn new(tx: flume::Sender<RegistryChange>) -> Self {
        Self { tx }
    }
}

impl ChangeHook for ChannelHook {
    fn on_change(&self, change: &RegistryChange) {
        let _ = self.tx.send(change.clone());
    }
}

/// In-memory hook for tests and snapshots.
#[derive(Clone, Default)]
pub struct MemoryHook {
    entries: Arc<Mutex<Vec<RegistryChange>>>,
}

impl MemoryHook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all recorded changes.
    pub fn snapshot(&self) -> Vec<RegistryChange> {
        self.entries.lock().clone()
    }

    /// Clear all recorded changes.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl ChangeHook for MemoryHook {
    fn on_change(&self, change: &RegistryChange) {
        self.entries.lock().push(change.clone());
    }
}
