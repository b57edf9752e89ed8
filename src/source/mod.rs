//! External value sources
//!
//! A [`ValueSource`] publishes a scalar reading and notifies subscribers when
//! it changes. Notifications may arrive on any thread; consumers must not
//! touch UI state from inside a listener.

pub mod simulated;

pub use simulated::{SimulatedPowerSource, SimulationSettings};

use crate::error::SourceError;
use std::fmt;
use std::sync::Arc;

/// Callback invoked when a source has a new reading
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`ValueSource::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Trait for a source of gauge readings
///
/// Implemented by the simulated power source and by test mocks.
pub trait ValueSource: Send + Sync {
    /// Latest reading
    fn value(&self) -> Result<i32, SourceError>;

    /// Smallest reading the source can produce
    fn min_value(&self) -> Result<i32, SourceError>;

    /// Largest reading the source can produce
    fn max_value(&self) -> Result<i32, SourceError>;

    /// Register a listener called after every new reading
    fn subscribe(&self, listener: Listener) -> SubscriptionId;

    /// Remove a listener; unknown ids are ignored
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Listener bookkeeping shared by source implementations
#[derive(Default)]
pub struct ListenerSet {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, listener));
        id
    }

    /// Returns whether `id` was registered
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the listeners, so they can be called without holding a lock
    pub fn snapshot(&self) -> Vec<Listener> {
        self.entries.iter().map(|(_, l)| Arc::clone(l)).collect()
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_ids_are_unique() {
        let mut set = ListenerSet::new();
        let a = set.insert(Arc::new(|| {}));
        let b = set.insert(Arc::new(|| {}));
        assert_ne!(a, b);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut set = ListenerSet::new();
        let id = set.insert(Arc::new(|| {}));
        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert!(set.is_empty());
    }

    #[test]
    fn test_snapshot_calls_each_listener() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut set = ListenerSet::new();
        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            set.insert(Arc::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            }));
        }
        for listener in set.snapshot() {
            listener();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
