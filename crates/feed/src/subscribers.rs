//! Subscriber registry with snapshot-before-dispatch fan-out

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use eterna_core::UpdateEvent;

/// Callback invoked for every event delivered to a subscriber.
pub type UpdateHandler = Arc<dyn Fn(UpdateEvent) + Send + Sync>;

/// Registry of live subscribers.
///
/// Dispatch iterates a snapshot of the current handlers, so a
/// subscribe or unsubscribe racing a dispatch never corrupts the
/// iteration; the racing handler either sees the in-flight event in
/// full or not at all.
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    handlers: Arc<DashMap<u64, UpdateHandler>>,
    next_id: AtomicU64,
}

impl SubscriberRegistry {
    pub fn subscribe(&self, handler: UpdateHandler) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.insert(id, handler);
        Subscription {
            id,
            handlers: Arc::downgrade(&self.handlers),
        }
    }

    pub fn dispatch(&self, event: &UpdateEvent) {
        let targets: Vec<UpdateHandler> = self
            .handlers
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        for handler in targets {
            handler(event.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }
}

/// Handle deregistering exactly one subscriber.
///
/// Unsubscribing twice, or after the feed itself is gone, is a no-op.
pub struct Subscription {
    id: u64,
    handlers: Weak<DashMap<u64, UpdateHandler>>,
}

impl Subscription {
    pub fn unsubscribe(&self) {
        if let Some(handlers) = self.handlers.upgrade() {
            handlers.remove(&self.id);
        }
    }
}
