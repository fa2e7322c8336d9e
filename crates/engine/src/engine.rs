//! Orchestrator lifecycle and command surface

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::{info, warn};

use eterna_core::{
    EngineConfig, FilterUpdate, SortConfig, SortDirection, SortKey, StoreError, Token, UpdateEvent,
};
use eterna_feed::{SimulatedFeed, Subscription};
use eterna_store::{StoreSnapshot, StoreStats, TokenStore};

/// Everything created by `initialize`, torn down as a unit.
struct Wiring {
    feed: SimulatedFeed,
    subscription: Subscription,
    consumer: JoinHandle<()>,
}

/// Orchestrator owning the store and the live-update wiring.
///
/// Commands and feed events all funnel into the store's serialized
/// mutation surface; the read side only ever sees complete snapshots.
pub struct TokenEngine {
    config: EngineConfig,
    store: Arc<TokenStore>,
    wiring: Mutex<Option<Wiring>>,
}

impl TokenEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            store: Arc::new(TokenStore::new()),
            wiring: Mutex::new(None),
        }
    }

    /// Load the initial universe and begin live updates.
    ///
    /// A universe violating id uniqueness is an upstream failure: it is
    /// surfaced through the snapshot's `error` field and live updates
    /// are not started. Re-initializing replaces any previous wiring
    /// wholesale.
    pub fn initialize(&self, universe: Vec<Token>) {
        self.teardown();

        if let Some(id) = first_duplicate_id(&universe) {
            warn!(%id, "initial universe rejected");
            self.store.fail_load(StoreError::DuplicateId(id));
            return;
        }

        let feed = SimulatedFeed::new(self.config.feed.clone(), &universe);
        self.store.replace_all(universe);

        let (tx, mut rx) = mpsc::channel::<UpdateEvent>(self.config.update_queue_capacity);

        // The feed callback only enqueues; the single consumer below
        // applies merges strictly in arrival order.
        let subscription = feed.subscribe(move |event| {
            if tx.try_send(event).is_err() {
                warn!("update queue full, dropping event");
            }
        });

        let store = Arc::clone(&self.store);
        let consumer = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                store.merge_update(event);
            }
        });

        feed.start();

        *self.wiring.lock() = Some(Wiring {
            feed,
            subscription,
            consumer,
        });
        info!(tokens = self.store.stats().token_count, "engine initialized");
    }

    /// Stop live updates and drop the feed wiring.
    ///
    /// Safe to call at any time: before `initialize`, twice in a row,
    /// or mid-stream. No events are merged after it returns.
    pub fn teardown(&self) {
        let Some(wiring) = self.wiring.lock().take() else {
            return;
        };
        wiring.subscription.unsubscribe();
        wiring.feed.stop();
        wiring.consumer.abort();
        info!("engine torn down");
    }

    /// Select a sort key, toggling direction on re-selection.
    ///
    /// Same key again flips asc/desc; a new key starts ascending.
    pub fn sort(&self, key: SortKey) {
        let current = self.store.snapshot().sort;
        let direction = if current.key == key {
            current.direction.toggled()
        } else {
            SortDirection::Asc
        };
        self.store.set_sort(SortConfig { key, direction });
    }

    /// Apply a partial filter change.
    pub fn filter(&self, update: FilterUpdate) {
        self.store.set_filter(update);
    }

    /// Inject an event as if the feed had emitted it.
    ///
    /// Goes through the same subscription and queue as timer ticks, so
    /// ordering guarantees hold. No-op when not initialized.
    pub fn inject(&self, event: UpdateEvent) {
        if let Some(wiring) = self.wiring.lock().as_ref() {
            wiring.feed.push(event);
        }
    }

    /// Latest read-only snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.store.snapshot()
    }

    /// Stream of snapshots, one per store mutation.
    pub fn watch(&self) -> WatchStream<StoreSnapshot> {
        WatchStream::new(self.store.watch())
    }

    /// Store statistics.
    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    /// Whether live updates are currently flowing.
    pub fn is_live(&self) -> bool {
        self.wiring
            .lock()
            .as_ref()
            .map(|w| w.feed.is_running())
            .unwrap_or(false)
    }
}

impl Drop for TokenEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn first_duplicate_id(tokens: &[Token]) -> Option<String> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .iter()
        .find(|t| !seen.insert(t.id.as_str()))
        .map(|t| t.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eterna_core::{generate_universe, StatusFilter};
    use std::time::Duration;
    use tokio_stream::StreamExt;

    fn engine_with(universe_size: usize) -> (TokenEngine, Vec<Token>) {
        let engine = TokenEngine::new(EngineConfig::default());
        let universe = generate_universe(universe_size);
        (engine, universe)
    }

    #[test]
    fn test_sort_toggle_state_machine() {
        let engine = TokenEngine::new(EngineConfig::default());
        assert_eq!(engine.snapshot().sort, SortConfig::default());

        engine.sort(SortKey::Price);
        let sort = engine.snapshot().sort;
        assert_eq!((sort.key, sort.direction), (SortKey::Price, SortDirection::Asc));

        engine.sort(SortKey::Price);
        let sort = engine.snapshot().sort;
        assert_eq!((sort.key, sort.direction), (SortKey::Price, SortDirection::Desc));

        engine.sort(SortKey::Price);
        assert_eq!(engine.snapshot().sort.direction, SortDirection::Asc);

        engine.sort(SortKey::Holders);
        let sort = engine.snapshot().sort;
        assert_eq!(
            (sort.key, sort.direction),
            (SortKey::Holders, SortDirection::Asc),
            "a new key starts ascending"
        );
    }

    #[test]
    fn test_teardown_without_initialize_is_a_noop() {
        let engine = TokenEngine::new(EngineConfig::default());
        engine.teardown();
        engine.teardown();
        assert!(!engine.is_live());
    }

    #[tokio::test(start_paused = true)]
    async fn test_initialize_feeds_merges_into_the_store() {
        let (engine, universe) = engine_with(5);
        engine.initialize(universe);
        assert!(engine.is_live());
        assert!(!engine.snapshot().is_loading);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(engine.stats().merge_count, 1);

        engine.teardown();
        assert!(!engine.is_live());
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(engine.stats().merge_count, 1, "no merges after teardown");
    }

    #[tokio::test(start_paused = true)]
    async fn test_injected_events_merge_in_arrival_order() {
        let (engine, universe) = engine_with(3);
        let id = universe[0].id.clone();
        engine.initialize(universe);

        engine.inject(UpdateEvent::price_tick(&id, 10.0, 0.0, 1_000));
        engine.inject(UpdateEvent::price_tick(&id, 20.0, 0.0, 1_001));
        engine.inject(UpdateEvent::price_tick(&id, 15.0, 0.0, 1_002));
        tokio::time::sleep(Duration::from_millis(10)).await;

        let snapshot = engine.snapshot();
        let token = snapshot.tokens.iter().find(|t| t.id == id).unwrap();
        assert_eq!(token.price, 15.0);
        assert_eq!(
            token.price_direction,
            eterna_core::PriceDirection::Down,
            "direction reflects the 20 -> 15 transition, so order held"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_universe_surfaces_as_load_error() {
        let engine = TokenEngine::new(EngineConfig::default());
        let mut universe = generate_universe(2);
        universe[1].id = universe[0].id.clone();
        let dup = universe[0].id.clone();

        engine.initialize(universe);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.error, Some(StoreError::DuplicateId(dup)));
        assert!(!snapshot.is_loading);
        assert!(snapshot.tokens.is_empty());
        assert!(!engine.is_live(), "live updates must not start on a failed load");
    }

    #[tokio::test(start_paused = true)]
    async fn test_filter_command_forwards_to_the_store() {
        let (engine, universe) = engine_with(4);
        engine.initialize(universe);

        engine.filter(FilterUpdate::status(StatusFilter::Migrated));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.filter.status, StatusFilter::Migrated);
        assert!(snapshot
            .derived
            .iter()
            .all(|t| t.status == eterna_core::TokenStatus::Migrated));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_streams_a_snapshot_per_mutation() {
        let (engine, universe) = engine_with(2);
        let mut snapshots = engine.watch();

        // First value is the current state at subscription time.
        let first = snapshots.next().await.unwrap();
        assert!(first.is_loading);

        engine.initialize(universe);
        let after_load = snapshots.next().await.unwrap();
        assert!(!after_load.is_loading);
        assert_eq!(after_load.tokens.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reinitialize_replaces_the_wiring() {
        let (engine, universe) = engine_with(3);
        engine.initialize(universe);
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let merges_before = engine.stats().merge_count;

        let fresh = generate_universe(7);
        engine.initialize(fresh);
        assert_eq!(engine.snapshot().tokens.len(), 7);
        assert!(engine.is_live());

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(engine.stats().merge_count > merges_before);
    }
}
