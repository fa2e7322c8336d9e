//! Canonical token store

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, trace};

use eterna_core::{
    classify_direction, now_ms, FilterConfig, FilterUpdate, SortConfig, StoreError, Token,
    UpdateEvent,
};

use crate::view::derive_view;

/// Full read surface, refreshed on every mutation.
///
/// Plain owned data: safe to hand to a presentation layer, serialize,
/// or compare in tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub tokens: Vec<Token>,
    pub derived: Vec<Token>,
    pub is_loading: bool,
    pub error: Option<StoreError>,
    pub sort: SortConfig,
    pub filter: FilterConfig,
}

struct StoreState {
    tokens: Vec<Token>,
    derived: Vec<Token>,
    is_loading: bool,
    error: Option<StoreError>,
    sort: SortConfig,
    filter: FilterConfig,
}

impl StoreState {
    fn empty() -> Self {
        Self {
            tokens: Vec::new(),
            derived: Vec::new(),
            is_loading: true,
            error: None,
            sort: SortConfig::default(),
            filter: FilterConfig::default(),
        }
    }

    /// Rebuild the derived view from the canonical inputs.
    ///
    /// Suppressed while an upstream failure stands; the next successful
    /// `replace_all` clears the error and resumes.
    fn recompute(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.derived = derive_view(&self.tokens, &self.filter, &self.sort);
    }

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            tokens: self.tokens.clone(),
            derived: self.derived.clone(),
            is_loading: self.is_loading,
            error: self.error.clone(),
            sort: self.sort,
            filter: self.filter.clone(),
        }
    }
}

/// Canonical token collection plus its derived view.
///
/// All mutations are synchronous and atomic from the caller's
/// perspective: each holds the state write lock for its full duration
/// and publishes a fresh snapshot before returning, so no interleaving
/// of two mutations is ever observable.
pub struct TokenStore {
    state: RwLock<StoreState>,
    snapshot_tx: watch::Sender<StoreSnapshot>,
    merge_count: AtomicU64,
}

impl TokenStore {
    pub fn new() -> Self {
        let state = StoreState::empty();
        let (snapshot_tx, _) = watch::channel(state.snapshot());
        Self {
            state: RwLock::new(state),
            snapshot_tx,
            merge_count: AtomicU64::new(0),
        }
    }

    /// Replace the canonical collection with a fresh snapshot.
    ///
    /// Clears any standing load error and marks loading complete.
    pub fn replace_all(&self, tokens: Vec<Token>) {
        let mut state = self.state.write();
        debug!(count = tokens.len(), "replacing canonical collection");
        state.tokens = tokens;
        state.is_loading = false;
        state.error = None;
        state.recompute();
        self.publish(&state);
    }

    /// Apply a partial update to one token by id.
    ///
    /// Unknown ids are a benign race with the initial load and are
    /// silently dropped. Present fields overwrite shallowly; absent
    /// fields are untouched. `price_direction` is recomputed from old
    /// vs. new price whenever the event carries a price, regardless of
    /// what the wire claims. `last_updated` never regresses.
    pub fn merge_update(&self, event: UpdateEvent) {
        let mut state = self.state.write();

        let Some(token) = state.tokens.iter_mut().find(|t| t.id == event.id) else {
            trace!(id = %event.id, "update for untracked token dropped");
            return;
        };

        if let Some(price) = event.price {
            token.price_direction = classify_direction(token.price, price);
            token.price = price;
        }
        if let Some(change) = event.price_change_24h {
            token.price_change_24h = change;
        }
        if let Some(volume) = event.volume_24h {
            token.volume_24h = volume;
        }
        if let Some(market_cap) = event.market_cap {
            token.market_cap = market_cap;
        }
        if let Some(liquidity) = event.liquidity {
            token.liquidity = liquidity;
        }
        if let Some(holders) = event.holders {
            token.holders = holders;
        }
        if let Some(status) = event.status {
            token.status = status;
        }
        let stamp = event.last_updated.unwrap_or_else(now_ms);
        token.last_updated = token.last_updated.max(stamp);

        state.recompute();
        self.merge_count.fetch_add(1, Ordering::Relaxed);
        self.publish(&state);
    }

    /// Merge a partial filter change and recompute the view.
    pub fn set_filter(&self, update: FilterUpdate) {
        let mut state = self.state.write();
        state.filter.apply(update);
        state.recompute();
        self.publish(&state);
    }

    /// Replace the sort configuration and recompute the view.
    pub fn set_sort(&self, sort: SortConfig) {
        let mut state = self.state.write();
        state.sort = sort;
        state.recompute();
        self.publish(&state);
    }

    /// Record an upstream load failure.
    ///
    /// The error stands, loading ends, and derived recomputation stays
    /// suppressed until a successful `replace_all`.
    pub fn fail_load(&self, error: StoreError) {
        let mut state = self.state.write();
        debug!(%error, "initial load failed");
        state.error = Some(error);
        state.is_loading = false;
        self.publish(&state);
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.read().snapshot()
    }

    /// Watch channel carrying the latest snapshot; a new value is
    /// published on every mutation.
    pub fn watch(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Store statistics.
    pub fn stats(&self) -> StoreStats {
        let state = self.state.read();
        StoreStats {
            token_count: state.tokens.len(),
            derived_count: state.derived.len(),
            merge_count: self.merge_count.load(Ordering::Relaxed),
            is_loading: state.is_loading,
        }
    }

    fn publish(&self, state: &StoreState) {
        self.snapshot_tx.send_replace(state.snapshot());
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the store.
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub token_count: usize,
    pub derived_count: usize,
    pub merge_count: u64,
    pub is_loading: bool,
}
