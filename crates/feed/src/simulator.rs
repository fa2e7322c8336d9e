//! Timer-driven feed simulation

use parking_lot::Mutex;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use eterna_core::{now_ms, FeedConfig, Token, UpdateEvent};

use crate::subscribers::{SubscriberRegistry, Subscription, UpdateHandler};

/// Prices walk down to this floor, never below.
const MIN_PRICE: f64 = 0.001;
/// The 24h change walk is clamped to this band, in percent.
const MAX_CHANGE_PCT: f64 = 95.0;

/// Per-token walk state kept privately by the simulator.
#[derive(Debug, Clone)]
struct TrackedToken {
    id: String,
    price: f64,
    price_change_24h: f64,
}

struct TickerTask {
    live: Arc<AtomicBool>,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Simulated push source emitting one partial update per tick.
///
/// Stands in for a real socket client: a production transport would
/// attach behind the same subscribe/start/stop surface and emit the
/// same `UpdateEvent` shape. The feed owns a private snapshot of the
/// universe (id, price, 24h change) used only to pick targets and
/// advance its random walk; it never mutates external state.
pub struct SimulatedFeed {
    config: FeedConfig,
    universe: Arc<Mutex<Vec<TrackedToken>>>,
    subscribers: Arc<SubscriberRegistry>,
    ticker: Mutex<Option<TickerTask>>,
}

impl SimulatedFeed {
    /// Build a feed over a snapshot of the given universe.
    pub fn new(config: FeedConfig, universe: &[Token]) -> Self {
        let tracked = universe
            .iter()
            .map(|t| TrackedToken {
                id: t.id.clone(),
                price: t.price,
                price_change_24h: t.price_change_24h,
            })
            .collect();

        Self {
            config,
            universe: Arc::new(Mutex::new(tracked)),
            subscribers: Arc::new(SubscriberRegistry::default()),
            ticker: Mutex::new(None),
        }
    }

    /// Begin emitting ticks. Calling while already running is a no-op.
    pub fn start(&self) {
        let mut ticker = self.ticker.lock();
        if ticker.is_some() {
            return;
        }

        let live = Arc::new(AtomicBool::new(true));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let config = self.config.clone();
        let universe = Arc::clone(&self.universe);
        let subscribers = Arc::clone(&self.subscribers);
        let task_live = Arc::clone(&live);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.tick_interval());
            // A tokio interval fires immediately; swallow that first
            // tick so emission starts one full period after start().
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        emit_tick(&config, &universe, &subscribers, &task_live);
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });

        *ticker = Some(TickerTask {
            live,
            shutdown: shutdown_tx,
            handle,
        });
        debug!(interval_ms = self.config.tick_interval_ms, "feed started");
    }

    /// Stop emitting. Idempotent and safe before `start()`; after it
    /// returns no further events are delivered, even for a pending
    /// timer fire.
    pub fn stop(&self) {
        let Some(task) = self.ticker.lock().take() else {
            return;
        };
        task.live.store(false, Ordering::SeqCst);
        let _ = task.shutdown.send(());
        task.handle.abort();
        debug!("feed stopped");
    }

    /// Whether the ticker is currently running.
    pub fn is_running(&self) -> bool {
        self.ticker.lock().is_some()
    }

    /// Register a handler for every subsequent event.
    ///
    /// Each subscriber receives every event independently; the returned
    /// handle removes exactly this registration.
    pub fn subscribe(&self, handler: impl Fn(UpdateEvent) + Send + Sync + 'static) -> Subscription {
        self.subscribers.subscribe(Arc::new(handler) as UpdateHandler)
    }

    /// Dispatch an event to current subscribers, bypassing the timer.
    ///
    /// The seam where a real transport (or a test) hands received
    /// updates in.
    pub fn push(&self, event: UpdateEvent) {
        self.subscribers.dispatch(&event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Drop for SimulatedFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Advance one token's walk and fan the resulting event out.
fn emit_tick(
    config: &FeedConfig,
    universe: &Mutex<Vec<TrackedToken>>,
    subscribers: &SubscriberRegistry,
    live: &AtomicBool,
) {
    let event = {
        let mut universe = universe.lock();
        if universe.is_empty() {
            trace!("no tracked tokens, tick skipped");
            return;
        }

        let mut rng = rand::rng();
        let idx = rng.random_range(0..universe.len());
        let target = &mut universe[idx];

        let move_pct =
            rng.random_range(-config.max_price_move_pct..=config.max_price_move_pct);
        target.price = (target.price * (1.0 + move_pct / 100.0)).max(MIN_PRICE);

        let nudge = rng.random_range(-config.max_change_nudge..=config.max_change_nudge);
        target.price_change_24h =
            (target.price_change_24h + nudge).clamp(-MAX_CHANGE_PCT, MAX_CHANGE_PCT);

        UpdateEvent::price_tick(
            target.id.clone(),
            target.price,
            target.price_change_24h,
            now_ms(),
        )
    };

    // Re-check after the walk: a stop() racing this tick wins.
    if !live.load(Ordering::SeqCst) {
        return;
    }
    subscribers.dispatch(&event);
}
