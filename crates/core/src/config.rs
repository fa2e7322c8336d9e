//! Configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simulated feed tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Interval between simulated ticks.
    pub tick_interval_ms: u64,
    /// Maximum absolute per-tick price move, in percent.
    pub max_price_move_pct: f64,
    /// Maximum absolute per-tick nudge to the 24h change, in
    /// percentage points.
    pub max_change_nudge: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 2_000,
            max_price_move_pct: 5.0,
            max_change_nudge: 2.0,
        }
    }
}

impl FeedConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of tokens the demo universe generator seeds.
    pub universe_size: usize,
    /// Capacity of the feed-to-store update queue.
    pub update_queue_capacity: usize,
    pub feed: FeedConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            universe_size: 60,
            update_queue_capacity: 1_024,
            feed: FeedConfig::default(),
        }
    }
}
