//! Partial update events at the feed boundary

use serde::{Deserialize, Serialize};

use crate::{PriceDirection, TokenStatus};

/// A partial-field update for one token, as emitted by a feed.
///
/// Absent fields leave the token's current values untouched. Events
/// referencing an unknown id are a benign no-op at the store. This is
/// the exact shape a real transport would emit at the feed seam.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_24h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holders: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TokenStatus>,
    /// Milliseconds since the Unix epoch; the merge falls back to its
    /// own clock when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
    /// Accepted on the wire for transport compatibility; the store
    /// always recomputes direction from old vs. new price instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_direction: Option<PriceDirection>,
}

impl UpdateEvent {
    /// Price-bearing update, the common case for simulated ticks.
    pub fn price_tick(
        id: impl Into<String>,
        price: f64,
        price_change_24h: f64,
        last_updated: i64,
    ) -> Self {
        Self {
            id: id.into(),
            price: Some(price),
            price_change_24h: Some(price_change_24h),
            last_updated: Some(last_updated),
            ..Default::default()
        }
    }
}
