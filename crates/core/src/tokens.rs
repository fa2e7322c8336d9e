//! Token entity and derived-field helpers

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{PriceDirection, TokenStatus};

/// A tradable asset tracked by the engine.
///
/// `id` is immutable and unique across the collection. All numeric
/// market fields are non-negative except `price_change_24h`, which is a
/// signed percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub status: TokenStatus,
    pub price: f64,
    pub price_change_24h: f64,
    pub volume_24h: f64,
    pub market_cap: f64,
    pub liquidity: f64,
    pub holders: u64,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    /// Milliseconds since the Unix epoch; never regresses on merge.
    pub last_updated: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    /// Display-only; recomputed on every price-bearing merge.
    #[serde(default)]
    pub price_direction: PriceDirection,
}

/// Classify the direction of a price move.
///
/// Total for finite inputs; NaN and negative prices are out of contract
/// and must be validated upstream.
pub fn classify_direction(old_price: f64, new_price: f64) -> PriceDirection {
    if new_price > old_price {
        PriceDirection::Up
    } else if new_price < old_price {
        PriceDirection::Down
    } else {
        PriceDirection::Neutral
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_direction() {
        assert_eq!(classify_direction(10.0, 12.0), PriceDirection::Up);
        assert_eq!(classify_direction(10.0, 10.0), PriceDirection::Neutral);
        assert_eq!(classify_direction(10.0, 8.0), PriceDirection::Down);
    }

    #[test]
    fn test_token_serializes_camel_case_and_skips_absent_links() {
        let token = Token {
            id: "sol-1".to_string(),
            name: "Solana".to_string(),
            symbol: "SOL".to_string(),
            status: TokenStatus::New,
            price: 42.5,
            price_change_24h: -3.1,
            volume_24h: 1_000_000.0,
            market_cap: 20_000_000.0,
            liquidity: 500_000.0,
            holders: 12_345,
            created_at: 1_700_000_000_000,
            last_updated: 1_700_000_000_000,
            logo: None,
            description: None,
            website: None,
            twitter: None,
            telegram: None,
            price_direction: PriceDirection::Neutral,
        };

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["priceChange24h"], -3.1);
        assert_eq!(json["lastUpdated"], 1_700_000_000_000i64);
        assert!(json.get("website").is_none());
    }
}
