//! Seed universe generation for demos and tests
//!
//! Not part of the engine's required interface; the binary and tests
//! wire it, a real deployment would load its universe from upstream.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{now_ms, PriceDirection, Token, TokenStatus};

/// Fixed name/symbol pool for generated universes.
const TOKEN_POOL: [(&str, &str); 30] = [
    ("Ethereum", "ETH"),
    ("Solana", "SOL"),
    ("Avalanche", "AVAX"),
    ("Polygon", "MATIC"),
    ("Cardano", "ADA"),
    ("Polkadot", "DOT"),
    ("Chainlink", "LINK"),
    ("Uniswap", "UNI"),
    ("Cosmos", "ATOM"),
    ("Algorand", "ALGO"),
    ("ApeCoin", "APE"),
    ("Axie Infinity", "AXS"),
    ("The Sandbox", "SAND"),
    ("Decentraland", "MANA"),
    ("Gala", "GALA"),
    ("Immutable X", "IMX"),
    ("Render Token", "RNDR"),
    ("Theta Network", "THETA"),
    ("Aave", "AAVE"),
    ("Compound", "COMP"),
    ("Maker", "MKR"),
    ("Curve DAO", "CRV"),
    ("SushiSwap", "SUSHI"),
    ("PancakeSwap", "CAKE"),
    ("Fantom", "FTM"),
    ("Near Protocol", "NEAR"),
    ("Harmony", "ONE"),
    ("Zilliqa", "ZIL"),
    ("Elrond", "EGLD"),
    ("Hedera", "HBAR"),
];

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Generate a seed universe of `n` tokens with randomized market fields.
///
/// The pool is shuffled first so small universes vary between runs.
/// Past 30 tokens, names cycle with a " V2", " V3", ... suffix; ids stay
/// unique for any `n`.
pub fn generate_universe(n: usize) -> Vec<Token> {
    let mut rng = rand::rng();
    let mut pool = TOKEN_POOL.to_vec();
    pool.shuffle(&mut rng);

    (0..n)
        .map(|i| {
            let (base_name, symbol) = pool[i % pool.len()];
            let round = i / pool.len();
            let name = if round == 0 {
                base_name.to_string()
            } else {
                format!("{} V{}", base_name, round + 1)
            };
            generate_token(&mut rng, i, name, symbol)
        })
        .collect()
}

fn generate_token(rng: &mut impl Rng, index: usize, name: String, symbol: &str) -> Token {
    let now = now_ms();
    let status = match rng.random_range(0..3) {
        0 => TokenStatus::New,
        1 => TokenStatus::FinalStretch,
        _ => TokenStatus::Migrated,
    };
    let handle = symbol.to_lowercase();
    let description = format!("{} is a decentralized token with innovative features.", name);

    Token {
        id: format!("{handle}-{index}"),
        name,
        symbol: symbol.to_string(),
        status,
        price: rng.random_range(0.01..1_000.0),
        price_change_24h: rng.random_range(-30.0..30.0),
        volume_24h: rng.random_range(100_000.0..50_000_000.0),
        market_cap: rng.random_range(1_000_000.0..1_000_000_000.0),
        liquidity: rng.random_range(50_000.0..10_000_000.0),
        holders: rng.random_range(100..100_000),
        created_at: now - rng.random_range(0..30 * DAY_MS),
        last_updated: now,
        logo: Some(format!(
            "https://ui-avatars.com/api/?name={symbol}&background=random"
        )),
        description: Some(description),
        website: Some(format!("https://{handle}.com")),
        twitter: Some(format!("https://twitter.com/{handle}")),
        telegram: Some(format!("https://t.me/{handle}")),
        price_direction: PriceDirection::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generates_requested_count() {
        assert_eq!(generate_universe(0).len(), 0);
        assert_eq!(generate_universe(10).len(), 10);
        assert_eq!(generate_universe(75).len(), 75);
    }

    #[test]
    fn test_ids_are_unique_past_the_pool() {
        let tokens = generate_universe(90);
        let ids: HashSet<_> = tokens.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), tokens.len());
    }

    #[test]
    fn test_names_cycle_with_version_suffix() {
        let tokens = generate_universe(40);
        let versioned = tokens.iter().filter(|t| t.name.ends_with(" V2")).count();
        assert_eq!(versioned, 40 - TOKEN_POOL.len());

        let names: HashSet<_> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), tokens.len());
    }

    #[test]
    fn test_third_pool_round_bumps_the_version() {
        let tokens = generate_universe(65);
        let v3 = tokens.iter().filter(|t| t.name.ends_with(" V3")).count();
        assert_eq!(v3, 65 - 2 * TOKEN_POOL.len());
    }

    #[test]
    fn test_market_fields_within_bounds() {
        for token in generate_universe(40) {
            assert!(token.price >= 0.01 && token.price < 1_000.0);
            assert!(token.price_change_24h.abs() <= 30.0);
            assert!(token.holders >= 100);
            assert!(token.created_at <= token.last_updated);
            assert_eq!(token.price_direction, PriceDirection::Neutral);
        }
    }
}
