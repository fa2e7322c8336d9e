//! Pure derived-view pipeline: status filter, search filter, stable sort

use std::cmp::Ordering;

use eterna_core::{FilterConfig, SortConfig, SortDirection, SortKey, Token};

/// Recompute the derived view for a canonical collection.
///
/// Deterministic and total: the output depends only on the inputs.
/// Equal sort keys keep their relative input order under either sort
/// direction, because `desc` reverses the comparator rather than the
/// sorted output. That tie behavior is a deliberate contract, not an
/// accident.
pub fn derive_view(tokens: &[Token], filter: &FilterConfig, sort: &SortConfig) -> Vec<Token> {
    let search = filter.search.to_lowercase();

    let mut view: Vec<Token> = tokens
        .iter()
        .filter(|t| filter.status.matches(t.status))
        .filter(|t| matches_search(t, &search))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, sort.key);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    view
}

fn matches_search(token: &Token, search: &str) -> bool {
    search.is_empty()
        || token.name.to_lowercase().contains(search)
        || token.symbol.to_lowercase().contains(search)
}

fn compare_by_key(a: &Token, b: &Token, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Symbol => a.symbol.cmp(&b.symbol),
        SortKey::Status => a.status.cmp(&b.status),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::PriceChange24h => a.price_change_24h.total_cmp(&b.price_change_24h),
        SortKey::Volume24h => a.volume_24h.total_cmp(&b.volume_24h),
        SortKey::MarketCap => a.market_cap.total_cmp(&b.market_cap),
        SortKey::Liquidity => a.liquidity.total_cmp(&b.liquidity),
        SortKey::Holders => a.holders.cmp(&b.holders),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::LastUpdated => a.last_updated.cmp(&b.last_updated),
    }
}
