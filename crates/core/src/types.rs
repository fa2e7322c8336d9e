//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a tracked token.
///
/// Progression is one-way in intended use (new -> final-stretch ->
/// migrated); transitions are not enforced here. The derived `Ord` is
/// that lifecycle order and is what status sorting uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TokenStatus {
    New,
    FinalStretch,
    Migrated,
}

impl TokenStatus {
    pub fn name(&self) -> &'static str {
        match self {
            TokenStatus::New => "new",
            TokenStatus::FinalStretch => "final-stretch",
            TokenStatus::Migrated => "migrated",
        }
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Direction of the most recent price move, display-only.
///
/// Always recomputed from old vs. new price on merge; a value arriving
/// on the wire is never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
    #[default]
    Neutral,
}

/// The sortable token fields.
///
/// A closed enum: unknown sort keys are unrepresentable, which is the
/// boundary rejection for malformed sort input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Symbol,
    Status,
    Price,
    PriceChange24h,
    Volume24h,
    MarketCap,
    Liquidity,
    Holders,
    CreatedAt,
    LastUpdated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Sort configuration for the derived view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

/// Status filter: everything, or exactly one lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    New,
    FinalStretch,
    Migrated,
}

impl StatusFilter {
    /// Whether a token with the given status passes this filter.
    pub fn matches(&self, status: TokenStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::New => status == TokenStatus::New,
            StatusFilter::FinalStretch => status == TokenStatus::FinalStretch,
            StatusFilter::Migrated => status == TokenStatus::Migrated,
        }
    }
}

impl From<TokenStatus> for StatusFilter {
    fn from(status: TokenStatus) -> Self {
        match status {
            TokenStatus::New => StatusFilter::New,
            TokenStatus::FinalStretch => StatusFilter::FinalStretch,
            TokenStatus::Migrated => StatusFilter::Migrated,
        }
    }
}

/// Filter configuration for the derived view.
///
/// `search` is a case-insensitive substring match over name and symbol;
/// empty matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub status: StatusFilter,
    pub search: String,
}

impl FilterConfig {
    /// Shallow-merge a partial change into this config.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(search) = update.search {
            self.search = search;
        }
    }
}

/// Partial filter change; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterUpdate {
    pub status: Option<StatusFilter>,
    pub search: Option<String>,
}

impl FilterUpdate {
    pub fn status(status: StatusFilter) -> Self {
        Self {
            status: Some(status),
            search: None,
        }
    }

    pub fn search(search: impl Into<String>) -> Self {
        Self {
            status: None,
            search: Some(search.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&TokenStatus::FinalStretch).unwrap();
        assert_eq!(json, "\"final-stretch\"");
    }

    #[test]
    fn test_status_lifecycle_order() {
        assert!(TokenStatus::New < TokenStatus::FinalStretch);
        assert!(TokenStatus::FinalStretch < TokenStatus::Migrated);
    }

    #[test]
    fn test_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }

    #[test]
    fn test_filter_shallow_merge() {
        let mut filter = FilterConfig::default();
        filter.apply(FilterUpdate::search("sol"));
        assert_eq!(filter.status, StatusFilter::All);
        assert_eq!(filter.search, "sol");

        filter.apply(FilterUpdate::status(StatusFilter::Migrated));
        assert_eq!(filter.status, StatusFilter::Migrated);
        assert_eq!(filter.search, "sol", "untouched field must survive");
    }

    #[test]
    fn test_default_sort_is_created_at_desc() {
        let sort = SortConfig::default();
        assert_eq!(sort.key, SortKey::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
    }
}
