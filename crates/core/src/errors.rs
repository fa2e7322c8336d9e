//! Error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced as store state rather than control flow.
///
/// Nothing returns these across the orchestrator boundary; they live in
/// the snapshot's `error` field until a successful `replace_all` clears
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StoreError {
    /// The initial snapshot could not be produced upstream.
    #[error("initial load failed: {0}")]
    LoadFailed(String),

    /// The initial snapshot violated id uniqueness.
    #[error("duplicate token id in snapshot: {0}")]
    DuplicateId(String),
}
