//! Canonical token state and the derived filter/sort pipeline
//!
//! Features:
//! - Single-writer mutation operations over one canonical collection
//! - Full derived-view recomputation on every mutation
//! - Snapshot publication over a watch channel

pub mod store;
pub mod view;

pub use store::{StoreSnapshot, StoreStats, TokenStore};
pub use view::derive_view;
