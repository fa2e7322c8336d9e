//! Engine orchestration: feed-to-store wiring and the command surface
//!
//! Features:
//! - Single serialized update queue between feed and store
//! - Sort/filter command API, including the sort toggle state machine
//! - Read-only snapshot and watch surface for presentation layers

pub mod engine;

pub use engine::TokenEngine;
