//! Core types for the Eterna token engine
//!
//! This crate provides shared definitions used across all components:
//! - The Token entity and its derived-field helpers
//! - Sort and filter configuration for the derived view
//! - The partial UpdateEvent shape emitted by feeds
//! - Engine and feed configuration
//! - Error taxonomy

pub mod config;
pub mod errors;
pub mod events;
pub mod tokens;
pub mod types;
pub mod universe;

pub use config::*;
pub use errors::*;
pub use events::*;
pub use tokens::*;
pub use types::*;
pub use universe::*;
