//! Simulated real-time token feed
//!
//! Features:
//! - Timer-driven partial price updates over a fixed universe
//! - Independent subscriber fan-out with snapshot-before-dispatch
//! - Idempotent start/stop lifecycle

pub mod simulator;
pub mod subscribers;

pub use simulator::SimulatedFeed;
pub use subscribers::{Subscription, UpdateHandler};
