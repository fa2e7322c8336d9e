//! Eterna token engine - demo binary
//!
//! Seeds a token universe, runs the engine against the simulated feed,
//! and logs a periodic view summary until interrupted.

use std::env;
use std::time::Duration;

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use eterna_core::{generate_universe, EngineConfig, FeedConfig};
use eterna_engine::TokenEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Eterna token engine v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let universe_size: usize = env::var("UNIVERSE_SIZE")
        .unwrap_or_else(|_| "60".to_string())
        .parse()
        .unwrap_or(60);
    let tick_interval_ms: u64 = env::var("TICK_INTERVAL_MS")
        .unwrap_or_else(|_| "2000".to_string())
        .parse()
        .unwrap_or(2000);

    let config = EngineConfig {
        universe_size,
        feed: FeedConfig {
            tick_interval_ms,
            ..FeedConfig::default()
        },
        ..EngineConfig::default()
    };

    let universe = generate_universe(config.universe_size);
    info!("Seeded universe with {} tokens", universe.len());

    let engine = TokenEngine::new(config);
    engine.initialize(universe);

    if let Some(err) = engine.snapshot().error {
        error!("Initial load failed: {err}");
        return Err(err.into());
    }

    info!("Live updates running, press Ctrl+C to shutdown");

    // Shutdown signal handling
    let shutdown = async {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("Failed to install signal handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => info!("Received Ctrl+C"),
            _ = terminate => info!("Received termination signal"),
        }
    };
    tokio::pin!(shutdown);

    // Periodic view summary
    let mut status_interval = tokio::time::interval(Duration::from_secs(10));
    status_interval.tick().await;

    loop {
        tokio::select! {
            _ = status_interval.tick() => {
                let snapshot = engine.snapshot();
                let stats = engine.stats();
                info!(
                    "Tracking {} tokens ({} in view), {} merges applied",
                    snapshot.tokens.len(),
                    snapshot.derived.len(),
                    stats.merge_count,
                );
                if let Some(top) = snapshot.derived.first() {
                    info!(
                        "Top of view: {} ({}) at {:.4}, 24h {:+.2}%",
                        top.name, top.symbol, top.price, top.price_change_24h,
                    );
                }
            }
            _ = &mut shutdown => break,
        }
    }

    engine.teardown();
    info!("Shutdown complete");
    Ok(())
}
