//! Fetch Cache - A bounded in-process cache for remote fetches
//!
//! Fetches the configured URIs through the cache, once or on a refresh loop.

use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fetch_cache::{spawn_sweep_task, BoundedTtlCache, Config, FetchOrchestrator, HttpFetcher};

type JsonOrchestrator = FetchOrchestrator<serde_json::Value, HttpFetcher>;

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables and arguments
/// 3. Create the cache and purge anything already expired
/// 4. Start the expiry sweep task if an interval is configured
/// 5. Fetch every URI concurrently, once or until SIGINT/SIGTERM
/// 6. Log final cache statistics
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fetch_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().with_extra_uris(std::env::args().skip(1));
    info!(
        "Configuration loaded: max_size={}, ttl={}ms, sweep_interval={}ms, refresh_interval={}ms, uris={}",
        config.max_size,
        config.ttl_ms,
        config.sweep_interval_ms,
        config.refresh_interval_ms,
        config.uris.len()
    );

    let cache: Arc<BoundedTtlCache<serde_json::Value>> =
        Arc::new(BoundedTtlCache::from_config(&config.cache_config())?);
    cache.evict().await;
    info!("Cache initialized");

    let sweep_handle = config
        .sweep_interval()
        .map(|interval| spawn_sweep_task(cache.clone(), interval));

    let fetcher = HttpFetcher::new(config.fetch_timeout())?;
    let orchestrator: JsonOrchestrator = FetchOrchestrator::new(cache.clone(), fetcher);

    if config.uris.is_empty() {
        warn!("No URIs configured; set FETCH_URIS or pass them as arguments");
    }

    match config.refresh_interval() {
        None => run_round(&orchestrator, &config.uris).await,
        Some(interval) => {
            let rounds = async {
                loop {
                    run_round(&orchestrator, &config.uris).await;
                    tokio::time::sleep(interval).await;
                }
            };

            tokio::select! {
                _ = rounds => {}
                _ = shutdown_signal() => {}
            }
        }
    }

    if let Some(handle) = sweep_handle {
        handle.abort();
        warn!("Sweep task aborted");
    }

    let stats = cache.stats().await;
    info!("Final cache stats: {}", serde_json::to_string(&stats)?);

    Ok(())
}

/// Fetches every URI once and logs a summary.
async fn run_round(orchestrator: &JsonOrchestrator, uris: &[String]) {
    let outcomes = orchestrator.fetch_all(uris).await;
    let failed = outcomes.iter().filter(|(_, result)| result.is_err()).count();

    info!(
        fetched = outcomes.len() - failed,
        failed, "Fetch round complete"
    );
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
