//! Expiry Sweep Task
//!
//! Background task that periodically purges expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::BoundedTtlCache;

/// Spawns a background task that calls [`BoundedTtlCache::evict`] every
/// `interval`.
///
/// The cache never sweeps on its own; this task is how an owner opts in.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(BoundedTtlCache::<String>::new(10, Duration::from_secs(1))?);
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_millis(500));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<T>(cache: Arc<BoundedTtlCache<T>>, interval: Duration) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            // evict() logs its own outcome
            cache.evict().await;
        }
    })
}
