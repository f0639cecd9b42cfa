//! Bounded TTL Cache Module
//!
//! Shareable cache wrapping a [`CacheStore`] in a single async RwLock.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStatsSnapshot, CacheStore, SystemClock, TimeSource};
use crate::config::CacheConfig;
use crate::error::Result;

// == Bounded TTL Cache ==
/// Concurrency-safe cache with a fixed entry bound, a uniform TTL and FIFO
/// eviction.
///
/// `set` and `evict` take the write lock; `get` and `has` only read. Expired
/// entries are left in place until [`evict`](Self::evict) runs or the key is
/// overwritten.
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// use std::time::Duration;
/// use fetch_cache::cache::BoundedTtlCache;
///
/// let cache = BoundedTtlCache::new(2, Duration::from_secs(60)).unwrap();
/// cache.set("a", 1).await;
/// cache.set("b", 2).await;
/// cache.set("c", 3).await;
///
/// assert!(!cache.has("a").await);
/// assert_eq!(cache.get("c").await.unwrap(), Some(3));
/// # });
/// ```
#[derive(Debug)]
pub struct BoundedTtlCache<T> {
    store: RwLock<CacheStore<T>>,
    clock: Arc<dyn TimeSource>,
    stats: CacheStats,
}

impl<T> BoundedTtlCache<T>
where
    T: Clone + Send + Sync,
{
    // == Constructors ==
    /// Creates a cache driven by the system clock.
    pub fn new(max_size: usize, ttl: Duration) -> Result<Self> {
        Self::with_time_source(max_size, ttl, Arc::new(SystemClock))
    }

    /// Creates a cache driven by `clock`.
    pub fn with_time_source(
        max_size: usize,
        ttl: Duration,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self> {
        Ok(Self {
            store: RwLock::new(CacheStore::new(max_size, ttl)?),
            clock,
            stats: CacheStats::new(),
        })
    }

    /// Creates a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.max_size, config.ttl)
    }

    // == Set ==
    /// Stores `value` under `key` with expiry `now + ttl`.
    ///
    /// Inserting a new key into a full cache first evicts the oldest entry.
    /// Overwriting keeps the key's FIFO position.
    pub async fn set(&self, key: impl Into<String>, value: T) {
        let key = key.into();
        let mut store = self.store.write().await;
        let now = self.clock.now();

        if let Some(evicted) = store.set(key.clone(), value, now) {
            self.stats.record_eviction();
            debug!(evicted = %evicted, inserted = %key, "Cache full, evicted oldest entry");
        } else {
            debug!(key = %key, "Cache entry stored");
        }
    }

    // == Has ==
    /// Returns whether `key` is tracked, expired or not.
    pub async fn has(&self, key: &str) -> bool {
        self.store.read().await.has(key)
    }

    // == Get ==
    /// Looks up `key`.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if present and valid
    /// - `Ok(None)` if present but expired; the entry is not removed
    ///
    /// # Errors
    /// `CacheError::NotFound` if the key is not tracked.
    pub async fn get(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.read().await;
        let now = self.clock.now();

        match store.get(key, now) {
            Ok(Some(value)) => {
                self.stats.record_hit();
                Ok(Some(value.clone()))
            }
            Ok(None) => {
                self.stats.record_expired();
                debug!(key = %key, "Cache entry expired");
                Ok(None)
            }
            Err(err) => {
                self.stats.record_not_found();
                Err(err)
            }
        }
    }

    // == Evict ==
    /// Removes every entry that is expired at the moment of the sweep.
    ///
    /// Returns the number of entries removed.
    pub async fn evict(&self) -> usize {
        let mut store = self.store.write().await;
        let now = self.clock.now();
        let removed = store.evict_expired(now);
        self.stats.record_purged(removed);

        if removed > 0 {
            info!(removed, remaining = store.len(), "Evicted expired cache entries");
        } else {
            debug!("Evict sweep found no expired entries");
        }

        removed
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStatsSnapshot {
        let total_entries = self.store.read().await.len();
        self.stats.snapshot(total_entries)
    }

    pub async fn max_size(&self) -> usize {
        self.store.read().await.max_size()
    }

    pub async fn ttl(&self) -> Duration {
        self.store.read().await.ttl()
    }
}
