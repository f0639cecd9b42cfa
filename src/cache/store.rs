//! Cache Store Module
//!
//! Single-threaded cache engine combining HashMap storage with FIFO ordering
//! and lazy TTL expiration. Concurrency is layered on top by
//! [`BoundedTtlCache`](super::BoundedTtlCache).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, FifoQueue};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Keyed storage with a hard entry bound, FIFO eviction and per-entry expiry.
///
/// The map and the FIFO queue always track the same key set.
#[derive(Debug)]
pub struct CacheStore<T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Insertion order tracker
    fifo: FifoQueue,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Lifetime applied to every entry
    ttl: Duration,
}

impl<T> CacheStore<T> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of entries, must be positive
    /// * `ttl` - Lifetime applied to every entry
    pub fn new(max_size: usize, ttl: Duration) -> Result<Self> {
        if max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::with_capacity(max_size),
            fifo: FifoQueue::new(),
            max_size,
            ttl,
        })
    }

    // == Set ==
    /// Stores `value` under `key`, expiring at `now + ttl`.
    ///
    /// A new key inserted into a full store first evicts the oldest key.
    /// Overwriting an existing key keeps its FIFO slot, resets its expiry and
    /// never evicts.
    ///
    /// Returns the key evicted to make room, if any.
    pub fn set(&mut self, key: String, value: T, now: Instant) -> Option<String> {
        let entry = CacheEntry::new(value, now, self.ttl);

        if let Some(existing) = self.entries.get_mut(&key) {
            *existing = entry;
            return None;
        }

        let mut evicted = None;
        if self.entries.len() >= self.max_size {
            if let Some(oldest) = self.fifo.pop_oldest() {
                self.entries.remove(&oldest);
                evicted = Some(oldest);
            }
        }

        self.fifo.push(key.clone());
        self.entries.insert(key, entry);

        evicted
    }

    // == Has ==
    /// Returns whether `key` is tracked, regardless of expiry.
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Get ==
    /// Looks up `key` as of `now`.
    ///
    /// - `Err(NotFound)` if the key is not tracked
    /// - `Ok(None)` if the key is tracked but expired (left in place)
    /// - `Ok(Some(value))` otherwise
    pub fn get(&self, key: &str, now: Instant) -> Result<Option<&T>> {
        let entry = self
            .entries
            .get(key)
            .ok_or_else(|| CacheError::NotFound(key.to_string()))?;

        if entry.is_expired(now) {
            Ok(None)
        } else {
            Ok(Some(&entry.value))
        }
    }

    // == Evict Expired ==
    /// Removes every entry expired as of `now`.
    ///
    /// All keys are judged against the same instant. Returns the number of
    /// entries removed.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now));
        let entries = &self.entries;
        self.fifo.retain(|key| entries.contains_key(key));

        before - self.entries.len()
    }

    // == Oldest Key ==
    /// Returns the next FIFO eviction candidate.
    pub fn oldest_key(&self) -> Option<&str> {
        self.fifo.peek_oldest().map(String::as_str)
    }

    /// Iterates tracked keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fifo.iter().map(String::as_str)
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
