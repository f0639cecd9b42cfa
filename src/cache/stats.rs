//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and evictions.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Lock-free performance counters.
///
/// Counters are updated from behind a read lock, hence atomics.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    expired: AtomicU64,
    not_found: AtomicU64,
    evictions: AtomicU64,
    purged: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expired(&self) {
        self.expired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an entry dropped to make room for a new key.
    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` entries removed by a sweep.
    pub fn record_purged(&self, count: usize) {
        self.purged.fetch_add(count as u64, Ordering::Relaxed);
    }

    // == Snapshot ==
    /// Captures the counters together with the current entry count.
    pub fn snapshot(&self, total_entries: usize) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            purged: self.purged.load(Ordering::Relaxed),
            total_entries,
            taken_at: Utc::now(),
        }
    }
}

// == Cache Stats Snapshot ==
/// Point-in-time copy of the cache counters.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsSnapshot {
    /// Lookups that returned a valid value
    pub hits: u64,
    /// Lookups that found an expired entry
    pub expired: u64,
    /// Lookups for keys not in the store
    pub not_found: u64,
    /// Entries dropped by FIFO overflow
    pub evictions: u64,
    /// Entries removed by sweeps
    pub purged: u64,
    /// Entries currently stored, expired ones included
    pub total_entries: usize,
    pub taken_at: DateTime<Utc>,
}

impl CacheStatsSnapshot {
    /// Lookups that did not yield a value.
    pub fn misses(&self) -> u64 {
        self.expired + self.not_found
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
