//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A stored value together with the instant it stops being valid.
///
/// Entries are never mutated in place; an overwrite replaces the whole entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Instant at which the entry becomes invalid for reads, None = never
    /// (the TTL reaches past what `Instant` can represent)
    pub expires_at: Option<Instant>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry inserted at `now` that lives for `ttl`.
    pub fn new(value: T, now: Instant, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired as of `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so a
    /// zero TTL yields an entry that is expired immediately.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime as of `now`.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` once expired
    /// - `Some(remaining)` while valid
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at.map(|expires| expires.saturating_duration_since(now))
    }
}
