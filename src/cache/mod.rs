//! Cache Module
//!
//! Provides a bounded in-memory cache with TTL expiration and FIFO eviction.

mod bounded;
mod clock;
mod entry;
mod fifo;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use bounded::BoundedTtlCache;
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use entry::CacheEntry;
pub use fifo::FifoQueue;
pub use stats::{CacheStats, CacheStatsSnapshot};
pub use store::CacheStore;
