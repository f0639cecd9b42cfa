//! Fetch Cache - A bounded in-process cache for remote fetches
//!
//! Provides a FIFO-evicting cache with TTL expiration and a cache-aside
//! fetch orchestrator that consults it before going to the network.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod tasks;

pub use cache::BoundedTtlCache;
pub use config::{CacheConfig, Config};
pub use error::{CacheError, FetchError};
pub use fetch::{FetchOrchestrator, Fetcher, HttpFetcher};
pub use tasks::spawn_sweep_task;
