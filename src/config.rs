//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Construction-time cache parameters, fixed for the cache's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Lifetime applied to every entry
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            ttl: Duration::from_millis(1000),
        }
    }
}

/// Process configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Entry TTL in milliseconds
    pub ttl_ms: u64,
    /// Background sweep interval in milliseconds, 0 disables the sweeper
    pub sweep_interval_ms: u64,
    /// Per-request fetch timeout in milliseconds
    pub fetch_timeout_ms: u64,
    /// Delay between fetch rounds in milliseconds, 0 runs a single round
    pub refresh_interval_ms: u64,
    /// URIs to fetch
    pub uris: Vec<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 10)
    /// - `CACHE_TTL_MS` - Entry TTL in milliseconds (default: 1000)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency, 0 = off (default: 0)
    /// - `FETCH_TIMEOUT_MS` - Fetch timeout (default: 10000)
    /// - `REFRESH_INTERVAL_MS` - Fetch round frequency, 0 = once (default: 0)
    /// - `FETCH_URIS` - Comma-separated URIs (default: none)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_size: parse_var("CACHE_MAX_SIZE").unwrap_or(defaults.max_size),
            ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.ttl_ms),
            sweep_interval_ms: parse_var("SWEEP_INTERVAL_MS")
                .unwrap_or(defaults.sweep_interval_ms),
            fetch_timeout_ms: parse_var("FETCH_TIMEOUT_MS").unwrap_or(defaults.fetch_timeout_ms),
            refresh_interval_ms: parse_var("REFRESH_INTERVAL_MS")
                .unwrap_or(defaults.refresh_interval_ms),
            uris: env::var("FETCH_URIS")
                .map(|v| split_uris(&v))
                .unwrap_or_default(),
        }
    }

    /// Appends URIs given on the command line.
    pub fn with_extra_uris<I>(mut self, uris: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.uris.extend(uris.into_iter().filter(|u| !u.trim().is_empty()));
        self
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_size: self.max_size,
            ttl: Duration::from_millis(self.ttl_ms),
        }
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_ms > 0).then(|| Duration::from_millis(self.sweep_interval_ms))
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_ms > 0).then(|| Duration::from_millis(self.refresh_interval_ms))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: 10,
            ttl_ms: 1000,
            sweep_interval_ms: 0,
            fetch_timeout_ms: 10_000,
            refresh_interval_ms: 0,
            uris: Vec::new(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn split_uris(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from)
        .collect()
}
