//! Error types for the cache and the fetch layer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised by cache operations.
///
/// An expired entry is not an error: `get` reports it as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key was never stored, or has since been removed
    #[error("Item with key {0} does not exist in cache")]
    NotFound(String),

    /// Construction parameters are out of range
    #[error("Invalid cache configuration: {0}")]
    InvalidConfig(String),
}

// == Fetch Error Enum ==
/// Errors raised while retrieving a fresh value from a remote source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Body could not be decoded into the cached type
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Fetch task panicked or was cancelled
    #[error("Fetch task for {url} did not complete: {reason}")]
    Aborted { url: String, reason: String },
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
