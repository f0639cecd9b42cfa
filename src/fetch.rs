//! Fetch Module
//!
//! Cache-aside retrieval: consult the cache, fall back to a remote fetch on a
//! miss or an expired entry, and write fresh values back.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::cache::BoundedTtlCache;
use crate::error::{CacheError, FetchError};

// == Fetcher ==
/// Retrieves a fresh value for a URL from a remote source.
#[async_trait]
pub trait Fetcher<T>: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<T, FetchError>;
}

// == HTTP Fetcher ==
/// Fetches JSON documents over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<T> Fetcher<T> for HttpFetcher
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, url: &str) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

// == Fetch Orchestrator ==
/// Serves values from the cache and refreshes them through a [`Fetcher`].
///
/// Concurrent misses for the same URL are not coalesced; each fetches and the
/// last `set` wins.
pub struct FetchOrchestrator<T, F> {
    cache: Arc<BoundedTtlCache<T>>,
    fetcher: Arc<F>,
    _value: PhantomData<fn() -> T>,
}

impl<T, F> Clone for FetchOrchestrator<T, F> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            fetcher: Arc::clone(&self.fetcher),
            _value: PhantomData,
        }
    }
}

impl<T, F> FetchOrchestrator<T, F>
where
    T: Clone + Send + Sync + 'static,
    F: Fetcher<T> + 'static,
{
    pub fn new(cache: Arc<BoundedTtlCache<T>>, fetcher: F) -> Self {
        Self {
            cache,
            fetcher: Arc::new(fetcher),
            _value: PhantomData,
        }
    }

    pub fn cache(&self) -> &Arc<BoundedTtlCache<T>> {
        &self.cache
    }

    // == Fetch Data ==
    /// Returns the cached value for `url`, fetching and storing it when the
    /// cache has none or only an expired one.
    ///
    /// A failed fetch leaves the cache untouched.
    pub async fn fetch_data(&self, url: &str) -> Result<T, FetchError> {
        match self.cache.get(url).await {
            Ok(Some(value)) => {
                debug!(url = %url, "Cache hit");
                return Ok(value);
            }
            Ok(None) => debug!(url = %url, "Cached value expired, refetching"),
            Err(CacheError::NotFound(_)) => debug!(url = %url, "Cache miss"),
            Err(err) => warn!(url = %url, error = %err, "Cache lookup failed"),
        }

        let value = self.fetcher.fetch(url).await?;
        self.cache.set(url, value.clone()).await;

        Ok(value)
    }

    // == Fetch All ==
    /// Runs [`fetch_data`](Self::fetch_data) for every URL concurrently.
    ///
    /// Outcomes are returned in input order. Dropping the returned future
    /// aborts fetches still in flight.
    pub async fn fetch_all(&self, urls: &[String]) -> Vec<(String, Result<T, FetchError>)> {
        let mut tasks = JoinSet::new();
        for (index, url) in urls.iter().cloned().enumerate() {
            let orchestrator = self.clone();
            tasks.spawn(async move {
                let result = orchestrator.fetch_data(&url).await;
                if let Err(err) = &result {
                    warn!(url = %url, error = %err, "Data fetching failed");
                }
                info!("Executed data fetching for {}", url);
                (index, result)
            });
        }

        let mut results: Vec<Option<Result<T, FetchError>>> = urls.iter().map(|_| None).collect();
        let mut join_failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(err) => {
                    warn!(error = %err, "Fetch task did not complete");
                    join_failure = Some(err.to_string());
                }
            }
        }

        urls.iter()
            .zip(results)
            .map(|(url, result)| {
                let result = result.unwrap_or_else(|| {
                    Err(FetchError::Aborted {
                        url: url.clone(),
                        reason: join_failure
                            .clone()
                            .unwrap_or_else(|| "task did not complete".to_string()),
                    })
                });
                (url.clone(), result)
            })
            .collect()
    }
}
