//! Per-run memo of geocoding lookups with provider pacing.
//!
//! Both hits and misses are cached, keyed by the exact query string, so a
//! location that failed once is not retried within the same run. After
//! every request that actually reaches the provider the geocoder sleeps for
//! the configured interval.

use std::collections::HashMap;
use std::time::Duration;

use crate::client::NominatimClient;
use crate::types::GeocodingResult;

/// Query string → result (`None` records a failed or empty lookup).
#[derive(Debug, Default)]
pub struct GeocodeCache {
    entries: HashMap<String, Option<GeocodingResult>>,
}

impl GeocodeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(None)` means the query was looked up and not found.
    #[must_use]
    pub fn get(&self, query: &str) -> Option<&Option<GeocodingResult>> {
        self.entries.get(query)
    }

    pub fn insert(&mut self, query: String, result: Option<GeocodingResult>) {
        self.entries.insert(query, result);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sequential, rate-limited geocoder backed by a [`GeocodeCache`].
pub struct CachedGeocoder {
    client: NominatimClient,
    cache: GeocodeCache,
    delay: Duration,
    requests: usize,
}

impl CachedGeocoder {
    #[must_use]
    pub fn new(client: NominatimClient, delay: Duration) -> Self {
        Self {
            client,
            cache: GeocodeCache::new(),
            delay,
            requests: 0,
        }
    }

    /// Resolves `query`, consulting the cache first.
    ///
    /// Provider errors are logged and cached as "not found"; they never
    /// propagate.
    pub async fn geocode(&mut self, query: &str) -> Option<GeocodingResult> {
        if let Some(cached) = self.cache.get(query) {
            tracing::debug!(query, found = cached.is_some(), "geocode cache hit");
            return cached.clone();
        }

        let result = match self.client.search(query).await {
            Ok(Some(found)) => Some(found),
            Ok(None) => {
                tracing::info!(query, "no geocoding match");
                None
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "geocoding request failed");
                None
            }
        };
        self.requests += 1;
        self.cache.insert(query.to_owned(), result.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        result
    }

    /// Distinct query strings looked up so far.
    #[must_use]
    pub fn unique_lookups(&self) -> usize {
        self.cache.len()
    }

    /// Requests that reached the provider.
    #[must_use]
    pub fn requests(&self) -> usize {
        self.requests
    }
}
