//! Caching layer for blended fare estimates.
//!
//! Generative estimates are slow and rate limited, and callers tend to
//! resubmit the same trip while filling in a form. Successful estimates are
//! held in memory for a short TTL so repeats are answered locally. Nothing
//! is written to disk.
//!
//! Distances are bucketed to 0.1 km so that float noise from the caller's
//! map widget does not defeat the cache.

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::estimate::{EstimateError, EstimateInput, EstimateResult, FareEstimator};

/// Cache key: (start, destination, distance in 100 m units, bus type, time).
/// Text fields are lowercased.
type EstimateKey = (String, String, u64, String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
            max_capacity: 1000,
        }
    }
}

/// Build the cache key for an input.
fn cache_key(input: &EstimateInput) -> EstimateKey {
    // Inputs are validated finite and non-negative
    let distance_bucket = (input.distance_km * 10.0).round() as u64;
    (
        input.start_location.to_lowercase(),
        input.destination.to_lowercase(),
        distance_bucket,
        input.bus_type.to_lowercase(),
        input.time_of_travel.to_string().to_lowercase(),
    )
}

/// Fare estimator with caching.
///
/// Wraps any [`FareEstimator`] and caches its successful results. Errors
/// are never cached.
pub struct CachedEstimator<E> {
    inner: E,
    cache: MokaCache<EstimateKey, Arc<EstimateResult>>,
}

impl<E: FareEstimator> CachedEstimator<E> {
    /// Create a new cached estimator.
    pub fn new(inner: E, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, cache }
    }

    /// Estimate, using the cache if available.
    pub async fn estimate_cached(
        &self,
        input: &EstimateInput,
    ) -> Result<EstimateResult, EstimateError> {
        let key = cache_key(input);

        if let Some(cached) = self.cache.get(&key).await {
            trace!(estimator = self.inner.name(), "estimate cache hit");
            return Ok((*cached).clone());
        }

        let result = self.inner.estimate(input).await?;
        self.cache.insert(key, Arc::new(result.clone())).await;

        Ok(result)
    }

    /// Access the underlying estimator.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<E: FareEstimator> FareEstimator for CachedEstimator<E> {
    fn estimate<'a>(
        &'a self,
        input: &'a EstimateInput,
    ) -> BoxFuture<'a, Result<EstimateResult, EstimateError>> {
        Box::pin(self.estimate_cached(input))
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
