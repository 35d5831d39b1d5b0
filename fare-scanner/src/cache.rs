//! Caching layer for flight offers.
//!
//! Availability responses change slowly compared to how often overlapping
//! scans ask for them, so offers are cached per request for a few minutes.
//! Concurrent requests for the same key share a single upstream fetch.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Flight, RouteGraph};
use crate::planner::{OfferRequest, OfferSource, RouteSource, ScanError};

/// Cached offers for one request.
type OfferEntry = Arc<Vec<Flight>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of entries.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Offer source with caching.
///
/// Wraps any `OfferSource` and caches its successful responses. Failed
/// fetches are not cached. Route graph requests pass straight through.
pub struct CachedOffers<S> {
    source: S,
    offers: MokaCache<OfferRequest, OfferEntry>,
}

impl<S> CachedOffers<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let offers = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, offers }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.offers.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.offers.invalidate_all();
    }
}

impl<S> OfferSource for CachedOffers<S>
where
    S: OfferSource + Sync,
{
    async fn offers(&self, request: &OfferRequest) -> Result<Vec<Flight>, ScanError> {
        let entry = self
            .offers
            .try_get_with(request.clone(), async {
                trace!(
                    origin = %request.origin,
                    destination = %request.destination,
                    date = %request.date,
                    "Offer cache miss"
                );
                self.source.offers(request).await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<ScanError>| (*e).clone())?;

        Ok(entry.as_ref().clone())
    }
}

impl<S> RouteSource for CachedOffers<S>
where
    S: RouteSource + Sync,
{
    async fn route_graph(&self) -> Result<RouteGraph, ScanError> {
        self.source.route_graph().await
    }
}
