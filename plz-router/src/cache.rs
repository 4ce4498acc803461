//! Caching layer for geocoding answers.
//!
//! Public geocoders are slow and rate limited, and users tend to type the
//! same handful of small towns. Answers are cached per lowercase city name,
//! including confirmed "no such place" answers. Errors are never cached, so
//! a transient outage does not stick.

use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::PostalCode;
use crate::geocode::{GeocodeError, Geocoder};

/// Configuration for the geocoding cache.
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
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Geocoder wrapper that caches answers of the inner geocoder.
pub struct CachedGeocoder<G> {
    inner: G,
    answers: MokaCache<String, Option<PostalCode>>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Create a new cached geocoder.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        let answers = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, answers }
    }

    /// Look up `city`, consulting the cache first.
    pub async fn lookup(&self, city: &str) -> Result<Option<PostalCode>, GeocodeError> {
        let key = city.trim().to_lowercase();

        if let Some(cached) = self.answers.get(&key).await {
            trace!(city = %key, "geocode cache hit");
            return Ok(cached);
        }

        let answer = self.inner.lookup_postal_code(city).await?;
        self.answers.insert(key, answer).await;

        Ok(answer)
    }

    /// Access the wrapped geocoder.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.answers.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.answers.invalidate_all();
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn lookup_postal_code<'a>(
        &'a self,
        city: &'a str,
    ) -> BoxFuture<'a, Result<Option<PostalCode>, GeocodeError>> {
        self.lookup(city).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocode::MockGeocoder;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);
    }

    #[tokio::test]
    async fn repeated_lookup_hits_cache() {
        let mock = MockGeocoder::new().with_place("zwiesel", "94227");
        let cached = CachedGeocoder::new(mock.clone(), &CacheConfig::default());

        let first = cached.lookup("zwiesel").await.unwrap();
        let second = cached.lookup("Zwiesel ").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.unwrap().as_str(), "94227");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn misses_are_cached() {
        let mock = MockGeocoder::new();
        let cached = CachedGeocoder::new(mock.clone(), &CacheConfig::default());

        assert!(cached.lookup("atlantis").await.unwrap().is_none());
        assert!(cached.lookup("atlantis").await.unwrap().is_none());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let mock = MockGeocoder::new().failing("down");
        let cached = CachedGeocoder::new(mock.clone(), &CacheConfig::default());

        assert!(cached.lookup("zwiesel").await.is_err());
        assert!(cached.lookup("zwiesel").await.is_err());
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn entries_count_distinct_cities() {
        let mock = MockGeocoder::new().with_place("zwiesel", "94227");
        let cached = CachedGeocoder::new(mock, &CacheConfig::default());

        cached.lookup("zwiesel").await.unwrap();
        cached.lookup("ZWIESEL").await.unwrap();
        cached.lookup("atlantis").await.unwrap();
        cached.answers.run_pending_tasks().await;

        assert_eq!(cached.entry_count(), 2);
        assert_eq!(cached.inner().call_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let mock = MockGeocoder::new().with_place("zwiesel", "94227");
        let cached = CachedGeocoder::new(mock.clone(), &CacheConfig::default());

        cached.lookup("zwiesel").await.unwrap();
        cached.invalidate_all();
        cached.lookup("zwiesel").await.unwrap();
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn usable_as_trait_object() {
        let mock = MockGeocoder::new().with_place("zwiesel", "94227");
        let geocoder: Box<dyn Geocoder> =
            Box::new(CachedGeocoder::new(mock, &CacheConfig::default()));
        let code = geocoder.lookup_postal_code("zwiesel").await.unwrap();
        assert_eq!(code.unwrap().as_str(), "94227");
    }
}
