//! The address resolver.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{Confidence, Resolution, Source};
use crate::geocode::{GeocodeError, Geocoder};

use super::cities::CityTable;
use super::extract::{direct_postal_code, embedded_postal_code, extract_city_name};
use super::normalize::normalize_input;

/// Default bound on a single geocoding call.
const DEFAULT_GEOCODE_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the address resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound on a geocoding call. On expiry the lookup is dropped
    /// (cancelled) and reported as an API error, never retried.
    pub geocode_timeout: Duration,
}

impl ResolverConfig {
    /// Set the geocoding timeout.
    pub fn with_geocode_timeout(mut self, timeout: Duration) -> Self {
        self.geocode_timeout = timeout;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            geocode_timeout: DEFAULT_GEOCODE_TIMEOUT,
        }
    }
}

/// Outcome of the offline part of resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalResolution {
    /// Resolution finished without needing the geocoder.
    Done(Resolution),
    /// A city name was extracted but is not in the local table.
    Unmatched { city: String },
}

/// Resolves free-text addresses to postal codes.
///
/// Cheap to clone; the city table and geocoder are shared.
#[derive(Clone)]
pub struct AddressResolver {
    cities: Arc<CityTable>,
    geocoder: Option<Arc<dyn Geocoder>>,
    config: ResolverConfig,
}

impl AddressResolver {
    /// Create a resolver that falls back to `geocoder` for unknown cities.
    pub fn new(cities: Arc<CityTable>, geocoder: Arc<dyn Geocoder>, config: ResolverConfig) -> Self {
        Self {
            cities,
            geocoder: Some(geocoder),
            config,
        }
    }

    /// Create a resolver that only uses the local city table.
    ///
    /// Unknown cities resolve to [`Source::NotFound`].
    pub fn offline(cities: Arc<CityTable>) -> Self {
        Self {
            cities,
            geocoder: None,
            config: ResolverConfig::default(),
        }
    }

    /// The city table in use.
    pub fn cities(&self) -> &CityTable {
        &self.cities
    }

    /// Whether a geocoding fallback is configured.
    pub fn has_geocoder(&self) -> bool {
        self.geocoder.is_some()
    }

    /// Resolve an address to a postal code.
    ///
    /// Never fails: every problem, including geocoder outages, comes back as
    /// a [`Resolution`] with [`Confidence::None`] and a diagnostic source.
    /// Whitespace-only input counts as empty.
    pub async fn resolve(&self, input: &str) -> Resolution {
        let city = match self.resolve_local(input) {
            LocalResolution::Done(resolution) => return resolution,
            LocalResolution::Unmatched { city } => city,
        };

        match &self.geocoder {
            Some(geocoder) => self.geocode(geocoder.as_ref(), city).await,
            None => {
                debug!(city = %city, "unknown city, no geocoder configured");
                Resolution::unresolved(Source::NotFound).with_city(city)
            }
        }
    }

    /// Run every strategy that does not need the network.
    pub fn resolve_local(&self, input: &str) -> LocalResolution {
        let normalized = normalize_input(input);
        if normalized.is_empty() {
            return LocalResolution::Done(Resolution::unresolved(Source::Empty));
        }

        if let Some(code) = direct_postal_code(&normalized) {
            return LocalResolution::Done(Resolution::found(
                code,
                Confidence::High,
                Source::DirectPlz,
            ));
        }

        if let Some(code) = embedded_postal_code(&normalized) {
            debug!(postal_code = %code, "postal code embedded in address");
            return LocalResolution::Done(Resolution::found(
                code,
                Confidence::High,
                Source::ExplicitPlz,
            ));
        }

        let Some(city) = extract_city_name(&normalized) else {
            debug!(input = %normalized, "no city name found");
            return LocalResolution::Done(Resolution::unresolved(Source::NoCityFound));
        };

        match self.cities.lookup(&city) {
            Some(found) => {
                debug!(city = %city, source = %found.source, "city found in local table");
                LocalResolution::Done(found.into_resolution(&city))
            }
            None => LocalResolution::Unmatched { city },
        }
    }

    async fn geocode(&self, geocoder: &dyn Geocoder, city: String) -> Resolution {
        let timeout = self.config.geocode_timeout;
        let answer = match tokio::time::timeout(timeout, geocoder.lookup_postal_code(&city)).await
        {
            Ok(answer) => answer,
            Err(_) => Err(GeocodeError::Timeout {
                after_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        match answer {
            Ok(Some(code)) => {
                debug!(city = %city, postal_code = %code, "geocoded");
                Resolution::found(code, Confidence::Medium, Source::NominatimApi).with_city(city)
            }
            Ok(None) => {
                debug!(city = %city, "geocoder has no postal code");
                Resolution::unresolved(Source::ApiNoResult).with_city(city)
            }
            Err(e) => {
                warn!(city = %city, error = %e, "geocoding failed");
                Resolution::unresolved(Source::ApiError).with_city(city)
            }
        }
    }
}

impl std::fmt::Debug for AddressResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddressResolver")
            .field("cities", &self.cities.len())
            .field("geocoder", &self.geocoder.is_some())
            .field("config", &self.config)
            .finish()
    }
}
