//! Mock geocoder for testing without network access.
//!
//! Answers from an in-memory city → postal code map, optionally loaded
//! from a JSON file, and can be told to fail or to stall.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::PostalCode;

use super::error::GeocodeError;
use super::geocoder::Geocoder;

/// Mock geocoder that serves answers from memory.
///
/// Clones share the call counter, so a test can hand a clone to the
/// resolver and still observe how often it was asked.
#[derive(Debug, Clone, Default)]
pub struct MockGeocoder {
    /// Known places, keyed by lowercase city name.
    places: HashMap<String, PostalCode>,
    /// When set, every lookup fails with this message.
    failure: Option<String>,
    /// Artificial latency applied before answering.
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockGeocoder {
    /// Create a mock that knows no places.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load places from a JSON object mapping city names to postal codes.
    ///
    /// ```json
    /// { "zwiesel": "94227", "bodenmais": "94249" }
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeocodeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GeocodeError::Mock {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let raw: HashMap<String, String> =
            serde_json::from_str(&json).map_err(|e| GeocodeError::Mock {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;

        let mut mock = Self::new();
        for (city, code) in raw {
            let code = PostalCode::parse(&code).map_err(|e| GeocodeError::Mock {
                message: format!("{city}: {e}"),
            })?;
            mock.places.insert(city.to_lowercase(), code);
        }
        Ok(mock)
    }

    /// Add a known place.
    ///
    /// # Panics
    ///
    /// Panics if `code` is not a valid postal code. Intended for test setup.
    pub fn with_place(mut self, city: &str, code: &str) -> Self {
        let code = PostalCode::parse(code).expect("mock postal code must be valid");
        self.places.insert(city.to_lowercase(), code);
        self
    }

    /// Make every lookup fail as if the service were unreachable.
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Delay every answer by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of lookups made so far (across clones).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of known places.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether no places are known.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    async fn answer(&self, city: &str) -> Result<Option<PostalCode>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.failure {
            return Err(GeocodeError::Mock {
                message: message.clone(),
            });
        }

        Ok(self.places.get(&city.to_lowercase()).copied())
    }
}

impl Geocoder for MockGeocoder {
    fn lookup_postal_code<'a>(
        &'a self,
        city: &'a str,
    ) -> BoxFuture<'a, Result<Option<PostalCode>, GeocodeError>> {
        self.answer(city).boxed()
    }
}
