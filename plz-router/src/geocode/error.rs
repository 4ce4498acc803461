//! Geocoding error types.

/// Errors that can occur while asking a geocoder for a postal code.
///
/// A geocoder that answers "no such place" returns `Ok(None)`; these
/// variants are reserved for failures to get an answer at all.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed (network error, client timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Rate limited by the geocoding service
    #[error("rate limited by geocoding service")]
    RateLimited,

    /// Service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// No answer within the configured bound
    #[error("geocoding timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// Mock geocoder misconfigured or told to fail
    #[error("mock geocoder: {message}")]
    Mock { message: String },
}
