//! Address resolution outcome types.
//!
//! A [`Resolution`] is what the address resolver hands back for one query:
//! the best postal code it found (if any), how sure it is, and which
//! strategy produced it.

use std::fmt;

use serde::{Serialize, Serializer};

use super::PostalCode;

/// How certain we are about a resolved postal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// The postal code was given explicitly or the city matched exactly.
    High,
    /// Partial city match or geocoded.
    Medium,
    /// No postal code could be determined.
    None,
}

/// Which strategy produced a resolution.
///
/// Serialized as a flat tag such as `direct_plz` or `partial_match_berlin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// The input was empty.
    Empty,
    /// The whole input was a postal code.
    DirectPlz,
    /// A postal code was embedded in the address.
    ExplicitPlz,
    /// The extracted city is a key of the city table.
    DirectMatch(String),
    /// The extracted name contains, or is contained in, a known city.
    PartialMatch(String),
    /// The part before the first hyphen matched (e.g. "berlin-mitte").
    DistrictMatch(String),
    /// The name matched after dropping the "bad " spa-town prefix.
    BadPrefix(String),
    /// The geocoding service returned a postal code.
    NominatimApi,
    /// The geocoding service answered without a usable postal code.
    ApiNoResult,
    /// The geocoding service failed or timed out.
    ApiError,
    /// No city name could be extracted from the input.
    NoCityFound,
    /// The city is unknown locally and no geocoder is configured.
    NotFound,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Empty => f.write_str("empty"),
            Source::DirectPlz => f.write_str("direct_plz"),
            Source::ExplicitPlz => f.write_str("explicit_plz"),
            Source::DirectMatch(city) => write!(f, "direct_match_{city}"),
            Source::PartialMatch(city) => write!(f, "partial_match_{city}"),
            Source::DistrictMatch(city) => write!(f, "district_match_{city}"),
            Source::BadPrefix(city) => write!(f, "bad_prefix_{city}"),
            Source::NominatimApi => f.write_str("nominatim_api"),
            Source::ApiNoResult => f.write_str("api_no_result"),
            Source::ApiError => f.write_str("api_error"),
            Source::NoCityFound => f.write_str("no_city_found"),
            Source::NotFound => f.write_str("not_found"),
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of resolving one address query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// The resolved postal code; serialized as `""` when absent.
    #[serde(serialize_with = "serialize_optional_code")]
    pub postal_code: Option<PostalCode>,
    pub confidence: Confidence,
    pub source: Source,
    /// The city name extracted from the input, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Resolution {
    /// A successful resolution.
    pub fn found(postal_code: PostalCode, confidence: Confidence, source: Source) -> Self {
        Self {
            postal_code: Some(postal_code),
            confidence,
            source,
            city: None,
        }
    }

    /// A resolution without a postal code.
    pub fn unresolved(source: Source) -> Self {
        Self {
            postal_code: None,
            confidence: Confidence::None,
            source,
            city: None,
        }
    }

    /// Attach the extracted city name.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Whether a postal code was found.
    pub fn is_resolved(&self) -> bool {
        self.postal_code.is_some()
    }

    /// German message telling the user what to do about a failed resolution.
    ///
    /// Returns `None` when a postal code was resolved.
    pub fn error_message(&self) -> Option<String> {
        if self.is_resolved() {
            return None;
        }
        let city = self.city.as_deref().unwrap_or_default();
        let message = match self.source {
            Source::Empty => "Bitte geben Sie eine Adresse oder PLZ ein.".to_string(),
            Source::NotFound => format!(
                "Stadt \"{city}\" nicht gefunden. Bitte überprüfen Sie die Schreibweise."
            ),
            Source::NoCityFound => "Keine Stadt in der Adresse erkannt. Verwenden Sie das Format: \"Straße, Stadt\" oder \"PLZ\".".to_string(),
            Source::ApiError => {
                "Adressverarbeitung temporär nicht verfügbar. Versuchen Sie es mit der PLZ."
                    .to_string()
            }
            Source::ApiNoResult => format!(
                "Stadt \"{city}\" nicht gefunden. Bitte überprüfen Sie die Schreibweise oder verwenden Sie die PLZ."
            ),
            _ => "Ungültige Adresse. Bitte geben Sie eine deutsche Adresse oder PLZ ein."
                .to_string(),
        };
        Some(message)
    }
}

fn serialize_optional_code<S: Serializer>(
    code: &Option<PostalCode>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(code.as_ref().map(PostalCode::as_str).unwrap_or_default())
}
