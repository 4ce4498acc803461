//! Pattern-based extraction of postal codes and city names.
//!
//! All functions expect input that already went through
//! [`normalize_input`](super::normalize_input).

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::PostalCode;

/// The whole input is a postal code.
static DIRECT_PLZ: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

/// A 5-digit run not glued to other digits, letters or underscores.
static EMBEDDED_PLZ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z_])([0-9]{5})(?:$|[^0-9A-Za-z_])").unwrap()
});

/// City name patterns, tried in order.
static CITY_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // "Street Number, City"
        Regex::new(r"(?i),\s*([a-zäöüß][a-zäöüß\s-]+)$").unwrap(),
        // "City, Street Number"
        Regex::new(r"(?i)^([a-zäöüß][a-zäöüß\s-]+),").unwrap(),
        // "PLZ City"
        Regex::new(r"(?i)[0-9]{5}\s+([a-zäöüß][a-zäöüß\s-]+)$").unwrap(),
        // bare name
        Regex::new(r"(?i)^([a-zäöüß][a-zäöüß\s-]+)$").unwrap(),
    ]
});

/// Returns the postal code if the input is exactly one.
pub fn direct_postal_code(input: &str) -> Option<PostalCode> {
    if !DIRECT_PLZ.is_match(input) {
        return None;
    }
    PostalCode::parse(input).ok()
}

/// Returns the first standalone 5-digit run in the input.
pub fn embedded_postal_code(input: &str) -> Option<PostalCode> {
    let caps = EMBEDDED_PLZ.captures(input)?;
    PostalCode::parse(caps.get(1)?.as_str()).ok()
}

/// Extract a lowercase city name from an address.
pub fn extract_city_name(input: &str) -> Option<String> {
    CITY_PATTERNS.iter().find_map(|pattern| {
        let city = pattern.captures(input)?.get(1)?.as_str().trim();
        (!city.is_empty()).then(|| city.to_lowercase())
    })
}
