//! Nominatim search response types.
//!
//! Only the fields we read are modelled; serde ignores the rest.

use serde::{Deserialize, Serialize};

use crate::domain::PostalCode;

/// One place in a Nominatim `/search` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NominatimPlace {
    #[serde(default)]
    pub display_name: Option<String>,

    /// Present when the request sets `addressdetails=1`.
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

/// Structured address details of a place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NominatimAddress {
    #[serde(default)]
    pub postcode: Option<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub town: Option<String>,

    #[serde(default)]
    pub village: Option<String>,

    #[serde(default)]
    pub state: Option<String>,
}

/// Take the postal code of the first place, if it is a valid 5-digit PLZ.
///
/// Nominatim sometimes reports ranges ("10115;10117") or foreign formats;
/// anything that is not exactly 5 digits counts as no result.
pub fn first_postal_code(places: &[NominatimPlace]) -> Option<PostalCode> {
    let postcode = places.first()?.address.as_ref()?.postcode.as_deref()?;
    PostalCode::parse(postcode).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<NominatimPlace> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn takes_first_place_postcode() {
        let places = parse(
            r#"[
                {"display_name": "Zwiesel, Bayern", "address": {"postcode": "94227", "town": "Zwiesel", "state": "Bayern"}},
                {"display_name": "Elsewhere", "address": {"postcode": "11111"}}
            ]"#,
        );
        assert_eq!(first_postal_code(&places).unwrap().as_str(), "94227");
    }

    #[test]
    fn empty_response_has_no_code() {
        assert!(first_postal_code(&parse("[]")).is_none());
    }

    #[test]
    fn place_without_address_has_no_code() {
        let places = parse(r#"[{"display_name": "Somewhere"}]"#);
        assert!(first_postal_code(&places).is_none());
    }

    #[test]
    fn malformed_postcode_is_rejected() {
        let places = parse(r#"[{"address": {"postcode": "10115;10117"}}]"#);
        assert!(first_postal_code(&places).is_none());

        let places = parse(r#"[{"address": {"postcode": "1011"}}]"#);
        assert!(first_postal_code(&places).is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let places = parse(
            r#"[{"place_id": 42, "lat": "48.9", "address": {"postcode": "94227", "country_code": "de"}}]"#,
        );
        assert_eq!(first_postal_code(&places).unwrap().as_str(), "94227");
    }
}
