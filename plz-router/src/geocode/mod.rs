//! Geocoding fallback for city names the local table does not know.
//!
//! The resolver only needs one question answered: "which postal code does
//! this city have?". [`Geocoder`] is that seam. [`NominatimClient`] asks
//! OpenStreetMap's Nominatim service over HTTP; [`MockGeocoder`] answers
//! from memory for tests and offline development.

mod client;
mod error;
mod geocoder;
mod mock;
mod types;

pub use client::{NominatimClient, NominatimConfig};
pub use error::GeocodeError;
pub use geocoder::Geocoder;
pub use mock::MockGeocoder;
pub use types::{NominatimAddress, NominatimPlace};
