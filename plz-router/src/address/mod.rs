//! Address → postal code resolution.
//!
//! Turns free text ("Hauptstraße 15, 80331 München", "Bad Homburg",
//! "10115") into a postal code with a confidence grade. Strategies are
//! tried in a fixed order and the first success wins:
//!
//! 1. the whole input is a postal code
//! 2. a postal code is embedded in the input
//! 3. a city name is extracted and looked up in the local [`CityTable`]
//! 4. the extracted city name is sent to a [`Geocoder`](crate::geocode::Geocoder)
//!
//! Everything except step 4 is pure and synchronous.

mod cities;
mod extract;
mod normalize;
mod resolver;


pub use cities::{CityEntry, CityMatch, CityTable};
pub use extract::{direct_postal_code, embedded_postal_code, extract_city_name};
pub use normalize::normalize_input;
pub use resolver::{AddressResolver, LocalResolution, ResolverConfig};
