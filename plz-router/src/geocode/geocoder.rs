//! The geocoding seam used by the address resolver.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::domain::PostalCode;

use super::error::GeocodeError;

/// Looks up a postal code for a city name.
///
/// Implementations may suspend on network I/O. Callers bound the call with
/// their own timeout and cancel it by dropping the future.
pub trait Geocoder: Send + Sync {
    /// Find a postal code for `city`.
    ///
    /// Returns `Ok(None)` when the service answered but knows no usable
    /// 5-digit code for the name.
    fn lookup_postal_code<'a>(
        &'a self,
        city: &'a str,
    ) -> BoxFuture<'a, Result<Option<PostalCode>, GeocodeError>>;
}

impl<G: Geocoder + ?Sized> Geocoder for Arc<G> {
    fn lookup_postal_code<'a>(
        &'a self,
        city: &'a str,
    ) -> BoxFuture<'a, Result<Option<PostalCode>, GeocodeError>> {
        (**self).lookup_postal_code(city)
    }
}
