//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Resolution;
use crate::routing::Assignment;

/// Query for `/api/check_plz`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPlzRequest {
    /// Postal code as typed; non-digits are dropped before validation
    #[serde(alias = "plz")]
    pub postal_code: Option<String>,

    /// Name picked from a previous choice response
    pub chosen_person: Option<String>,
}

/// Query for `/api/resolve`.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveRequest {
    /// Free-text address or postal code
    pub address: Option<String>,
}

/// Query for `/api/lookup`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub address: Option<String>,
    pub chosen_person: Option<String>,
}

/// Response of `/api/resolve`.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    #[serde(flatten)]
    pub resolution: Resolution,

    /// German hint for the user, present only when nothing was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Resolution> for ResolveResponse {
    fn from(resolution: Resolution) -> Self {
        let message = resolution.error_message();
        Self {
            resolution,
            message,
        }
    }
}

/// Successful response of `/api/lookup`.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub resolution: Resolution,
    pub assignment: Assignment,
}

/// Body of a 422 from `/api/lookup`.
#[derive(Debug, Serialize)]
pub struct UnresolvedResponse {
    pub error: String,
    pub resolution: Resolution,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
