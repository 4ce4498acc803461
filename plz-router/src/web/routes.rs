//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::domain::{PostalCode, Resolution};
use crate::routing::{AssignError, Assignment};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/check_plz",
            get(check_plz).fallback(method_not_allowed),
        )
        .route("/api/resolve", get(resolve).fallback(method_not_allowed))
        .route("/api/lookup", get(lookup).fallback(method_not_allowed))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Assign a postal code to its responsible person.
///
/// Everything but digits is dropped from the input first, so "80 331" works.
async fn check_plz(
    State(state): State<AppState>,
    Query(req): Query<CheckPlzRequest>,
) -> Result<Json<Assignment>, AppError> {
    let code = PostalCode::parse_normalized(req.postal_code.as_deref().unwrap_or_default())
        .map_err(AssignError::from)?;

    let assignment = state
        .router
        .assign_code(code, req.chosen_person.as_deref())?;
    Ok(Json(assignment))
}

/// Resolve a free-text address to a postal code.
async fn resolve(
    State(state): State<AppState>,
    Query(req): Query<ResolveRequest>,
) -> Json<ResolveResponse> {
    let address = req.address.unwrap_or_default();
    let resolution = state.resolver.resolve(&address).await;
    debug!(source = %resolution.source, "resolved address");
    Json(ResolveResponse::from(resolution))
}

/// Resolve an address and assign the resulting postal code in one call.
async fn lookup(
    State(state): State<AppState>,
    Query(req): Query<LookupRequest>,
) -> Result<Json<LookupResponse>, AppError> {
    let address = req.address.unwrap_or_default();
    let resolution = state.resolver.resolve(&address).await;

    let Some(code) = resolution.postal_code else {
        return Err(AppError::Unresolved(Box::new(resolution)));
    };

    let assignment = state
        .router
        .assign_code(code, req.chosen_person.as_deref())?;
    Ok(Json(LookupResponse {
        resolution,
        assignment,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// No postal code could be resolved from the address.
    Unresolved(Box<Resolution>),
    MethodNotAllowed,
    Internal { message: String },
}

impl From<AssignError> for AppError {
    fn from(e: AssignError) -> Self {
        match e {
            AssignError::InvalidFormat(_) | AssignError::Unroutable(_) => AppError::BadRequest {
                message: e.user_message().to_string(),
            },
            AssignError::MissingContact(_) => AppError::Internal {
                message: e.user_message().to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unresolved(resolution) => {
                let error = resolution.error_message().unwrap_or_default();
                debug!(source = %resolution.source, "address not resolved");
                let body = Json(UnresolvedResponse {
                    error,
                    resolution: *resolution,
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed".to_string(),
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            debug!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::address::{AddressResolver, CityTable, ResolverConfig};
    use crate::domain::PersonContact;
    use crate::geocode::MockGeocoder;
    use crate::routing::{AssignmentRouter, ContactBook};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    fn cities() -> Arc<CityTable> {
        Arc::new(CityTable::embedded().unwrap())
    }

    fn router_with_contacts(contacts: ContactBook) -> AssignmentRouter {
        AssignmentRouter::new(Arc::new(contacts))
    }

    fn create_test_state() -> AppState {
        let mock = MockGeocoder::new().with_place("zwiesel", "94227");
        AppState::new(
            AddressResolver::new(cities(), Arc::new(mock), ResolverConfig::default()),
            router_with_contacts(ContactBook::embedded().unwrap()),
        )
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        send(create_router(create_test_state()), "GET", uri).await
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state());
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn test_check_plz_single() {
        let (status, body) = get_json("/api/check_plz?postalCode=80331").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["person"], "Anna Kropfitsch");
        assert_eq!(body["land"], "Bayern");
        assert_eq!(body["contact"]["name"], "Anna Kropfitsch");
    }

    #[tokio::test]
    async fn test_check_plz_alias_and_sanitizing() {
        let (status, body) = get_json("/api/check_plz?plz=10%20115").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["person"], "Mattias Herbst");
        assert_eq!(body["land"], "Brandenburg/Berlin");
    }

    #[tokio::test]
    async fn test_check_plz_choice_flow() {
        let (status, body) = get_json("/api/check_plz?postalCode=40210").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["requiresChoice"], true);
        assert_eq!(body["options"].as_array().unwrap().len(), 2);

        let (status, body) =
            get_json("/api/check_plz?postalCode=40210&chosenPerson=Anna%20Kropfitsch").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["person"], "Anna Kropfitsch");
        assert_eq!(body["land"], "Nordrhein-Westfalen");
    }

    #[tokio::test]
    async fn test_check_plz_invalid() {
        for uri in [
            "/api/check_plz?postalCode=1234",
            "/api/check_plz?postalCode=123456",
            "/api/check_plz?postalCode=abcde",
            "/api/check_plz",
        ] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
            assert_eq!(
                body["error"],
                "Ungültige PLZ. Bitte geben Sie eine 5-stellige Zahl ein."
            );
        }
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        for uri in ["/api/check_plz", "/api/lookup"] {
            let (status, body) = send(create_router(create_test_state()), "POST", uri).await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body["error"], "Method Not Allowed");
        }
    }

    #[tokio::test]
    async fn test_missing_contact_is_internal_error() {
        let contacts = ContactBook::from_contacts([PersonContact {
            name: "Mattias Herbst".into(),
            position: "Nord".into(),
            email: "m@example.com".into(),
        }])
        .unwrap();
        let state = AppState::new(
            AddressResolver::offline(cities()),
            router_with_contacts(contacts),
        );

        let (status, body) = send(
            create_router(state),
            "GET",
            "/api/check_plz?postalCode=80331",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Interner Fehler"));
    }

    #[tokio::test]
    async fn test_resolve_city() {
        let (status, body) = get_json("/api/resolve?address=Frankfurt%20am%20Main").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["postalCode"], "60306");
        assert_eq!(body["confidence"], "medium");
        assert_eq!(body["source"], "partial_match_frankfurt");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_resolve_geocoded() {
        let (status, body) = get_json("/api/resolve?address=Musterweg%203%2C%20Zwiesel").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["postalCode"], "94227");
        assert_eq!(body["source"], "nominatim_api");
        assert_eq!(body["city"], "zwiesel");
    }

    #[tokio::test]
    async fn test_resolve_failure_has_message() {
        let (status, body) = get_json("/api/resolve?address=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["postalCode"], "");
        assert_eq!(body["confidence"], "none");
        assert_eq!(body["message"], "Bitte geben Sie eine Adresse oder PLZ ein.");
    }

    #[tokio::test]
    async fn test_lookup_pipeline() {
        let (status, body) = get_json("/api/lookup?address=Jungfernstieg%201%2C%20Hamburg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resolution"]["postalCode"], "20095");
        assert_eq!(body["assignment"]["person"], "Mattias Herbst");
        assert_eq!(
            body["assignment"]["land"],
            "Hamburg/Schleswig-Holstein/Mecklenburg-Vorpommern"
        );
    }

    #[tokio::test]
    async fn test_lookup_choice_replay() {
        let (status, body) = get_json("/api/lookup?address=Aachen").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assignment"]["requiresChoice"], true);

        let (status, body) =
            get_json("/api/lookup?address=Aachen&chosenPerson=Mattias%20Herbst").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assignment"]["person"], "Mattias Herbst");
    }

    #[tokio::test]
    async fn test_lookup_unresolved() {
        let (status, body) = get_json("/api/lookup?address=Hauptstrasse%205").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["resolution"]["source"], "no_city_found");
        assert!(body["error"].as_str().unwrap().starts_with("Keine Stadt"));
    }
}
