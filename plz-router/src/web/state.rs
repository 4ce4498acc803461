//! Application state for the web layer.

use std::sync::Arc;

use crate::address::AddressResolver;
use crate::routing::AssignmentRouter;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Free-text address → postal code
    pub resolver: Arc<AddressResolver>,

    /// Postal code → responsible person
    pub router: Arc<AssignmentRouter>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(resolver: AddressResolver, router: AssignmentRouter) -> Self {
        Self {
            resolver: Arc::new(resolver),
            router: Arc::new(router),
        }
    }
}
