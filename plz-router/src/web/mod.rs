//! Web layer for the PLZ router.
//!
//! JSON endpoints for postal code assignment and address resolution.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
