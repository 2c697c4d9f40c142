//! Route definitions for the `/fabricators` roster resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::fabricator;
use crate::state::AppState;

/// Routes mounted at `/fabricators`. All require auth.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fabricator::list).post(fabricator::create))
        .route("/{id}", delete(fabricator::delete))
}
