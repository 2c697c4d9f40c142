//! Route definitions for the `/dashboard` view.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`. Requires auth.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard::get))
}
