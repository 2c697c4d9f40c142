pub mod auth;
pub mod calendar;
pub mod dashboard;
pub mod fabricator;
pub mod health;
pub mod project;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                           WebSocket (refresh notifications)
///
/// /auth/login                   login (public)
/// /auth/refresh                 refresh (public)
/// /auth/logout                  logout (requires auth)
/// /auth/me                      current user (requires auth)
///
/// /projects                     list, create
/// /projects/{id}                get, update
/// /projects/{id}/complete       mark complete (POST)
/// /projects/{id}/attachments    list (GET), upload (POST)
///
/// /fabricators                  list, create
/// /fabricators/{id}             delete
///
/// /dashboard                    derived dashboard views (GET)
/// /calendar                     weekly workload view (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/fabricators", fabricator::router())
        .nest("/dashboard", dashboard::router())
        .nest("/calendar", calendar::router())
}
