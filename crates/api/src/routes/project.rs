//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`. All require auth.
///
/// ```text
/// GET    /                   -> list
/// POST   /                   -> create
/// GET    /{id}               -> get_by_id
/// PUT    /{id}               -> update
/// POST   /{id}/complete      -> complete
/// GET    /{id}/attachments   -> list_attachments
/// POST   /{id}/attachments   -> upload_attachment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/{id}", get(project::get_by_id).put(project::update))
        .route("/{id}/complete", post(project::complete))
        .route(
            "/{id}/attachments",
            get(project::list_attachments).post(project::upload_attachment),
        )
}
