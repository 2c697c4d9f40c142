//! Handlers for the `/fabricators` roster resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fabshop_core::types::DbId;
use fabshop_db::models::fabricator::{CreateFabricator, Fabricator};
use fabshop_db::repositories::FabricatorRepo;
use fabshop_events::StoreEvent;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/fabricators
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateFabricator>,
) -> AppResult<(StatusCode, Json<Fabricator>)> {
    input
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let fabricator = FabricatorRepo::create(&state.pool, &input).await?;

    state
        .event_bus
        .publish(StoreEvent::new("fabricator.created").with_entity("fabricator", fabricator.id));

    Ok((StatusCode::CREATED, Json(fabricator)))
}

/// GET /api/v1/fabricators
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Fabricator>>> {
    let fabricators = FabricatorRepo::list(&state.pool).await?;
    Ok(Json(fabricators))
}

/// DELETE /api/v1/fabricators/{id}
///
/// Removes the roster entry only. Projects keep the denormalized name in
/// `assigned_to`; nothing cascades.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FabricatorRepo::delete(&state.pool, id).await?;
    if deleted {
        state
            .event_bus
            .publish(StoreEvent::new("fabricator.deleted").with_entity("fabricator", id));
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Fabricator", id))
    }
}
