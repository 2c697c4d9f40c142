//! Handlers for the `/projects` resource.
//!
//! Projects are never deleted; the lifecycle ends at Completed. Every
//! successful write publishes a [`StoreEvent`] so connected dashboards
//! refresh.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use fabshop_core::project::state_machine;
use fabshop_core::types::DbId;
use fabshop_db::models::project::{Attachment, CreateProject, Project, UpdateProject};
use fabshop_db::repositories::ProjectRepo;
use fabshop_events::StoreEvent;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if input.deadline < input.start_date {
        return Err(AppError::validation(
            "Deadline must not be before the start date",
        ));
    }

    let project = ProjectRepo::create(&state.pool, &input).await?;

    state
        .event_bus
        .publish(StoreEvent::new("project.created").with_entity("project", project.id));

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
///
/// Partial update. A status change is checked against the lifecycle state
/// machine; illegal transitions (anything out of Completed) return 409.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    let current = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;

    if let Some(new_status) = input.status {
        state_machine::validate_transition(current.status, new_status)
            .map_err(AppError::conflict)?;
    }

    if let (Some(start), Some(deadline)) = (input.start_date, input.deadline) {
        if deadline < start {
            return Err(AppError::validation(
                "Deadline must not be before the start date",
            ));
        }
    }

    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Project", id))?;

    state
        .event_bus
        .publish(StoreEvent::new("project.updated").with_entity("project", project.id));

    Ok(Json(project))
}

/// POST /api/v1/projects/{id}/complete
///
/// The one-shot completion transition: forces progress to 100%, books the
/// full allocation as used, and stamps `completed_at`. Completing an
/// already-completed project is a conflict, not a no-op.
pub async fn complete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let completed = ProjectRepo::mark_complete(&state.pool, id).await?;

    let project = match completed {
        Some(project) => project,
        None => {
            // Either the row is missing or it was already Completed.
            return match ProjectRepo::find_by_id(&state.pool, id).await? {
                Some(_) => Err(AppError::conflict("Project is already completed")),
                None => Err(AppError::not_found("Project", id)),
            };
        }
    };

    state
        .event_bus
        .publish(StoreEvent::new("project.completed").with_entity("project", project.id));

    Ok(Json(project))
}

/// GET /api/v1/projects/{id}/attachments
pub async fn list_attachments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Attachment>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;
    Ok(Json(project.attachments.0))
}

/// POST /api/v1/projects/{id}/attachments
///
/// Accepts a multipart form with a required `file` field. The bytes are
/// written to the attachment store on disk and a reference is appended to
/// the project's attachment list.
pub async fn upload_attachment(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<Project>)> {
    // The row must exist before we accept bytes.
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Project", id))?;

    let mut file_data: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("attachment").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, content_type, data.to_vec()));
        }
    }

    let (filename, content_type, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    // Store under {attachments_dir}/project-{id}/{uuid}-{filename}.
    let relative_dir = format!("project-{id}");
    let stored_name = format!("{}-{filename}", uuid::Uuid::new_v4());
    let storage_dir = std::path::Path::new(&state.config.attachments_dir).join(&relative_dir);
    tokio::fs::create_dir_all(&storage_dir)
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;
    tokio::fs::write(storage_dir.join(&stored_name), &data)
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    let attachment = Attachment {
        name: filename,
        url: format!("/files/{relative_dir}/{stored_name}"),
        path: format!("{relative_dir}/{stored_name}"),
        size: data.len() as i64,
        content_type,
    };

    let project = ProjectRepo::add_attachment(&state.pool, id, &attachment)
        .await?
        .ok_or(AppError::not_found("Project", id))?;

    state
        .event_bus
        .publish(StoreEvent::new("project.attachment_added").with_entity("project", project.id));

    Ok((StatusCode::CREATED, Json(project)))
}
