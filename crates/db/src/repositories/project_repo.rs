//! Repository for the `projects` table.
//!
//! Projects are never deleted by this layer, so there is no delete method.

use sqlx::types::Json;
use sqlx::PgPool;

use fabshop_core::types::DbId;

use crate::models::project::{Attachment, CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, customer_name, project_type, notes, assigned_to, \
                       start_date, deadline, hours_allocated, hours_used, \
                       progress_percent, status, priority, attachments, \
                       completed_at, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// New projects start as "Not Started" with zero hours used and zero
    /// progress. `assigned_to` defaults to the "Unassigned" sentinel,
    /// `project_type` to "Custom", `priority` to Medium.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (name, customer_name, project_type, notes, assigned_to,
                 start_date, deadline, hours_allocated, priority)
             VALUES ($1, $2, COALESCE($3, 'Custom'), $4, COALESCE($5, 'Unassigned'),
                     $6, $7, $8, COALESCE($9, 'Medium'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.customer_name)
            .bind(&input.project_type)
            .bind(&input.notes)
            .bind(&input.assigned_to)
            .bind(input.start_date)
            .bind(input.deadline)
            .bind(input.hours_allocated)
            .bind(input.priority.map(|p| p.as_str()))
            .fetch_one(pool)
            .await
    }

    /// List all projects, most recently created first (the store's
    /// fetch-all order; views re-sort in memory).
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied.
    ///
    /// `progress_percent` is clamped to [0, 100] on write. Status transition
    /// legality is the handler's responsibility (it has the current row).
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                customer_name = COALESCE($3, customer_name),
                project_type = COALESCE($4, project_type),
                notes = COALESCE($5, notes),
                assigned_to = COALESCE($6, assigned_to),
                start_date = COALESCE($7, start_date),
                deadline = COALESCE($8, deadline),
                hours_allocated = COALESCE($9, hours_allocated),
                hours_used = COALESCE($10, hours_used),
                progress_percent = COALESCE($11, progress_percent),
                status = COALESCE($12, status),
                priority = COALESCE($13, priority)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.customer_name)
            .bind(&input.project_type)
            .bind(&input.notes)
            .bind(&input.assigned_to)
            .bind(input.start_date)
            .bind(input.deadline)
            .bind(input.hours_allocated)
            .bind(input.hours_used)
            .bind(input.progress_percent.map(|p| p.clamp(0, 100)))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.priority.map(|p| p.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// The single "mark complete" transition: forces status to Completed,
    /// progress to 100, hours_used to hours_allocated, and stamps
    /// `completed_at`.
    ///
    /// Returns `None` if the project does not exist or is already Completed
    /// (the transition is not re-runnable).
    pub async fn mark_complete(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                status = 'Completed',
                progress_percent = 100,
                hours_used = hours_allocated,
                completed_at = NOW()
             WHERE id = $1 AND status <> 'Completed'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append an attachment reference to the project's ordered list.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn add_attachment(
        pool: &PgPool,
        id: DbId,
        attachment: &Attachment,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects
             SET attachments = attachments || jsonb_build_array($2::jsonb)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(Json(attachment))
            .fetch_optional(pool)
            .await
    }
}
