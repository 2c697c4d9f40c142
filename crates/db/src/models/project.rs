//! Project entity model and DTOs.

use fabshop_core::project::{Priority, ProjectStatus};
use fabshop_core::schedule::ProjectSchedule;
use fabshop_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// An uploaded file's external-storage reference. Stored in the
/// `attachments` JSONB column as an ordered list; the bytes themselves live
/// in the attachment store, not in this row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub url: String,
    pub path: String,
    pub size: i64,
    pub content_type: String,
}

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub customer_name: Option<String>,
    pub project_type: String,
    pub notes: Option<String>,
    /// Fabricator name, or the `"Unassigned"` sentinel. Denormalized: not a
    /// foreign key, so roster deletions never cascade here.
    pub assigned_to: String,
    pub start_date: Date,
    pub deadline: Date,
    pub hours_allocated: i32,
    pub hours_used: i32,
    pub progress_percent: i32,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub attachments: Json<Vec<Attachment>>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectSchedule for Project {
    fn status(&self) -> ProjectStatus {
        self.status
    }
    fn priority(&self) -> Priority {
        self.priority
    }
    fn assigned_to(&self) -> &str {
        &self.assigned_to
    }
    fn start_date(&self) -> Date {
        self.start_date
    }
    fn deadline(&self) -> Date {
        self.deadline
    }
    fn hours_allocated(&self) -> i32 {
        self.hours_allocated
    }
    fn hours_used(&self) -> i32 {
        self.hours_used
    }
    fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }
    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// DTO for creating a new project.
///
/// New projects always start "Not Started" with zero hours used and zero
/// progress; those fields are not accepted from the caller.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "Project name is required"))]
    pub name: String,
    pub customer_name: Option<String>,
    /// Defaults to "Custom" if omitted.
    pub project_type: Option<String>,
    pub notes: Option<String>,
    /// Defaults to "Unassigned" if omitted.
    pub assigned_to: Option<String>,
    pub start_date: Date,
    pub deadline: Date,
    #[validate(range(min = 1, message = "Allocated hours must be positive"))]
    pub hours_allocated: i32,
    /// Defaults to Medium if omitted.
    pub priority: Option<Priority>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub customer_name: Option<String>,
    pub project_type: Option<String>,
    pub notes: Option<String>,
    pub assigned_to: Option<String>,
    pub start_date: Option<Date>,
    pub deadline: Option<Date>,
    pub hours_allocated: Option<i32>,
    pub hours_used: Option<i32>,
    /// Clamped to [0, 100] on write by the repository.
    pub progress_percent: Option<i32>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
}
