//! Fabricator roster entity model and DTOs.

use fabshop_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A fabricator row from the `fabricators` table.
///
/// Projects reference fabricators by denormalized name, not by id; deleting
/// a row here never touches assigned projects.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fabricator {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for adding a fabricator to the roster.
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct CreateFabricator {
    #[validate(length(min = 1, message = "Fabricator name is required"))]
    pub name: String,
}
