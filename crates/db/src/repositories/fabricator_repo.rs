//! Repository for the `fabricators` roster table.

use sqlx::PgPool;

use fabshop_core::types::DbId;

use crate::models::fabricator::{CreateFabricator, Fabricator};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for the fabricator roster.
pub struct FabricatorRepo;

impl FabricatorRepo {
    /// Insert a new fabricator, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateFabricator,
    ) -> Result<Fabricator, sqlx::Error> {
        let query = format!(
            "INSERT INTO fabricators (name) VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fabricator>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List the roster in name order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Fabricator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fabricators ORDER BY name ASC");
        sqlx::query_as::<_, Fabricator>(&query).fetch_all(pool).await
    }

    /// Find a fabricator by exact name.
    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<Fabricator>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fabricators WHERE name = $1");
        sqlx::query_as::<_, Fabricator>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a fabricator by ID. Returns `true` if a row was removed.
    ///
    /// Non-cascading: projects keep the denormalized name in `assigned_to`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM fabricators WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
