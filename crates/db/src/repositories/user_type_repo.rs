//! Repository for the `user_types` table.

use fieldops_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_type::UserType;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides lookup and lazy-create operations for user types.
pub struct UserTypeRepo;

impl UserTypeRepo {
    /// Find a user type by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_types WHERE id = $1");
        sqlx::query_as::<_, UserType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user type by name (case-sensitive, exact).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<UserType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_types WHERE name = $1");
        sqlx::query_as::<_, UserType>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a user type by exact name, creating it when absent.
    ///
    /// Registration accepts arbitrary type names; an unseen spelling
    /// becomes a new row rather than an error. The upsert keeps a
    /// concurrent first-use of the same name from failing on the
    /// unique constraint.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<UserType, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_types (name)
             VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_user_types_name
             DO UPDATE SET updated_at = user_types.updated_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserType>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List all user types ordered by ID ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_types ORDER BY id ASC");
        sqlx::query_as::<_, UserType>(&query).fetch_all(pool).await
    }

    /// Resolve a type ID to its name, returning `"unknown"` if the ID is missing.
    pub async fn resolve_name(pool: &PgPool, type_id: DbId) -> Result<String, sqlx::Error> {
        Ok(Self::find_by_id(pool, type_id)
            .await?
            .map(|t| t.name)
            .unwrap_or_else(|| "unknown".to_string()))
    }
}
