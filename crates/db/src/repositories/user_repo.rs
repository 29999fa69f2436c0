//! Repository for the `users` table.

use fieldops_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserRef, UserWithType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_name, email, primary_mobile, user_type_id, address_id, \
                       unique_code, is_active, manager_id, created_at, updated_at";

/// Column list for queries joining the resolved role name.
const JOINED_COLUMNS: &str =
    "u.id, u.user_name, u.email, u.primary_mobile, u.user_type_id, t.name AS type_name, \
     u.address_id, u.unique_code, u.is_active, u.manager_id, u.created_at, u.updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (user_name, email, primary_mobile, user_type_id, address_id, unique_code)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.user_name)
            .bind(&input.email)
            .bind(&input.primary_mobile)
            .bind(input.user_type_id)
            .bind(input.address_id)
            .bind(&input.unique_code)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by primary mobile number.
    pub async fn find_by_mobile(pool: &PgPool, mobile: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE primary_mobile = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(mobile)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Whether any user already holds the given unique code.
    pub async fn unique_code_exists(pool: &PgPool, code: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE unique_code = $1)")
                .bind(code)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }

    /// Find a user by ID with the role name resolved.
    pub async fn find_with_type_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM users u
             JOIN user_types t ON t.id = u.user_type_id
             WHERE u.id = $1"
        );
        sqlx::query_as::<_, UserWithType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by mobile with the role name resolved.
    pub async fn find_with_type_by_mobile(
        pool: &PgPool,
        mobile: &str,
    ) -> Result<Option<UserWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM users u
             JOIN user_types t ON t.id = u.user_type_id
             WHERE u.primary_mobile = $1"
        );
        sqlx::query_as::<_, UserWithType>(&query)
            .bind(mobile)
            .fetch_optional(pool)
            .await
    }

    /// Batch-fetch minimal references for the given user ids.
    ///
    /// Result order is unspecified; callers index the rows by id.
    pub async fn find_refs_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<UserRef>, sqlx::Error> {
        sqlx::query_as::<_, UserRef>(
            "SELECT id, user_name, unique_code FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Set or clear a user's manager reference.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn assign_manager(
        pool: &PgPool,
        id: DbId,
        manager_id: Option<DbId>,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET manager_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(manager_id)
            .fetch_optional(pool)
            .await
    }

    /// List users reporting to the given manager, role names resolved,
    /// most recently created first.
    pub async fn list_subordinates(
        pool: &PgPool,
        manager_id: DbId,
    ) -> Result<Vec<UserWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM users u
             JOIN user_types t ON t.id = u.user_type_id
             WHERE u.manager_id = $1
             ORDER BY u.created_at DESC, u.id DESC"
        );
        sqlx::query_as::<_, UserWithType>(&query)
            .bind(manager_id)
            .fetch_all(pool)
            .await
    }
}
