//! User entity model and DTOs.

use fieldops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub user_name: String,
    pub email: Option<String>,
    pub primary_mobile: String,
    pub user_type_id: DbId,
    pub address_id: Option<DbId>,
    pub unique_code: String,
    pub is_active: bool,
    pub manager_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// User row joined with its resolved role name. The gate and the
/// role-checked workflows read this shape so a single query answers
/// both "who" and "what role".
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserWithType {
    pub id: DbId,
    pub user_name: String,
    pub email: Option<String>,
    pub primary_mobile: String,
    pub user_type_id: DbId,
    /// Resolved role name (e.g. `"Admin"`, `"Salesperson"`).
    pub type_name: String,
    pub address_id: Option<DbId>,
    pub unique_code: String,
    pub is_active: bool,
    pub manager_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal user reference used when embedding a party in another
/// entity's response (check-in salesperson/dealer, manager links).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserRef {
    pub id: DbId,
    pub user_name: String,
    pub unique_code: String,
}

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub user_name: String,
    pub email: Option<String>,
    pub primary_mobile: String,
    pub user_type_id: DbId,
    pub address_id: Option<DbId>,
    pub unique_code: String,
}
