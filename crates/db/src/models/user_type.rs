//! User type (role) entity model.

use fieldops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `user_types` table.
///
/// The canonical rows are seeded by migration; additional types are
/// created lazily when a registration names one that does not exist.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserType {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
