//! Address entity model and DTOs.

use fieldops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `addresses` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Address {
    pub id: DbId,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new address.
#[derive(Debug, Clone)]
pub struct CreateAddress {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city_id: Option<DbId>,
}
