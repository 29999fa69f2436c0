//! City lookup entity model.

use fieldops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `cities` table. Rows are created lazily, keyed by the
/// exact name a registration supplied.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct City {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
