//! One-time code entity model and DTOs.

use fieldops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `otp_codes` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OtpCode {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub mobile: String,
    pub code: String,
    pub purpose: String,
    pub consumed: bool,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a newly issued code.
#[derive(Debug, Clone)]
pub struct CreateOtp {
    pub user_id: Option<DbId>,
    pub mobile: String,
    pub code: String,
    pub purpose: String,
    pub expires_at: Timestamp,
}
