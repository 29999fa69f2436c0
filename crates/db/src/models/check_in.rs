//! Check-in entity model and DTOs.
//!
//! The entity struct carries proof metadata only. Proof bytes are
//! selected exclusively through [`CheckInProof`] so list and detail
//! queries never drag image payloads through the pool.

use fieldops_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `check_ins` table, proof bytes excluded.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CheckIn {
    pub id: DbId,
    pub salesperson_id: DbId,
    pub dealer_id: DbId,
    pub remarks: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub proof_mime_type: Option<String>,
    pub proof_size: Option<i64>,
    pub proof_captured_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Proof payload for the binary proof endpoint.
#[derive(Debug, Clone, FromRow)]
pub struct CheckInProof {
    pub proof_data: Option<Vec<u8>>,
    pub proof_mime_type: Option<String>,
}

/// DTO for recording a new check-in.
#[derive(Debug, Clone)]
pub struct CreateCheckIn {
    pub salesperson_id: DbId,
    pub dealer_id: DbId,
    pub remarks: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub proof_data: Option<Vec<u8>>,
    pub proof_mime_type: Option<String>,
    pub proof_size: Option<i64>,
    pub proof_captured_at: Option<Timestamp>,
}
