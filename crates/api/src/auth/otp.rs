//! One-time-code issuance and verification.
//!
//! Issuance invalidates any live code for the same mobile and purpose
//! before persisting the new one, so at most one code is current per
//! destination. Admin-role users get the configured fixed code with a
//! long expiry and verify without touching the ledger.

use chrono::{Duration, Utc};
use fieldops_core::error::CoreError;
use fieldops_core::otp::{self, OtpPurpose};
use fieldops_core::roles;
use fieldops_core::types::{DbId, Timestamp};
use fieldops_db::models::otp_code::CreateOtp;
use fieldops_db::repositories::otp_repo::OtpRepo;
use fieldops_db::DbPool;

use crate::config::AuthConfig;
use crate::error::AppResult;

/// Fixed-code lifetime for Admin-role users.
const ADMIN_OTP_EXPIRY_DAYS: i64 = 365;

/// A code issued to a user, with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub code: String,
    pub expires_at: Timestamp,
}

/// Issue a one-time code for the given user and purpose.
///
/// Admin-role users always receive the fixed code so the bootstrap
/// account works without SMS delivery.
pub async fn issue_otp(
    pool: &DbPool,
    auth: &AuthConfig,
    user_id: DbId,
    mobile: &str,
    type_name: &str,
    purpose: OtpPurpose,
) -> AppResult<IssuedOtp> {
    let (code, expires_at) = if roles::is_admin_name(type_name) {
        (
            auth.admin_otp.clone(),
            Utc::now() + Duration::days(ADMIN_OTP_EXPIRY_DAYS),
        )
    } else {
        (
            otp::generate_code(),
            Utc::now() + Duration::minutes(auth.otp_ttl_minutes),
        )
    };

    OtpRepo::invalidate_active(pool, mobile, purpose.as_str()).await?;

    let row = OtpRepo::create(
        pool,
        &CreateOtp {
            user_id: Some(user_id),
            mobile: mobile.to_string(),
            code,
            purpose: purpose.as_str().to_string(),
            expires_at,
        },
    )
    .await?;

    Ok(IssuedOtp {
        code: row.code,
        expires_at: row.expires_at,
    })
}

/// Verify a submitted code for the given user.
///
/// Admin-role users presenting the fixed code pass without consuming
/// anything; everyone else must consume a live ledger row. Wrong and
/// expired codes are reported as one message so callers cannot probe
/// which codes exist.
pub async fn verify_otp(
    pool: &DbPool,
    auth: &AuthConfig,
    mobile: &str,
    type_name: &str,
    code: &str,
) -> AppResult<()> {
    if roles::is_admin_name(type_name) && code == auth.admin_otp {
        return Ok(());
    }

    let consumed = OtpRepo::consume_matching(pool, mobile, code).await?;
    if consumed.is_none() {
        return Err(CoreError::Validation("Invalid or expired OTP".into()).into());
    }
    Ok(())
}
