//! Repository for the `otp_codes` table.

use sqlx::PgPool;

use crate::models::otp_code::{CreateOtp, OtpCode};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, mobile, code, purpose, consumed, expires_at, created_at, updated_at";

/// Provides ledger operations for one-time codes.
pub struct OtpRepo;

impl OtpRepo {
    /// Record a newly issued code, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateOtp) -> Result<OtpCode, sqlx::Error> {
        let query = format!(
            "INSERT INTO otp_codes (user_id, mobile, code, purpose, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OtpCode>(&query)
            .bind(input.user_id)
            .bind(&input.mobile)
            .bind(&input.code)
            .bind(&input.purpose)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Mark all live codes for the given mobile and purpose consumed.
    ///
    /// Issuance calls this first so at most one code is current per
    /// (mobile, purpose). Returns the number of rows invalidated.
    pub async fn invalidate_active(
        pool: &PgPool,
        mobile: &str,
        purpose: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE otp_codes SET consumed = true, updated_at = NOW()
             WHERE mobile = $1 AND purpose = $2 AND consumed = false AND expires_at > NOW()",
        )
        .bind(mobile)
        .bind(purpose)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Atomically consume the newest live code matching mobile and code.
    ///
    /// The predicate and the consumed flip happen in one statement, so
    /// two concurrent verifications of the same code cannot both win.
    /// Returns `None` when nothing matched; the caller reports that as
    /// a single invalid-or-expired failure without distinguishing why.
    pub async fn consume_matching(
        pool: &PgPool,
        mobile: &str,
        code: &str,
    ) -> Result<Option<OtpCode>, sqlx::Error> {
        let query = format!(
            "UPDATE otp_codes SET consumed = true, updated_at = NOW()
             WHERE id = (
                 SELECT id FROM otp_codes
                 WHERE mobile = $1 AND code = $2 AND consumed = false AND expires_at > NOW()
                 ORDER BY created_at DESC, id DESC
                 LIMIT 1
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OtpCode>(&query)
            .bind(mobile)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Delete rows past their expiry. Returns the number removed.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// List the most recently issued codes, optionally filtered by
    /// mobile, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        mobile: Option<&str>,
        limit: i64,
    ) -> Result<Vec<OtpCode>, sqlx::Error> {
        match mobile {
            Some(mobile) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM otp_codes
                     WHERE mobile = $1
                     ORDER BY created_at DESC, id DESC
                     LIMIT $2"
                );
                sqlx::query_as::<_, OtpCode>(&query)
                    .bind(mobile)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM otp_codes
                     ORDER BY created_at DESC, id DESC
                     LIMIT $1"
                );
                sqlx::query_as::<_, OtpCode>(&query)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
        }
    }
}
