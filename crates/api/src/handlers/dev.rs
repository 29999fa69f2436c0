//! Handlers for dev-only tooling.
//!
//! The code ledger inspection endpoint stands in for SMS delivery
//! during local development and testing.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use fieldops_core::error::CoreError;
use fieldops_core::types::Timestamp;
use fieldops_db::repositories::otp_repo::OtpRepo;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::current_user::CurrentUser;
use crate::state::AppState;

/// Default number of ledger rows returned.
const DEFAULT_ROWS: i64 = 5;
/// Cap on ledger rows returned.
const MAX_ROWS: i64 = 20;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /dev/otps`.
#[derive(Debug, Deserialize)]
pub struct DevOtpQuery {
    /// Restrict rows to one mobile number.
    pub mobile: Option<String>,
    pub limit: Option<i64>,
}

/// Response body for `GET /dev/otps`.
#[derive(Debug, Serialize)]
pub struct DevOtpResponse {
    pub count: usize,
    pub rows: Vec<DevOtpRow>,
}

/// One ledger row, raw code included.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevOtpRow {
    pub mobile: String,
    pub code: String,
    pub purpose: String,
    pub consumed: bool,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /dev/otps
///
/// Recent one-time codes, newest first. Sits behind the session gate
/// plus the `x-dev-key` policy: open locally when no key is set,
/// key-matched otherwise, and never open in production without a key.
pub async fn list_otps(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    headers: HeaderMap,
    Query(query): Query<DevOtpQuery>,
) -> AppResult<Json<DevOtpResponse>> {
    let provided = headers.get("x-dev-key").and_then(|v| v.to_str().ok());
    if !dev_access_allowed(&state.config.auth, provided) {
        return Err(AppError::Core(CoreError::Forbidden("Forbidden".into())));
    }

    let limit = query.limit.unwrap_or(DEFAULT_ROWS).clamp(1, MAX_ROWS);
    let rows = OtpRepo::list_recent(&state.pool, query.mobile.as_deref(), limit).await?;

    let rows: Vec<DevOtpRow> = rows
        .into_iter()
        .map(|r| DevOtpRow {
            mobile: r.mobile,
            code: r.code,
            purpose: r.purpose,
            consumed: r.consumed,
            expires_at: r.expires_at,
            created_at: r.created_at,
        })
        .collect();

    Ok(Json(DevOtpResponse {
        count: rows.len(),
        rows,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Dev-key policy. A configured key must always match; without one,
/// access is open outside production and refused in production.
fn dev_access_allowed(auth: &AuthConfig, provided: Option<&str>) -> bool {
    match &auth.dev_admin_key {
        Some(key) => provided == Some(key.as_str()),
        None => !auth.environment.is_production(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;

    fn auth(environment: Environment, dev_admin_key: Option<&str>) -> AuthConfig {
        AuthConfig {
            admin_otp: "555444".to_string(),
            otp_ttl_minutes: 10,
            environment,
            dev_admin_key: dev_admin_key.map(str::to_string),
        }
    }

    #[test]
    fn test_open_access_outside_production_without_key() {
        let config = auth(Environment::Development, None);
        assert!(dev_access_allowed(&config, None));
        assert!(dev_access_allowed(&config, Some("anything")));
    }

    #[test]
    fn test_configured_key_must_match_in_any_environment() {
        for env in [Environment::Development, Environment::Production] {
            let config = auth(env, Some("hunter2"));
            assert!(dev_access_allowed(&config, Some("hunter2")));
            assert!(!dev_access_allowed(&config, Some("wrong")));
            assert!(!dev_access_allowed(&config, None));
        }
    }

    #[test]
    fn test_production_without_key_refuses_everyone() {
        let config = auth(Environment::Production, None);
        assert!(!dev_access_allowed(&config, None));
        assert!(!dev_access_allowed(&config, Some("anything")));
    }
}
