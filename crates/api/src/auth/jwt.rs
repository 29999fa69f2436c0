//! JWT session-token generation and validation.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload.
//! The signing secret is optional at boot: a server started without
//! `JWT_SECRET` still serves OTP issuance and health checks, and reports
//! the misconfiguration on the token paths instead of refusing to start.

use fieldops_core::error::CoreError;
use fieldops_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's primary mobile number at issue time.
    pub mobile: String,
    /// The user's email at issue time, if any.
    pub email: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for revocation / audit.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens. `None` when
    /// `JWT_SECRET` is absent; token operations then fail with a
    /// misconfiguration error rather than a panic at startup.
    pub secret: Option<String>,
    /// Session token lifetime in hours (default: 12).
    pub session_expiry_hours: i64,
}

/// Default session token expiry in hours.
const DEFAULT_SESSION_EXPIRY_HOURS: i64 = 12;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | no       | --      |
    /// | `JWT_SESSION_EXPIRY_HOURS` | no       | `12`    |
    ///
    /// A missing or empty `JWT_SECRET` is tolerated here so the caller
    /// can log a warning and keep the misconfiguration per-request.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty());

        let session_expiry_hours: i64 = std::env::var("JWT_SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_HOURS.to_string())
            .parse()
            .expect("JWT_SESSION_EXPIRY_HOURS must be a valid i64");

        Self {
            secret,
            session_expiry_hours,
        }
    }

    fn secret(&self) -> Result<&str, CoreError> {
        self.secret
            .as_deref()
            .ok_or_else(|| CoreError::Misconfigured("JWT secret is not configured".into()))
    }
}

/// Generate an HS256 session token for the given user.
///
/// The token contains the user id, mobile, email, issue time,
/// expiration, and a unique `jti` claim.
pub fn generate_session_token(
    user_id: DbId,
    mobile: &str,
    email: Option<&str>,
    config: &JwtConfig,
) -> Result<String, CoreError> {
    let secret = config.secret()?;

    let now = chrono::Utc::now().timestamp();
    let exp = now + config.session_expiry_hours * 3600;

    let claims = Claims {
        sub: user_id,
        mobile: mobile.to_string(),
        email: email.map(str::to_string),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| CoreError::Internal(format!("Token generation failed: {e}")))
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically. All validation
/// failures collapse into a single unauthorized error so callers cannot
/// distinguish a forged token from an expired one.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, CoreError> {
    let secret = config.secret()?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))?;
    Ok(token_data.claims)
}
