//! Router-wide session gate.
//!
//! Every request passes through [`session_gate`]. Public (method, path)
//! pairs go straight through; everything else needs a bearer token that
//! validates and resolves to an existing user, which is then attached
//! to the request for [`crate::middleware::current_user::CurrentUser`].

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use fieldops_core::error::CoreError;
use fieldops_db::repositories::user_repo::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::middleware::current_user::CurrentUser;
use crate::state::AppState;

/// Whether a request may pass without a session token.
///
/// The public surface is the four auth endpoints, the liveness
/// endpoints, and CORS preflight.
pub fn is_public_route(method: &Method, path: &str) -> bool {
    if method == Method::OPTIONS {
        return true;
    }
    if method == Method::POST {
        return matches!(
            path,
            "/auth/login" | "/auth/register" | "/auth/request-otp" | "/auth/verify-otp"
        );
    }
    if method == Method::GET {
        return matches!(path, "/" | "/health");
    }
    false
}

/// Session-gate middleware applied to the whole router.
///
/// The role carried by the attached user comes from the database, not
/// the token, so a role change takes effect on the next request.
pub async fn session_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public_route(request.method(), request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(&request)?;
    let claims = validate_token(token, &state.config.jwt).map_err(AppError::Core)?;

    let user = UserRepo::find_with_type_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid token user".into())))?;

    request.extensions_mut().insert(CurrentUser(Arc::new(user)));
    Ok(next.run(request).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(request: &Request) -> Result<&str, AppError> {
    let header = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()))
        })?;

    header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_endpoints_are_public_for_post_only() {
        assert!(is_public_route(&Method::POST, "/auth/login"));
        assert!(is_public_route(&Method::POST, "/auth/register"));
        assert!(is_public_route(&Method::POST, "/auth/request-otp"));
        assert!(is_public_route(&Method::POST, "/auth/verify-otp"));

        assert!(!is_public_route(&Method::GET, "/auth/login"));
        assert!(!is_public_route(&Method::PUT, "/auth/register"));
    }

    #[test]
    fn test_liveness_endpoints_are_public() {
        assert!(is_public_route(&Method::GET, "/"));
        assert!(is_public_route(&Method::GET, "/health"));
        assert!(!is_public_route(&Method::POST, "/health"));
    }

    #[test]
    fn test_preflight_is_always_public() {
        assert!(is_public_route(&Method::OPTIONS, "/checkins"));
        assert!(is_public_route(&Method::OPTIONS, "/users/7/subordinates"));
    }

    #[test]
    fn test_everything_else_is_gated() {
        assert!(!is_public_route(&Method::GET, "/checkins"));
        assert!(!is_public_route(&Method::POST, "/checkins"));
        assert!(!is_public_route(&Method::GET, "/dev/otps"));
        assert!(!is_public_route(&Method::POST, "/users/map/dealer-distributor"));
        // Prefix lookalikes stay gated.
        assert!(!is_public_route(&Method::POST, "/auth/login/extra"));
        assert!(!is_public_route(&Method::GET, "/healthz"));
    }
}
