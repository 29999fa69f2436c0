//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/auth` router.
///
/// ```text
/// POST /login        -- two-phase OTP login
/// POST /register     -- create an account, issue a registration code
/// POST /request-otp  -- issue a fresh code for either purpose
/// POST /verify-otp   -- verify a standalone code, mint a session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register))
        .route("/request-otp", post(handlers::auth::request_otp))
        .route("/verify-otp", post(handlers::auth::verify_otp))
}
