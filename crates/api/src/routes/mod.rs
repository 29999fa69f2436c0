//! Route registration for all API endpoints.

pub mod auth;
pub mod check_ins;
pub mod dev;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource router, mounted at the application root.
///
/// Complete route table (liveness endpoints live in [`health`]):
///
/// ```text
/// POST /auth/login                      -- two-phase OTP login
/// POST /auth/register                   -- create account, issue code
/// POST /auth/request-otp                -- issue a fresh code
/// POST /auth/verify-otp                 -- verify a code, mint a session
/// POST /checkins                        -- record a visit (salesperson)
/// GET  /checkins                        -- own visits (salesperson)
/// GET  /checkins/admin                  -- all visits, filtered (admin)
/// GET  /checkins/{id}                   -- one visit (owner or admin)
/// GET  /checkins/{id}/proof             -- proof image (owner or admin)
/// POST /users/{id}/assign-manager       -- set/clear manager (admin)
/// GET  /users/{id}/subordinates         -- direct reports (admin)
/// POST /users/map/dealer-distributor    -- dealer -> distributor (admin)
/// POST /users/map/distributor-salesman  -- salesperson -> distributor (admin)
/// POST /users/map/dealer-salesman       -- salesperson -> dealer (admin)
/// GET  /dev/otps                        -- recent codes (dev-key policy)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router()) // OTP flows and sessions
        .nest("/checkins", check_ins::router()) // dealer visits
        .nest("/users", users::router()) // hierarchy operations
        .nest("/dev", dev::router()) // dev tooling
}
