//! Route definitions for the `/dev` tooling.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/dev` router.
///
/// ```text
/// GET /otps  -- recent one-time codes (session + dev-key policy)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/otps", get(handlers::dev::list_otps))
}
