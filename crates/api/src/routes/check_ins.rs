//! Route definitions for the `/checkins` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/checkins` router.
///
/// ```text
/// POST /            -- record a visit (salesperson)
/// GET  /            -- own visits, paginated (salesperson)
/// GET  /admin       -- all visits with filters (admin)
/// GET  /{id}        -- single visit (owner or admin)
/// GET  /{id}/proof  -- raw proof image (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::check_ins::create).get(handlers::check_ins::list_mine),
        )
        .route("/admin", get(handlers::check_ins::list_admin))
        .route("/{id}", get(handlers::check_ins::get_by_id))
        .route("/{id}/proof", get(handlers::check_ins::get_proof))
}
