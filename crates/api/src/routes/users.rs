//! Route definitions for the `/users` resource (hierarchy operations).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/users` router. Everything here is admin-only.
///
/// ```text
/// POST /{id}/assign-manager       -- set or clear who a user reports to
/// GET  /{id}/subordinates         -- direct reports
/// POST /map/dealer-distributor    -- dealer reports to distributor
/// POST /map/distributor-salesman  -- salesperson reports to distributor
/// POST /map/dealer-salesman       -- salesperson reports to dealer
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}/assign-manager",
            post(handlers::users::assign_manager),
        )
        .route(
            "/{id}/subordinates",
            get(handlers::users::list_subordinates),
        )
        .route(
            "/map/dealer-distributor",
            post(handlers::users::map_dealer_distributor),
        )
        .route(
            "/map/distributor-salesman",
            post(handlers::users::map_distributor_salesman),
        )
        .route(
            "/map/dealer-salesman",
            post(handlers::users::map_dealer_salesman),
        )
}
