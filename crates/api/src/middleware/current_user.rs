//! Extractor for the user the session gate resolved.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fieldops_core::error::CoreError;
use fieldops_db::models::user::UserWithType;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user attached to the request by the session gate.
///
/// # Example
///
/// ```ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
///     format!("Hello, {}", user.user_name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Arc<UserWithType>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })
    }
}
