//! Role-based access control extractors.
//!
//! Wrap [`CurrentUser`] and reject with 403 when the resolved role does
//! not match. Role names are compared case-insensitively, and the
//! salesperson check accepts the synonyms field teams actually type.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fieldops_core::error::CoreError;
use fieldops_core::roles;

use crate::error::AppError;
use crate::middleware::current_user::CurrentUser;
use crate::state::AppState;

/// Extractor that requires the authenticated user to hold the `Admin` role.
///
/// # Example
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> impl IntoResponse {
///     // user is guaranteed to be an admin here
/// }
/// ```
pub struct RequireAdmin(pub CurrentUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !roles::is_admin_name(&user.0.type_name) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Extractor that requires a salesperson-type role.
pub struct RequireSalesperson(pub CurrentUser);

impl FromRequestParts<AppState> for RequireSalesperson {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !roles::is_salesperson_name(&user.0.type_name) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Salesperson role required".into(),
            )));
        }
        Ok(RequireSalesperson(user))
    }
}
