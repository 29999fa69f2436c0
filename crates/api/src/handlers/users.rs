//! Handlers for the reporting-hierarchy endpoints: manager assignment,
//! subordinate listing, and the role-checked mapping shortcuts.

use axum::extract::{Path, State};
use axum::Json;
use fieldops_core::error::CoreError;
use fieldops_core::roles::RoleKind;
use fieldops_core::types::DbId;
use fieldops_db::models::user::{User, UserWithType};
use fieldops_db::repositories::user_repo::UserRepo;
use fieldops_db::repositories::user_type_repo::UserTypeRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users/{id}/assign-manager`.
///
/// Absent `managerId` clears the assignment.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignManagerRequest {
    pub manager_id: Option<DbId>,
}

/// Request body for `POST /users/map/dealer-distributor`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerDistributorRequest {
    pub dealer_id: Option<DbId>,
    pub distributor_id: Option<DbId>,
}

/// Request body for `POST /users/map/distributor-salesman`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributorSalesmanRequest {
    pub distributor_id: Option<DbId>,
    pub salesman_id: Option<DbId>,
}

/// Request body for `POST /users/map/dealer-salesman`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerSalesmanRequest {
    pub dealer_id: Option<DbId>,
    pub salesman_id: Option<DbId>,
}

/// Mutation acknowledgment carrying the updated user.
#[derive(Debug, Serialize)]
pub struct UserUpdateResponse {
    pub message: &'static str,
    pub user: UserDetail,
}

/// User detail with role and manager resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    pub id: DbId,
    pub user_name: String,
    pub email: Option<String>,
    pub primary_mobile: String,
    pub user_type: String,
    pub unique_code: String,
    pub is_active: bool,
    pub manager: Option<ManagerSummary>,
}

/// Minimal manager reference embedded in [`UserDetail`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerSummary {
    pub id: DbId,
    pub user_name: String,
    pub unique_code: String,
}

/// Response body for `GET /users/{id}/subordinates`.
#[derive(Debug, Serialize)]
pub struct SubordinatesResponse {
    pub items: Vec<SubordinateInfo>,
}

/// A direct report, role resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubordinateInfo {
    pub id: DbId,
    pub user_name: String,
    pub email: Option<String>,
    pub primary_mobile: String,
    pub user_type: String,
    pub unique_code: String,
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /users/{id}/assign-manager
///
/// Sets or clears who the user reports to.
pub async fn assign_manager(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<DbId>,
    Json(input): Json<AssignManagerRequest>,
) -> AppResult<Json<UserUpdateResponse>> {
    // 1. Both sides must exist before anything is written.
    if UserRepo::find_by_id(&state.pool, user_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }
    if let Some(manager_id) = input.manager_id {
        if UserRepo::find_by_id(&state.pool, manager_id)
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Manager user",
                id: manager_id,
            }));
        }
    }

    // 2. Write the link (or clear it).
    let user = UserRepo::assign_manager(&state.pool, user_id, input.manager_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    // 3. Answer with role and manager resolved.
    let user = user_detail(&state, user).await?;
    Ok(Json(UserUpdateResponse {
        message: "Manager assignment updated",
        user,
    }))
}

/// GET /users/{id}/subordinates
///
/// Everyone reporting directly to the given user. Unknown ids answer
/// an empty list rather than 404.
pub async fn list_subordinates(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<SubordinatesResponse>> {
    let rows = UserRepo::list_subordinates(&state.pool, user_id).await?;
    let items = rows.into_iter().map(subordinate_info).collect();
    Ok(Json(SubordinatesResponse { items }))
}

/// POST /users/map/dealer-distributor
///
/// Points a dealer at the distributor it reports to.
pub async fn map_dealer_distributor(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<DealerDistributorRequest>,
) -> AppResult<Json<UserUpdateResponse>> {
    // 1. Both ids are required.
    let (dealer_id, distributor_id) = match (input.dealer_id, input.distributor_id) {
        (Some(d), Some(m)) => (d, m),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "dealerId and distributorId are required".into(),
            )))
        }
    };

    // 2. Resolve both sides, then check both roles.
    let dealer = find_party(&state, dealer_id, "Dealer").await?;
    let distributor = find_party(&state, distributor_id, "Distributor").await?;
    require_role(&dealer, RoleKind::Dealer, "dealerId")?;
    require_role(&distributor, RoleKind::Distributor, "distributorId")?;

    // 3. The dealer reports to the distributor.
    let updated = UserRepo::assign_manager(&state.pool, dealer.id, Some(distributor.id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dealer",
            id: dealer_id,
        }))?;

    let user = user_detail(&state, updated).await?;
    Ok(Json(UserUpdateResponse {
        message: "Dealer mapped to Distributor",
        user,
    }))
}

/// POST /users/map/distributor-salesman
///
/// Points a salesperson at the distributor it reports to.
pub async fn map_distributor_salesman(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<DistributorSalesmanRequest>,
) -> AppResult<Json<UserUpdateResponse>> {
    // 1. Both ids are required.
    let (distributor_id, salesman_id) = match (input.distributor_id, input.salesman_id) {
        (Some(d), Some(s)) => (d, s),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "distributorId and salesmanId are required".into(),
            )))
        }
    };

    // 2. Resolve both sides, then check both roles.
    let distributor = find_party(&state, distributor_id, "Distributor").await?;
    let salesman = find_party(&state, salesman_id, "Salesman").await?;
    require_role(&distributor, RoleKind::Distributor, "distributorId")?;
    require_role(&salesman, RoleKind::Salesperson, "salesmanId")?;

    // 3. The salesperson reports to the distributor.
    let updated = UserRepo::assign_manager(&state.pool, salesman.id, Some(distributor.id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Salesman",
            id: salesman_id,
        }))?;

    let user = user_detail(&state, updated).await?;
    Ok(Json(UserUpdateResponse {
        message: "Salesman mapped to Distributor",
        user,
    }))
}

/// POST /users/map/dealer-salesman
///
/// Points a salesperson at the dealer it reports to.
pub async fn map_dealer_salesman(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<DealerSalesmanRequest>,
) -> AppResult<Json<UserUpdateResponse>> {
    // 1. Both ids are required.
    let (dealer_id, salesman_id) = match (input.dealer_id, input.salesman_id) {
        (Some(d), Some(s)) => (d, s),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "dealerId and salesmanId are required".into(),
            )))
        }
    };

    // 2. Resolve both sides, then check both roles.
    let dealer = find_party(&state, dealer_id, "Dealer").await?;
    let salesman = find_party(&state, salesman_id, "Salesman").await?;
    require_role(&dealer, RoleKind::Dealer, "dealerId")?;
    require_role(&salesman, RoleKind::Salesperson, "salesmanId")?;

    // 3. The salesperson reports to the dealer.
    let updated = UserRepo::assign_manager(&state.pool, salesman.id, Some(dealer.id))
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Salesman",
            id: salesman_id,
        }))?;

    let user = user_detail(&state, updated).await?;
    Ok(Json(UserUpdateResponse {
        message: "Salesman mapped to Dealer",
        user,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load one side of a mapping.
async fn find_party(state: &AppState, id: DbId, entity: &'static str) -> AppResult<UserWithType> {
    UserRepo::find_with_type_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity, id }))
}

/// Reject a mapping side whose role does not match, citing the failing
/// parameter so the client knows which side to fix.
fn require_role(user: &UserWithType, kind: RoleKind, param: &'static str) -> AppResult<()> {
    if !kind.matches(&user.type_name) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "{param} is not a {}",
            kind.label()
        ))));
    }
    Ok(())
}

/// Shape a user row with role and manager resolved.
async fn user_detail(state: &AppState, user: User) -> AppResult<UserDetail> {
    let user_type = UserTypeRepo::resolve_name(&state.pool, user.user_type_id).await?;

    let manager = match user.manager_id {
        Some(manager_id) => UserRepo::find_by_id(&state.pool, manager_id)
            .await?
            .map(|m| ManagerSummary {
                id: m.id,
                user_name: m.user_name,
                unique_code: m.unique_code,
            }),
        None => None,
    };

    Ok(UserDetail {
        id: user.id,
        user_name: user.user_name,
        email: user.email,
        primary_mobile: user.primary_mobile,
        user_type,
        unique_code: user.unique_code,
        is_active: user.is_active,
        manager,
    })
}

fn subordinate_info(user: UserWithType) -> SubordinateInfo {
    SubordinateInfo {
        id: user.id,
        user_name: user.user_name,
        email: user.email,
        primary_mobile: user.primary_mobile,
        user_type: user.type_name,
        unique_code: user.unique_code,
        is_active: user.is_active,
    }
}
