//! Handlers for the check-in endpoints: proof-backed dealer visits,
//! paginated listings, and raw proof retrieval.

use std::collections::HashMap;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use fieldops_core::error::CoreError;
use fieldops_core::proof::decode_proof_image;
use fieldops_core::roles;
use fieldops_core::types::{DbId, Timestamp};
use fieldops_db::models::check_in::{CheckIn, CreateCheckIn};
use fieldops_db::models::user::{UserRef, UserWithType};
use fieldops_db::repositories::check_in_repo::{CheckInFilter, CheckInRepo};
use fieldops_db::repositories::user_repo::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::current_user::CurrentUser;
use crate::middleware::rbac::{RequireAdmin, RequireSalesperson};
use crate::response::Page;
use crate::state::AppState;

/// Page-size cap for a salesperson's own listing.
const MAX_PAGE_SIZE: i64 = 100;
/// Page-size cap for the admin listing.
const MAX_ADMIN_PAGE_SIZE: i64 = 200;
/// Default page size for both listings.
const DEFAULT_PAGE_SIZE: i64 = 20;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /checkins`.
///
/// A visit needs GPS coordinates, a proof image, or both. `lat`/`lng`
/// count only as a complete, finite pair.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckInRequest {
    pub dealer_id: Option<DbId>,
    pub remarks: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub proof_image_base64: Option<String>,
    pub proof_mime_type: Option<String>,
    pub proof_captured_at: Option<Timestamp>,
}

/// Query parameters for `GET /checkins`.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Query parameters for `GET /checkins/admin`.
#[derive(Debug, Deserialize)]
pub struct AdminListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Filter by salesperson id.
    pub salesperson: Option<DbId>,
    /// Filter by dealer id.
    pub dealer: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// A check-in with both parties resolved. Proof bytes never appear
/// here; [`ProofInfo`] carries the metadata and the dedicated proof
/// endpoint serves the image.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    pub id: DbId,
    pub salesperson: PartySummary,
    pub dealer: PartySummary,
    pub remarks: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub proof: Option<ProofInfo>,
    pub created_at: Timestamp,
}

/// Minimal party reference embedded in [`CheckInResponse`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySummary {
    pub id: DbId,
    pub user_name: String,
    pub unique_code: String,
}

/// Stored proof metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofInfo {
    pub mime_type: String,
    pub size: i64,
    pub captured_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /checkins
///
/// Records a dealer visit for the authenticated salesperson.
pub async fn create(
    State(state): State<AppState>,
    RequireSalesperson(CurrentUser(me)): RequireSalesperson,
    Json(input): Json<CreateCheckInRequest>,
) -> AppResult<(StatusCode, Json<CheckInResponse>)> {
    // 1. The dealer reference is required and must actually be a dealer.
    let dealer_id = input
        .dealer_id
        .ok_or_else(|| AppError::Core(CoreError::Validation("dealerId is required".into())))?;
    let dealer = UserRepo::find_with_type_by_id(&state.pool, dealer_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Validation("Dealer not found".into())))?;
    if !roles::is_dealer_name(&dealer.type_name) {
        return Err(AppError::Core(CoreError::Validation(
            "dealerId is not a Dealer".into(),
        )));
    }

    // 2. Evidence policy: a finite GPS pair, a proof image, or both.
    let has_gps = matches!(
        (input.lat, input.lng),
        (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite()
    );
    let encoded = input.proof_image_base64.as_deref().filter(|s| !s.is_empty());
    if !has_gps && encoded.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "GPS missing: proofImageBase64 is required".into(),
        )));
    }

    // 3. Decode the proof when supplied.
    let proof = match encoded {
        Some(encoded) => Some(decode_proof_image(
            encoded,
            input.proof_mime_type.as_deref().filter(|m| !m.is_empty()),
        )?),
        None => None,
    };
    let (proof_data, proof_mime_type, proof_size, proof_captured_at) = match proof {
        Some(p) => (
            Some(p.data),
            Some(p.mime_type),
            Some(p.size),
            input.proof_captured_at,
        ),
        None => (None, None, None, None),
    };

    // 4. Persist. Coordinates are stored only as a validated pair.
    let row = CheckInRepo::create(
        &state.pool,
        &CreateCheckIn {
            salesperson_id: me.id,
            dealer_id: dealer.id,
            remarks: input.remarks,
            lat: if has_gps { input.lat } else { None },
            lng: if has_gps { input.lng } else { None },
            proof_data,
            proof_mime_type,
            proof_size,
            proof_captured_at,
        },
    )
    .await?;

    // 5. Answer populated with both parties, which are already in hand.
    let response = check_in_response(
        row,
        PartySummary {
            id: me.id,
            user_name: me.user_name.clone(),
            unique_code: me.unique_code.clone(),
        },
        PartySummary {
            id: dealer.id,
            user_name: dealer.user_name,
            unique_code: dealer.unique_code,
        },
    );
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /checkins
///
/// The authenticated salesperson's own visits, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireSalesperson(CurrentUser(me)): RequireSalesperson,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Page<CheckInResponse>>> {
    let (page, limit, offset) = page_params(query.page, query.limit, MAX_PAGE_SIZE);
    let filter = CheckInFilter {
        salesperson_id: Some(me.id),
        dealer_id: None,
        from: query.from,
        to: query.to,
    };

    let rows = CheckInRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = CheckInRepo::count(&state.pool, &filter).await?;
    let items = populate(&state, rows).await?;

    Ok(Json(Page {
        items,
        page,
        limit,
        total,
    }))
}

/// GET /checkins/admin
///
/// All visits, filterable by salesperson, dealer, and time window.
pub async fn list_admin(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<AdminListQuery>,
) -> AppResult<Json<Page<CheckInResponse>>> {
    let (page, limit, offset) = page_params(query.page, query.limit, MAX_ADMIN_PAGE_SIZE);
    let filter = CheckInFilter {
        salesperson_id: query.salesperson,
        dealer_id: query.dealer,
        from: query.from,
        to: query.to,
    };

    let rows = CheckInRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = CheckInRepo::count(&state.pool, &filter).await?;
    let items = populate(&state, rows).await?;

    Ok(Json(Page {
        items,
        page,
        limit,
        total,
    }))
}

/// GET /checkins/{id}
///
/// Owner or admin only.
pub async fn get_by_id(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CheckInResponse>> {
    let row = CheckInRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Check-in",
            id,
        }))?;

    require_owner_or_admin(&me, row.salesperson_id)?;

    let salesperson = party_ref(&state, row.salesperson_id).await?;
    let dealer = party_ref(&state, row.dealer_id).await?;
    Ok(Json(check_in_response(row, salesperson, dealer)))
}

/// GET /checkins/{id}/proof
///
/// Raw proof image bytes with the stored content type. Owner or admin
/// only; ids without a stored proof answer 404 regardless of caller.
pub async fn get_proof(
    State(state): State<AppState>,
    CurrentUser(me): CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let row = CheckInRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("No proof".into()))?;
    let proof = CheckInRepo::find_proof(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("No proof".into()))?;
    let data = proof
        .proof_data
        .ok_or_else(|| AppError::NotFound("No proof".into()))?;

    require_owner_or_admin(&me, row.salesperson_id)?;

    let mime = proof
        .proof_mime_type
        .unwrap_or_else(|| "application/octet-stream".to_string());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::InternalError(format!("Failed to build proof response: {e}")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalize pagination inputs: page >= 1, limit within `1..=max`.
fn page_params(page: Option<i64>, limit: Option<i64>, max: i64) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, max);
    let offset = (page - 1) * limit;
    (page, limit, offset)
}

/// Visibility rule shared by the detail and proof endpoints.
fn require_owner_or_admin(me: &UserWithType, owner_id: DbId) -> AppResult<()> {
    if me.id != owner_id && !roles::is_admin_name(&me.type_name) {
        return Err(AppError::Core(CoreError::Forbidden("Forbidden".into())));
    }
    Ok(())
}

fn check_in_response(
    row: CheckIn,
    salesperson: PartySummary,
    dealer: PartySummary,
) -> CheckInResponse {
    let proof = match (row.proof_mime_type, row.proof_size) {
        (Some(mime_type), Some(size)) => Some(ProofInfo {
            mime_type,
            size,
            captured_at: row.proof_captured_at,
        }),
        _ => None,
    };

    CheckInResponse {
        id: row.id,
        salesperson,
        dealer,
        remarks: row.remarks,
        lat: row.lat,
        lng: row.lng,
        proof,
        created_at: row.created_at,
    }
}

/// Fetch a single party reference. Referenced users cannot be deleted
/// (FK is RESTRICT), so absence is an internal inconsistency.
async fn party_ref(state: &AppState, id: DbId) -> AppResult<PartySummary> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .map(|u| PartySummary {
            id: u.id,
            user_name: u.user_name,
            unique_code: u.unique_code,
        })
        .ok_or_else(|| {
            AppError::InternalError(format!("User {id} referenced by check-in is missing"))
        })
}

/// Resolve both parties for a page of rows with one batched lookup.
async fn populate(state: &AppState, rows: Vec<CheckIn>) -> AppResult<Vec<CheckInResponse>> {
    let mut ids: Vec<DbId> = Vec::with_capacity(rows.len() * 2);
    for row in &rows {
        ids.push(row.salesperson_id);
        ids.push(row.dealer_id);
    }
    ids.sort_unstable();
    ids.dedup();

    let refs = UserRepo::find_refs_by_ids(&state.pool, &ids).await?;
    let by_id: HashMap<DbId, UserRef> = refs.into_iter().map(|r| (r.id, r)).collect();

    rows.into_iter()
        .map(|row| {
            let salesperson = party_from(&by_id, row.salesperson_id)?;
            let dealer = party_from(&by_id, row.dealer_id)?;
            Ok(check_in_response(row, salesperson, dealer))
        })
        .collect()
}

fn party_from(by_id: &HashMap<DbId, UserRef>, id: DbId) -> AppResult<PartySummary> {
    by_id
        .get(&id)
        .map(|r| PartySummary {
            id: r.id,
            user_name: r.user_name.clone(),
            unique_code: r.unique_code.clone(),
        })
        .ok_or_else(|| {
            AppError::InternalError(format!("User {id} referenced by check-in is missing"))
        })
}
