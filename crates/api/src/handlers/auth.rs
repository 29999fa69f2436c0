//! Handlers for authentication endpoints: OTP-based login, user
//! registration, and the standalone code request/verify pair.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fieldops_core::codes;
use fieldops_core::error::CoreError;
use fieldops_core::otp::{mask_mobile, OtpPurpose};
use fieldops_core::types::{DbId, Timestamp};
use fieldops_db::models::address::CreateAddress;
use fieldops_db::models::user::{CreateUser, UserWithType};
use fieldops_db::repositories::address_repo::AddressRepo;
use fieldops_db::repositories::city_repo::CityRepo;
use fieldops_db::repositories::user_repo::UserRepo;
use fieldops_db::repositories::user_type_repo::UserTypeRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_session_token;
use crate::auth::otp as otp_flow;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
///
/// `code` absent means phase one (issue a code); present means phase
/// two (verify it).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub mobile: Option<String>,
    pub code: Option<String>,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub primary_mobile: Option<String>,
    pub type_name: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city_name: Option<String>,
}

/// Request body for `POST /auth/request-otp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOtpRequest {
    pub mobile: Option<String>,
    pub purpose: Option<String>,
}

/// Request body for `POST /auth/verify-otp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub mobile: Option<String>,
    pub code: Option<String>,
}

/// Issuance acknowledgment. The mobile comes back masked to all but
/// the last four digits.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpIssuedResponse {
    pub message: &'static str,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_otp: Option<DebugOtp>,
}

/// Raw code echo, only present outside production.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugOtp {
    pub code: String,
    pub expires_at: Timestamp,
}

/// Successful session response for login and verify.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub message: &'static str,
    pub token: String,
    pub user: UserSummary,
}

/// Public user summary embedded in session responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: DbId,
    pub user_name: String,
    pub email: Option<String>,
    pub unique_code: String,
}

/// Response body for `POST /auth/register`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: RegisteredUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug_otp: Option<DebugOtp>,
}

/// Newly registered account, mobile masked.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: DbId,
    pub email: Option<String>,
    pub user_name: String,
    pub unique_code: String,
    pub primary_mobile: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/login
///
/// Two-phase OTP login. Without `code`, issues a login code and
/// acknowledges with the mobile masked; with `code`, verifies it and
/// answers with a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    // 1. Mobile is required in both phases.
    let mobile = non_empty(input.mobile.as_deref())
        .ok_or_else(|| AppError::Core(CoreError::Validation("mobile is required".into())))?;

    // 2. Resolve the account and refuse deactivated ones.
    let user = UserRepo::find_with_type_by_mobile(&state.pool, mobile)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden("User is inactive".into())));
    }

    // 3. Phase one: no code submitted, issue one.
    let Some(code) = non_empty(input.code.as_deref()) else {
        let issued = otp_flow::issue_otp(
            &state.pool,
            &state.config.auth,
            user.id,
            &user.primary_mobile,
            &user.type_name,
            OtpPurpose::Login,
        )
        .await?;
        return Ok(Json(OtpIssuedResponse {
            message: "OTP sent",
            mobile: mask_mobile(&user.primary_mobile),
            debug_otp: debug_echo(&state, &issued),
        })
        .into_response());
    };

    // 4. Phase two: verify the code and mint a session.
    otp_flow::verify_otp(
        &state.pool,
        &state.config.auth,
        &user.primary_mobile,
        &user.type_name,
        code,
    )
    .await?;

    let response = session_response("Login successful", &state, &user)?;
    Ok(Json(response).into_response())
}

/// POST /auth/register
///
/// Creates an account with a role-prefixed unique code, optionally with
/// an address, then issues a registration code to the new mobile.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    // 1. Required fields.
    let (user_name, primary_mobile, type_name) = match (
        non_empty(input.user_name.as_deref()),
        non_empty(input.primary_mobile.as_deref()),
        non_empty(input.type_name.as_deref()),
    ) {
        (Some(u), Some(m), Some(t)) => (u, m, t),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "userName, primaryMobile, typeName are required".into(),
            )))
        }
    };

    // 2. Uniqueness checks, email first so its conflict wins when both collide.
    let email = non_empty(input.email.as_deref());
    if let Some(email) = email {
        if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
            return Err(AppError::Core(CoreError::Conflict(
                "Email already registered".into(),
            )));
        }
    }
    if UserRepo::find_by_mobile(&state.pool, primary_mobile)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Mobile already registered".into(),
        )));
    }

    // 3. Resolve the role, creating it on first use.
    let user_type = UserTypeRepo::find_or_create(&state.pool, type_name).await?;

    // 4. Optional address.
    let address_id = create_address(&state, &input).await?;

    // 5. Role-prefixed unique code, retried against collisions.
    let unique_code = allocate_unique_code(&state, type_name).await?;

    // 6. Create the user. On failure the address row has no owner, so
    //    remove it before propagating.
    let create = CreateUser {
        user_name: user_name.to_string(),
        email: email.map(str::to_string),
        primary_mobile: primary_mobile.to_string(),
        user_type_id: user_type.id,
        address_id,
        unique_code,
    };
    let user = match UserRepo::create(&state.pool, &create).await {
        Ok(user) => user,
        Err(err) => {
            if let Some(address_id) = address_id {
                if let Err(cleanup) = AddressRepo::delete(&state.pool, address_id).await {
                    tracing::warn!(error = %cleanup, address_id, "Failed to remove orphan address");
                }
            }
            return Err(err.into());
        }
    };

    // 7. Issue the registration code.
    let issued = otp_flow::issue_otp(
        &state.pool,
        &state.config.auth,
        user.id,
        &user.primary_mobile,
        &user_type.name,
        OtpPurpose::Register,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered. OTP sent to mobile.",
            user: RegisteredUser {
                id: user.id,
                email: user.email,
                user_name: user.user_name,
                unique_code: user.unique_code,
                primary_mobile: mask_mobile(&user.primary_mobile),
            },
            debug_otp: debug_echo(&state, &issued),
        }),
    ))
}

/// POST /auth/request-otp
///
/// Issues a fresh code for an existing account, for either purpose.
pub async fn request_otp(
    State(state): State<AppState>,
    Json(input): Json<RequestOtpRequest>,
) -> AppResult<Json<OtpIssuedResponse>> {
    // 1. Both fields are required and the purpose must be known.
    let (mobile, purpose) = match (
        non_empty(input.mobile.as_deref()),
        non_empty(input.purpose.as_deref()),
    ) {
        (Some(m), Some(p)) => (m, p),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "mobile and purpose are required".into(),
            )))
        }
    };
    let purpose = OtpPurpose::parse(purpose).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "purpose must be 'register' or 'login'".into(),
        ))
    })?;

    // 2. Only known accounts get codes.
    let user = UserRepo::find_with_type_by_mobile(&state.pool, mobile)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    // 3. Issue and acknowledge with the mobile masked.
    let issued = otp_flow::issue_otp(
        &state.pool,
        &state.config.auth,
        user.id,
        &user.primary_mobile,
        &user.type_name,
        purpose,
    )
    .await?;

    Ok(Json(OtpIssuedResponse {
        message: "OTP sent",
        mobile: mask_mobile(&user.primary_mobile),
        debug_otp: debug_echo(&state, &issued),
    }))
}

/// POST /auth/verify-otp
///
/// Verifies a standalone code and answers with a session token.
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(input): Json<VerifyOtpRequest>,
) -> AppResult<Json<SessionResponse>> {
    // 1. Both fields are required.
    let (mobile, code) = match (
        non_empty(input.mobile.as_deref()),
        non_empty(input.code.as_deref()),
    ) {
        (Some(m), Some(c)) => (m, c),
        _ => {
            return Err(AppError::Core(CoreError::Validation(
                "mobile and code are required".into(),
            )))
        }
    };

    // 2. Resolve the account.
    let user = UserRepo::find_with_type_by_mobile(&state.pool, mobile)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    // 3. Verify the code and mint a session.
    otp_flow::verify_otp(
        &state.pool,
        &state.config.auth,
        &user.primary_mobile,
        &user.type_name,
        code,
    )
    .await?;

    Ok(Json(session_response("OTP verified", &state, &user)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Treat absent and empty-string fields the same way.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Echo the raw code outside production so local clients and tests can
/// complete flows without SMS delivery.
fn debug_echo(state: &AppState, issued: &otp_flow::IssuedOtp) -> Option<DebugOtp> {
    if state.config.auth.environment.is_production() {
        return None;
    }
    Some(DebugOtp {
        code: issued.code.clone(),
        expires_at: issued.expires_at,
    })
}

/// Mint a session token and shape the `{ message, token, user }` body.
fn session_response(
    message: &'static str,
    state: &AppState,
    user: &UserWithType,
) -> AppResult<SessionResponse> {
    let token = generate_session_token(
        user.id,
        &user.primary_mobile,
        user.email.as_deref(),
        &state.config.jwt,
    )?;

    Ok(SessionResponse {
        message,
        token,
        user: UserSummary {
            id: user.id,
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            unique_code: user.unique_code.clone(),
        },
    })
}

/// Create an address row when any address field was submitted.
async fn create_address(state: &AppState, input: &RegisterRequest) -> AppResult<Option<DbId>> {
    let address1 = non_empty(input.address1.as_deref());
    let address2 = non_empty(input.address2.as_deref());
    let city_name = non_empty(input.city_name.as_deref());

    if address1.is_none() && address2.is_none() && city_name.is_none() {
        return Ok(None);
    }

    let city_id = match city_name {
        Some(name) => Some(CityRepo::find_or_create(&state.pool, name).await?.id),
        None => None,
    };

    let address = AddressRepo::create(
        &state.pool,
        &CreateAddress {
            address1: address1.map(str::to_string),
            address2: address2.map(str::to_string),
            city_id,
        },
    )
    .await?;
    Ok(Some(address.id))
}

/// Generate a role-prefixed unique code, retrying on collision.
async fn allocate_unique_code(state: &AppState, type_name: &str) -> AppResult<String> {
    for _ in 0..codes::UNIQUE_CODE_MAX_ATTEMPTS {
        let candidate = codes::generate_unique_code(type_name);
        if !UserRepo::unique_code_exists(&state.pool, &candidate).await? {
            return Ok(candidate);
        }
    }
    Err(AppError::Core(CoreError::Internal(
        "Failed to generate unique user code".into(),
    )))
}
