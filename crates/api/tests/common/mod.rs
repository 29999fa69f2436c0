use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use fieldops_api::auth::jwt::{generate_session_token, JwtConfig};
use fieldops_api::config::{AuthConfig, Environment, ServerConfig};
use fieldops_api::middleware::gate::session_gate;
use fieldops_api::routes;
use fieldops_api::state::AppState;
use fieldops_core::codes;
use fieldops_db::models::user::{CreateUser, User};
use fieldops_db::repositories::user_repo::UserRepo;
use fieldops_db::repositories::user_type_repo::UserTypeRepo;

/// Mobile number of the admin account seeded by the migrations.
pub const SEEDED_ADMIN_MOBILE: &str = "9999999999";

/// Fixed admin code matching the test config's `admin_otp`.
pub const TEST_ADMIN_OTP: &str = "555444";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a fixed JWT secret, development environment, and
/// `http://localhost:5173` as CORS origin (matching the dev default).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: Some("test-secret-that-is-long-enough-for-hmac".to_string()),
            session_expiry_hours: 12,
        },
        auth: AuthConfig {
            admin_otp: TEST_ADMIN_OTP.to_string(),
            otp_ttl_minutes: 10,
            environment: Environment::Development,
            dev_admin_key: None,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Build the router with an explicit config, for tests that need to vary
/// the environment, JWT secret, or dev-key policy.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (session gate, CORS, request ID,
/// timeout, tracing, panic recovery) that production uses.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without credentials.
pub async fn get(app: Router, path: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response {
    let request = Request::builder()
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request without credentials.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON POST request with a bearer token.
pub async fn post_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user with the given role directly in the database.
pub async fn create_user(pool: &PgPool, user_name: &str, mobile: &str, type_name: &str) -> User {
    let user_type = UserTypeRepo::find_or_create(pool, type_name)
        .await
        .expect("user type should resolve");
    let input = CreateUser {
        user_name: user_name.to_string(),
        email: Some(format!("{user_name}@example.test")),
        primary_mobile: mobile.to_string(),
        user_type_id: user_type.id,
        address_id: None,
        unique_code: codes::generate_unique_code(type_name),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Mint a session token for the given user with the test JWT config.
pub fn auth_token(user: &User) -> String {
    let config = test_config();
    generate_session_token(
        user.id,
        &user.primary_mobile,
        user.email.as_deref(),
        &config.jwt,
    )
    .expect("token generation should succeed")
}

/// Session token for the admin account seeded by the migrations.
pub async fn seeded_admin_token(pool: &PgPool) -> String {
    let admin = UserRepo::find_by_mobile(pool, SEEDED_ADMIN_MOBILE)
        .await
        .expect("admin lookup should succeed")
        .expect("migrations must seed the admin account");
    auth_token(&admin)
}
