use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    /// Bounds the wait for background jobs after the listener stops.
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, session expiry).
    pub jwt: JwtConfig,
    /// One-time-code policy (admin bypass code, TTL, dev inspection key).
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let auth = AuthConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            auth,
        }
    }
}

/// One-time-code and dev-tooling policy.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Fixed code accepted for Admin-role users (default: `555444`).
    /// Lets the seeded admin sign in without SMS delivery.
    pub admin_otp: String,
    /// One-time-code lifetime in minutes (default: `10`).
    pub otp_ttl_minutes: i64,
    /// Deployment environment. Gates the raw-code debug echo in
    /// issuance responses and the dev inspection endpoint.
    pub environment: Environment,
    /// Key the dev inspection endpoint requires in the `x-dev-key`
    /// header. Unset means open access outside production.
    pub dev_admin_key: Option<String>,
}

impl AuthConfig {
    /// Load auth policy from environment variables with defaults.
    ///
    /// | Env Var           | Default       |
    /// |-------------------|---------------|
    /// | `ADMIN_OTP`       | `555444`      |
    /// | `OTP_TTL_MINUTES` | `10`          |
    /// | `APP_ENV`         | `development` |
    /// | `DEV_ADMIN_KEY`   | unset         |
    pub fn from_env() -> Self {
        let admin_otp = std::env::var("ADMIN_OTP").unwrap_or_else(|_| "555444".into());

        let otp_ttl_minutes: i64 = std::env::var("OTP_TTL_MINUTES")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("OTP_TTL_MINUTES must be a valid i64");

        let environment = Environment::from_env();

        let dev_admin_key = std::env::var("DEV_ADMIN_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        Self {
            admin_otp,
            otp_ttl_minutes,
            environment,
            dev_admin_key,
        }
    }
}

/// Deployment environment derived from `APP_ENV`.
///
/// Anything other than `production` is treated as development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}
