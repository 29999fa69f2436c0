//! Periodic purge of expired one-time codes.
//!
//! Spawns a background task that deletes `otp_codes` rows whose expiry
//! has passed. Consumed-but-live rows stay visible to the dev
//! inspection endpoint until they expire. Runs on a fixed interval
//! using `tokio::time::interval`.

use std::time::Duration;

use fieldops_db::repositories::otp_repo::OtpRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Default purge interval: 15 minutes.
const DEFAULT_PURGE_INTERVAL_SECS: u64 = 900;

/// Run the expired-code purge loop.
///
/// The interval can be overridden with `OTP_PURGE_INTERVAL_SECS`.
/// Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("OTP_PURGE_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PURGE_INTERVAL_SECS);

    tracing::info!(interval_secs, "OTP purge job started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("OTP purge job stopping");
                break;
            }
            _ = interval.tick() => {
                match OtpRepo::purge_expired(&pool).await {
                    Ok(purged) => {
                        if purged > 0 {
                            tracing::info!(purged, "OTP purge: removed expired codes");
                        } else {
                            tracing::debug!("OTP purge: no rows to remove");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "OTP purge: cleanup failed");
                    }
                }
            }
        }
    }
}
