use chrono::{Duration, Utc};
use fieldops_db::models::otp_code::CreateOtp;
use fieldops_db::repositories::otp_repo::OtpRepo;
use sqlx::PgPool;

fn live_otp(mobile: &str, code: &str, purpose: &str) -> CreateOtp {
    CreateOtp {
        user_id: None,
        mobile: mobile.to_string(),
        code: code.to_string(),
        purpose: purpose.to_string(),
        expires_at: Utc::now() + Duration::minutes(10),
    }
}

fn expired_otp(mobile: &str, code: &str, purpose: &str) -> CreateOtp {
    CreateOtp {
        user_id: None,
        mobile: mobile.to_string(),
        code: code.to_string(),
        purpose: purpose.to_string(),
        expires_at: Utc::now() - Duration::minutes(1),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consume_is_single_use(pool: PgPool) {
    OtpRepo::create(&pool, &live_otp("9876543210", "123456", "login"))
        .await
        .unwrap();

    let first = OtpRepo::consume_matching(&pool, "9876543210", "123456")
        .await
        .unwrap();
    assert!(first.is_some());
    assert!(first.unwrap().consumed);

    // Same pair again: the row is spent.
    let second = OtpRepo::consume_matching(&pool, "9876543210", "123456")
        .await
        .unwrap();
    assert!(second.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consume_rejects_expired_codes(pool: PgPool) {
    OtpRepo::create(&pool, &expired_otp("9876543210", "123456", "login"))
        .await
        .unwrap();

    let result = OtpRepo::consume_matching(&pool, "9876543210", "123456")
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consume_rejects_wrong_code_and_wrong_mobile(pool: PgPool) {
    OtpRepo::create(&pool, &live_otp("9876543210", "123456", "login"))
        .await
        .unwrap();

    assert!(OtpRepo::consume_matching(&pool, "9876543210", "654321")
        .await
        .unwrap()
        .is_none());
    assert!(OtpRepo::consume_matching(&pool, "1112223334", "123456")
        .await
        .unwrap()
        .is_none());

    // The live row is untouched by the failed attempts.
    assert!(OtpRepo::consume_matching(&pool, "9876543210", "123456")
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn consume_picks_the_newest_matching_row(pool: PgPool) {
    let older = OtpRepo::create(&pool, &live_otp("9876543210", "123456", "login"))
        .await
        .unwrap();
    // Force distinct created_at values.
    sqlx::query("UPDATE otp_codes SET created_at = created_at - INTERVAL '1 minute' WHERE id = $1")
        .bind(older.id)
        .execute(&pool)
        .await
        .unwrap();
    let newer = OtpRepo::create(&pool, &live_otp("9876543210", "123456", "login"))
        .await
        .unwrap();

    let consumed = OtpRepo::consume_matching(&pool, "9876543210", "123456")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(consumed.id, newer.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalidate_active_targets_one_mobile_and_purpose(pool: PgPool) {
    OtpRepo::create(&pool, &live_otp("9876543210", "111111", "login"))
        .await
        .unwrap();
    OtpRepo::create(&pool, &live_otp("9876543210", "222222", "register"))
        .await
        .unwrap();
    OtpRepo::create(&pool, &live_otp("1112223334", "333333", "login"))
        .await
        .unwrap();

    let invalidated = OtpRepo::invalidate_active(&pool, "9876543210", "login")
        .await
        .unwrap();
    assert_eq!(invalidated, 1);

    // The login code for that mobile is dead; the others still verify.
    assert!(OtpRepo::consume_matching(&pool, "9876543210", "111111")
        .await
        .unwrap()
        .is_none());
    assert!(OtpRepo::consume_matching(&pool, "9876543210", "222222")
        .await
        .unwrap()
        .is_some());
    assert!(OtpRepo::consume_matching(&pool, "1112223334", "333333")
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_removes_only_expired_rows(pool: PgPool) {
    OtpRepo::create(&pool, &live_otp("9876543210", "111111", "login"))
        .await
        .unwrap();
    OtpRepo::create(&pool, &expired_otp("9876543210", "222222", "login"))
        .await
        .unwrap();
    OtpRepo::create(&pool, &expired_otp("1112223334", "333333", "register"))
        .await
        .unwrap();

    let purged = OtpRepo::purge_expired(&pool).await.unwrap();
    assert_eq!(purged, 2);

    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM otp_codes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_recent_filters_and_limits(pool: PgPool) {
    for i in 0..4 {
        OtpRepo::create(&pool, &live_otp("9876543210", &format!("11111{i}"), "login"))
            .await
            .unwrap();
    }
    OtpRepo::create(&pool, &live_otp("1112223334", "999999", "login"))
        .await
        .unwrap();

    let all = OtpRepo::list_recent(&pool, None, 10).await.unwrap();
    assert_eq!(all.len(), 5);

    let filtered = OtpRepo::list_recent(&pool, Some("9876543210"), 10)
        .await
        .unwrap();
    assert_eq!(filtered.len(), 4);
    assert!(filtered.iter().all(|o| o.mobile == "9876543210"));

    let limited = OtpRepo::list_recent(&pool, None, 2).await.unwrap();
    assert_eq!(limited.len(), 2);
}
