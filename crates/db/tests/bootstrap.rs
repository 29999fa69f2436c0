use fieldops_db::repositories::user_type_repo::UserTypeRepo;
use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    fieldops_db::health_check(&pool).await.unwrap();

    // The four canonical roles are seeded
    let types = UserTypeRepo::list(&pool).await.unwrap();
    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Admin", "Distributor", "Dealer", "Salesperson"]);
}

/// The default administrator exists with the well-known identifiers.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_user_is_seeded(pool: PgPool) {
    let row: (String, String, String) = sqlx::query_as(
        "SELECT u.primary_mobile, u.unique_code, t.name
         FROM users u
         JOIN user_types t ON t.id = u.user_type_id
         WHERE u.email = 'admin@fieldops.local'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert_eq!(row.0, "9999999999");
    assert_eq!(row.1, "ADMIN-001");
    assert_eq!(row.2, "Admin");
}
