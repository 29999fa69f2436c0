//! Repository for the `check_ins` table.
//!
//! SELECTs project proof metadata only; the binary payload is fetched
//! exclusively by [`CheckInRepo::find_proof`].

use fieldops_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::check_in::{CheckIn, CheckInProof, CreateCheckIn};

/// Column list shared across queries (proof bytes excluded).
const COLUMNS: &str = "\
    id, salesperson_id, dealer_id, remarks, lat, lng, \
    proof_mime_type, proof_size, proof_captured_at, created_at, updated_at";

/// Filter for check-in listings. Absent fields are not constrained.
#[derive(Debug, Default)]
pub struct CheckInFilter {
    pub salesperson_id: Option<DbId>,
    pub dealer_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

/// Provides insert and query operations for check-ins.
pub struct CheckInRepo;

impl CheckInRepo {
    /// Insert a new check-in, returning the created row without proof bytes.
    pub async fn create(pool: &PgPool, input: &CreateCheckIn) -> Result<CheckIn, sqlx::Error> {
        let query = format!(
            "INSERT INTO check_ins (salesperson_id, dealer_id, remarks, lat, lng, \
                                    proof_data, proof_mime_type, proof_size, proof_captured_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CheckIn>(&query)
            .bind(input.salesperson_id)
            .bind(input.dealer_id)
            .bind(&input.remarks)
            .bind(input.lat)
            .bind(input.lng)
            .bind(&input.proof_data)
            .bind(&input.proof_mime_type)
            .bind(input.proof_size)
            .bind(input.proof_captured_at)
            .fetch_one(pool)
            .await
    }

    /// Find a check-in by internal ID, proof bytes excluded.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CheckIn>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM check_ins WHERE id = $1");
        sqlx::query_as::<_, CheckIn>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the proof payload for a check-in.
    pub async fn find_proof(pool: &PgPool, id: DbId) -> Result<Option<CheckInProof>, sqlx::Error> {
        sqlx::query_as::<_, CheckInProof>(
            "SELECT proof_data, proof_mime_type FROM check_ins WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Query check-ins with filtering and pagination, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &CheckInFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CheckIn>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_check_in_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM check_ins {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_filter_values(sqlx::query_as::<_, CheckIn>(&query), &bind_values);
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Count check-ins matching the given filter (for pagination metadata).
    pub async fn count(pool: &PgPool, filter: &CheckInFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_check_in_filter(filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM check_ins {where_clause}");

        let q = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }
}

/// Typed bind value for dynamically-built check-in queries.
enum BindValue {
    BigInt(i64),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from `CheckInFilter`.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_check_in_filter(filter: &CheckInFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(salesperson_id) = filter.salesperson_id {
        conditions.push(format!("salesperson_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(salesperson_id));
    }

    if let Some(dealer_id) = filter.dealer_id {
        conditions.push(format!("dealer_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(dealer_id));
    }

    if let Some(from) = filter.from {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = filter.to {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_filter_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::BigInt(v) => q = q.bind(*v),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}
