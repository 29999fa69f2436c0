//! Repository for the `cities` table.

use sqlx::PgPool;

use crate::models::city::City;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides lookup and lazy-create operations for cities.
pub struct CityRepo;

impl CityRepo {
    /// Find a city by name (case-sensitive, exact).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<City>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cities WHERE name = $1");
        sqlx::query_as::<_, City>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a city by exact name, creating it when absent.
    pub async fn find_or_create(pool: &PgPool, name: &str) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (name)
             VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_cities_name
             DO UPDATE SET updated_at = cities.updated_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, City>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
