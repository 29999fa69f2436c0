//! Repository for the `addresses` table.

use fieldops_core::types::DbId;
use sqlx::PgPool;

use crate::models::address::{Address, CreateAddress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, address1, address2, city_id, created_at, updated_at";

/// Provides insert and lookup operations for addresses.
pub struct AddressRepo;

impl AddressRepo {
    /// Insert a new address, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAddress) -> Result<Address, sqlx::Error> {
        let query = format!(
            "INSERT INTO addresses (address1, address2, city_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(&input.address1)
            .bind(&input.address2)
            .bind(input.city_id)
            .fetch_one(pool)
            .await
    }

    /// Find an address by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM addresses WHERE id = $1");
        sqlx::query_as::<_, Address>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an address. Returns `true` if a row was removed.
    ///
    /// Used to clean up the orphan row when user creation fails after
    /// the address was already written.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
