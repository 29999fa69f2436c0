/// Database primary key type used across all entities.
pub type DbId = i64;

/// UTC timestamp used across all entities.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
