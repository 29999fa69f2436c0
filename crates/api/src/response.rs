//! Shared response envelope types for API handlers.
//!
//! Listing endpoints all answer with the same `{ items, page, limit,
//! total }` shape. Use [`Page`] instead of ad-hoc `serde_json::json!`
//! maps to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard paginated listing envelope.
///
/// `total` is the full row count for the active filter, independent of
/// pagination, so clients can compute page counts.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Page { items, page, limit, total }))
/// ```
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}
