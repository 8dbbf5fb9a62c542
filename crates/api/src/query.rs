//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// `?time_window=` for incident stats, in minutes.
///
/// Kept as a raw string so malformed values surface as validation errors
/// with our own message instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct TimeWindowParams {
    pub time_window: Option<String>,
}

/// `?status=&limit=` for webhook task listings.
#[derive(Debug, Deserialize)]
pub struct TaskListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
}
