//! Derived per-incident statistics. Computed on every request, never stored.

use geowarns_core::types::{DbId, Timestamp};
use serde::Serialize;

/// Distinct users seen inside one incident's geofence over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentStat {
    pub incident_id: DbId,
    pub user_count: i64,
    pub time_window_minutes: i64,
    /// When the stat was computed.
    pub last_checked: Timestamp,
}
