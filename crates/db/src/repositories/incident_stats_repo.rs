//! Windowed distinct-user counts per active incident.
//!
//! The join cannot be expressed through the per-entity repositories, so it
//! lives here as one parameterized query. Every value is bound; nothing is
//! formatted into the SQL text.

use chrono::TimeDelta;
use geowarns_core::geo::KM_PER_DEGREE;
use geowarns_core::stats::MAX_TIME_WINDOW_MINUTES;
use geowarns_core::types::{DbId, Timestamp};
use sqlx::{FromRow, PgPool};

use crate::models::incident_stat::IncidentStat;

/// One group of the stats join.
#[derive(Debug, FromRow)]
struct StatRow {
    incident_id: DbId,
    user_count: i64,
}

/// Proximity uses the same scaled Euclidean distance as
/// `geowarns_core::geo::is_within`, inclusive at the radius.
const STATS_QUERY: &str = "SELECT
        i.id AS incident_id,
        COUNT(DISTINCT lc.user_id) AS user_count
     FROM incidents i
     LEFT JOIN location_checks lc ON
        lc.checked_at > $1 AND
        lc.checked_at <= $2 AND
        SQRT(POWER(lc.latitude - i.latitude, 2) + POWER(lc.longitude - i.longitude, 2)) * $3
            <= i.radius
     WHERE i.is_active = true
     GROUP BY i.id
     ORDER BY i.id ASC";

pub struct IncidentStatsRepo;

impl IncidentStatsRepo {
    /// Count distinct users per active incident over the trailing window,
    /// anchored at the database clock so the window matches how
    /// `location_checks.checked_at` is stamped.
    pub async fn compute(
        pool: &PgPool,
        time_window_minutes: i64,
    ) -> Result<Vec<IncidentStat>, sqlx::Error> {
        let now: Timestamp = sqlx::query_scalar("SELECT NOW()").fetch_one(pool).await?;
        Self::compute_at(pool, time_window_minutes, now).await
    }

    /// Count distinct users per active incident over `(now - window, now]`.
    ///
    /// Every active incident gets a row; those with no matching checks
    /// report zero. A zero-minute window is empty, so every count is zero.
    /// The window must already be validated as non-negative.
    pub async fn compute_at(
        pool: &PgPool,
        time_window_minutes: i64,
        now: Timestamp,
    ) -> Result<Vec<IncidentStat>, sqlx::Error> {
        let start = window_start(now, time_window_minutes);

        let rows = sqlx::query_as::<_, StatRow>(STATS_QUERY)
            .bind(start)
            .bind(now)
            .bind(KM_PER_DEGREE)
            .fetch_all(pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| IncidentStat {
                incident_id: row.incident_id,
                user_count: row.user_count,
                time_window_minutes,
                last_checked: now,
            })
            .collect())
    }
}

/// Start of the trailing window. The window is clamped to the accepted range
/// so the subtraction always stays within what Postgres can store.
fn window_start(now: Timestamp, minutes: i64) -> Timestamp {
    now - TimeDelta::minutes(minutes.clamp(0, MAX_TIME_WINDOW_MINUTES))
}
