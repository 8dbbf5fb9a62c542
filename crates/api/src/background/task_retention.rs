//! Periodic cleanup of old webhook tasks.
//!
//! Deletes rows from `webhook_tasks` created before the retention cutoff,
//! whatever their status. Runs on a fixed interval.

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use geowarns_core::tasks::MAX_RETENTION_DAYS;
use geowarns_db::repositories::WebhookTaskRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// How often the cleanup job runs.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run one purge pass. Returns the number of rows deleted.
///
/// `retention_days` is clamped to `1..=MAX_RETENTION_DAYS`.
pub async fn purge_once(pool: &PgPool, retention_days: i64) -> Result<u64, sqlx::Error> {
    let cutoff = Utc::now() - TimeDelta::days(retention_days.clamp(1, MAX_RETENTION_DAYS));
    WebhookTaskRepo::purge_older_than(pool, cutoff).await
}

/// Run the task retention loop until `cancel` is triggered.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Task retention job started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Task retention job stopping");
                break;
            }
            _ = interval.tick() => {
                match purge_once(&pool, retention_days).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Task retention: purged old tasks");
                    }
                    Ok(_) => {
                        tracing::debug!("Task retention: nothing to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Task retention: cleanup failed");
                    }
                }
            }
        }
    }
}
