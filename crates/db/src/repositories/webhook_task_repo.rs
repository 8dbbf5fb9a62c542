//! Repository for the `webhook_tasks` table.
//!
//! The task queue owns these rows. After creation only the dispatcher (and
//! an explicit operator requeue) writes `status`; every write is a single
//! row update keyed by task id.

use geowarns_core::tasks::TaskStatus;
use geowarns_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::webhook_task::{CreateWebhookTask, WebhookTask, WebhookTaskStats};

/// Column list for webhook_tasks queries.
const COLUMNS: &str = "id, incident_id, user_id, status, payload, attempts, next_attempt, \
    created_at, updated_at";

/// Provides queue and administrative operations for webhook tasks.
pub struct WebhookTaskRepo;

impl WebhookTaskRepo {
    /// Enqueue a new task with status `pending`, zero attempts, and
    /// `next_attempt = NOW()`.
    ///
    /// Not idempotent: repeated calls for the same pair create distinct rows.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWebhookTask,
    ) -> Result<WebhookTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO webhook_tasks (incident_id, user_id, status, payload)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebhookTask>(&query)
            .bind(input.incident_id)
            .bind(&input.user_id)
            .bind(TaskStatus::Pending.as_str())
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// Oldest-first page of pending tasks. Feeds the dispatcher.
    pub async fn list_pending(pool: &PgPool, limit: i64) -> Result<Vec<WebhookTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webhook_tasks
             WHERE status = $1
             ORDER BY created_at ASC, id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, WebhookTask>(&query)
            .bind(TaskStatus::Pending.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Newest-first page of tasks in `status`.
    pub async fn list_by_status(
        pool: &PgPool,
        status: TaskStatus,
        limit: i64,
    ) -> Result<Vec<WebhookTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webhook_tasks
             WHERE status = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, WebhookTask>(&query)
            .bind(status.as_str())
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Newest-first page of tasks in any status.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<WebhookTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM webhook_tasks
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, WebhookTask>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WebhookTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM webhook_tasks WHERE id = $1");
        sqlx::query_as::<_, WebhookTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the status and refresh `updated_at`. Leaves `attempts` alone.
    ///
    /// Returns `true` if a row was updated.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: TaskStatus,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE webhook_tasks SET status = $1, updated_at = NOW() WHERE id = $2")
                .bind(status.as_str())
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record the outcome of one delivery attempt: set the status, bump
    /// `attempts`, and refresh `updated_at` in a single row write.
    ///
    /// Returns `true` if a row was updated.
    pub async fn record_attempt(
        pool: &PgPool,
        id: DbId,
        status: TaskStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE webhook_tasks
             SET status = $1, attempts = attempts + 1, updated_at = NOW()
             WHERE id = $2",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reset a task to `pending` so the next dispatcher cycle retries it.
    ///
    /// Returns the updated row, or `None` if not found.
    pub async fn requeue(pool: &PgPool, id: DbId) -> Result<Option<WebhookTask>, sqlx::Error> {
        let query = format!(
            "UPDATE webhook_tasks
             SET status = $1, next_attempt = NOW(), updated_at = NOW()
             WHERE id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WebhookTask>(&query)
            .bind(TaskStatus::Pending.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task by its ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM webhook_tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete tasks created before `cutoff`, regardless of status.
    ///
    /// Returns the number of rows deleted.
    pub async fn purge_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM webhook_tasks WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count tasks in each status.
    pub async fn stats(pool: &PgPool) -> Result<WebhookTaskStats, sqlx::Error> {
        sqlx::query_as::<_, WebhookTaskStats>(
            "SELECT
                COUNT(*) FILTER (WHERE status = 'pending')   AS pending,
                COUNT(*) FILTER (WHERE status = 'completed') AS completed,
                COUNT(*) FILTER (WHERE status = 'failed')    AS failed
             FROM webhook_tasks",
        )
        .fetch_one(pool)
        .await
    }
}
