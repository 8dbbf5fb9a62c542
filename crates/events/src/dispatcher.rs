//! Background webhook dispatcher.
//!
//! Polls for pending tasks every `poll_interval` and delivers up to
//! [`PENDING_PAGE_SIZE`] of them per cycle, with at most `concurrency`
//! requests in flight. A cycle finishes before the next tick is taken, so
//! two cycles never read the same pending page concurrently.
//!
//! Each attempt ends in exactly one terminal status. There is no automatic
//! retry: a failed task stays failed until it is requeued by an operator.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use geowarns_core::tasks::{TaskStatus, PENDING_PAGE_SIZE};
use geowarns_core::types::DbId;
use geowarns_db::models::webhook_task::WebhookTask;
use geowarns_db::repositories::{IncidentRepo, WebhookTaskRepo};
use geowarns_db::DbPool;
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::delivery::webhook::{WebhookError, WebhookPayload, WebhookSender};

/// Default polling interval for the dispatcher loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Default cap on simultaneous outbound requests within one cycle.
pub const DEFAULT_CONCURRENCY: usize = 16;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Result of delivering one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskOutcome {
    pub task_id: DbId,
    pub status: TaskStatus,
    /// `false` when writing the status back failed or the row was gone.
    pub recorded: bool,
}

/// Totals for one dispatcher cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub fetched: usize,
    pub completed: usize,
    pub failed: usize,
    pub status_errors: usize,
}

impl DispatchSummary {
    fn from_outcomes(outcomes: &[TaskOutcome]) -> Self {
        let mut summary = Self {
            fetched: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome.status {
                TaskStatus::Completed => summary.completed += 1,
                TaskStatus::Failed => summary.failed += 1,
                TaskStatus::Pending => {}
            }
            if !outcome.recorded {
                summary.status_errors += 1;
            }
        }
        summary
    }
}

// ---------------------------------------------------------------------------
// WebhookDispatcher
// ---------------------------------------------------------------------------

/// Drains the pending webhook task queue on a fixed timer.
pub struct WebhookDispatcher {
    pool: DbPool,
    sender: Arc<dyn WebhookSender>,
    webhook_url: String,
    poll_interval: Duration,
    concurrency: usize,
}

impl WebhookDispatcher {
    /// Create a dispatcher with the default 30-second interval and
    /// concurrency cap.
    pub fn new(pool: DbPool, sender: Arc<dyn WebhookSender>, webhook_url: impl Into<String>) -> Self {
        Self {
            pool,
            sender,
            webhook_url: webhook_url.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn with_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set the in-flight request cap. Values below one are raised to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run the dispatcher loop until the cancellation token is triggered.
    ///
    /// The first cycle runs immediately. A cycle already in progress is not
    /// interrupted; the caller bounds how long it waits for it on shutdown.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            concurrency = self.concurrency,
            webhook_url = %self.webhook_url,
            "Webhook dispatcher started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Webhook dispatcher shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    match self.process_pending_tasks().await {
                        Ok(summary) if summary.fetched > 0 => {
                            tracing::info!(
                                fetched = summary.fetched,
                                completed = summary.completed,
                                failed = summary.failed,
                                status_errors = summary.status_errors,
                                "Dispatch cycle finished",
                            );
                        }
                        Ok(_) => tracing::debug!("Dispatch cycle found no pending tasks"),
                        Err(e) => tracing::error!(error = %e, "Failed to process webhook tasks"),
                    }
                }
            }
        }
    }

    /// One dispatch cycle: fetch a page of pending tasks and deliver each.
    ///
    /// Only the initial fetch can fail the cycle. Delivery and status-write
    /// failures are logged per task and counted in the summary.
    pub async fn process_pending_tasks(&self) -> Result<DispatchSummary, sqlx::Error> {
        let tasks = WebhookTaskRepo::list_pending(&self.pool, PENDING_PAGE_SIZE).await?;
        if tasks.is_empty() {
            return Ok(DispatchSummary::default());
        }

        let outcomes: Vec<TaskOutcome> = stream::iter(tasks)
            .map(|task| self.deliver_task(task))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        Ok(DispatchSummary::from_outcomes(&outcomes))
    }

    /// Attempt one delivery and record its terminal status.
    async fn deliver_task(&self, task: WebhookTask) -> TaskOutcome {
        let status = match self.attempt(&task).await {
            Ok(()) => TaskStatus::Completed,
            Err(e) => {
                tracing::warn!(
                    task_id = task.id,
                    incident_id = task.incident_id,
                    user_id = %task.user_id,
                    error = %e,
                    "Failed to send webhook",
                );
                TaskStatus::Failed
            }
        };

        let recorded = match WebhookTaskRepo::record_attempt(&self.pool, task.id, status).await {
            Ok(true) => true,
            Ok(false) => {
                tracing::warn!(task_id = task.id, %status, "Webhook task disappeared before update");
                false
            }
            Err(e) => {
                tracing::error!(
                    task_id = task.id,
                    %status,
                    error = %e,
                    "Failed to update webhook task status",
                );
                false
            }
        };

        TaskOutcome {
            task_id: task.id,
            status,
            recorded,
        }
    }

    /// Resolve the incident, build the payload, and send it.
    async fn attempt(&self, task: &WebhookTask) -> Result<(), WebhookError> {
        let incident = IncidentRepo::find_by_id(&self.pool, task.incident_id)
            .await?
            .ok_or(WebhookError::IncidentMissing(task.incident_id))?;

        let payload = WebhookPayload::user_near_incident(incident, task.user_id.clone());
        self.sender.send(&self.webhook_url, &payload).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
