//! Webhook task models and DTOs.
//!
//! A webhook task is a delivery intent for one (incident, user) match.
//! There is no idempotency key: every match produces its own row.

use geowarns_core::tasks::TaskStatus;
use geowarns_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A webhook task row from the `webhook_tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct WebhookTask {
    pub id: DbId,
    pub incident_id: DbId,
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub payload: serde_json::Value,
    pub attempts: i32,
    pub next_attempt: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for enqueueing a new task. Tasks always start `pending`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWebhookTask {
    pub incident_id: DbId,
    pub user_id: String,
    /// Opaque context stored with the task; `{}` when there is none.
    #[serde(default = "empty_object")]
    pub payload: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(Default::default())
}

impl CreateWebhookTask {
    pub fn new(incident_id: DbId, user_id: impl Into<String>) -> Self {
        Self {
            incident_id,
            user_id: user_id.into(),
            payload: empty_object(),
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Number of tasks in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow, Serialize)]
pub struct WebhookTaskStats {
    pub pending: i64,
    pub completed: i64,
    pub failed: i64,
}
