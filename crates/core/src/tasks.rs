//! Webhook task lifecycle definitions.
//!
//! A task is created `pending` when a location check falls inside an active
//! incident. The dispatcher moves it to `completed` or `failed` after one
//! delivery attempt. A failed task stays failed until an operator requeues it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Event name carried in every outbound notification.
pub const EVENT_USER_NEAR_INCIDENT: &str = "user_near_incident";

/// Maximum number of pending tasks drained per dispatcher cycle.
pub const PENDING_PAGE_SIZE: i64 = 100;

/// Tasks older than this many days are purged by the housekeeping job.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

/// Upper bound on the retention period (ten years); keeps the cutoff
/// arithmetic in range.
pub const MAX_RETENTION_DAYS: i64 = 10 * 365;

/// Delivery status of a webhook task, stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::Completed,
        TaskStatus::Failed,
    ];

    /// The value stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown task status '{s}', expected one of pending, completed, failed"
                ))
            })
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
