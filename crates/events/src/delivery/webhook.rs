//! Single-attempt webhook delivery.
//!
//! [`WebhookDelivery`] POSTs a JSON [`WebhookPayload`] to the configured URL
//! with a fixed request timeout. Any transport error or HTTP status >= 400
//! is a failure; the response body is ignored. Retries are the queue's
//! concern, not this client's.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use geowarns_core::tasks::EVENT_USER_NEAR_INCIDENT;
use geowarns_core::types::DbId;
use geowarns_db::models::incident::Incident;
use serde::{Deserialize, Serialize};

/// Default HTTP request timeout for a single delivery attempt.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server answered with an error status.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),

    /// The task references an incident that no longer exists.
    #[error("Incident {0} not found")]
    IncidentMissing(DbId),

    /// Loading the data needed to build the payload failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Body of every outbound notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub event: String,
    pub incident: Incident,
    pub user_id: String,
    /// RFC 3339, second precision, UTC.
    pub timestamp: String,
}

impl WebhookPayload {
    /// Build a `user_near_incident` notification stamped with the current time.
    pub fn user_near_incident(incident: Incident, user_id: impl Into<String>) -> Self {
        Self {
            event: EVENT_USER_NEAR_INCIDENT.to_string(),
            incident,
            user_id: user_id.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

// ---------------------------------------------------------------------------
// Sender seam
// ---------------------------------------------------------------------------

/// Something that can push a payload to a webhook URL.
///
/// The dispatcher depends on this trait rather than on the HTTP client so
/// the transport can be swapped out.
#[async_trait]
pub trait WebhookSender: Send + Sync {
    async fn send(&self, url: &str, payload: &WebhookPayload) -> Result<(), WebhookError>;
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Delivers notifications to an external webhook endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct WebhookDelivery {
    client: reqwest::Client,
}

impl WebhookDelivery {
    /// Create a delivery client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, WebhookError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl WebhookSender for WebhookDelivery {
    /// Execute a single POST request and check the response status.
    async fn send(&self, url: &str, payload: &WebhookPayload) -> Result<(), WebhookError> {
        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(WebhookError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
