//! Inbound webhook intake.
//!
//! External systems can enqueue a notification directly by posting a JSON
//! object with a numeric `incident_id` and a string `user_id`. The whole
//! body is kept as the task payload.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use geowarns_core::error::CoreError;
use geowarns_core::types::DbId;
use geowarns_db::models::webhook_task::CreateWebhookTask;
use geowarns_db::repositories::{IncidentRepo, WebhookTaskRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Acknowledgement for an accepted inbound webhook.
#[derive(Debug, Serialize)]
pub struct WebhookAccepted {
    pub status: &'static str,
    pub task_id: DbId,
}

/// POST /api/v1/webhooks
pub async fn receive_webhook(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let (incident_id, user_id) = parse_intake(&body)?;

    if IncidentRepo::find_by_id(&state.pool, incident_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Incident",
            id: incident_id,
        }));
    }

    let input = CreateWebhookTask::new(incident_id, user_id).with_payload(body);
    let task = WebhookTaskRepo::create(&state.pool, &input).await?;

    tracing::info!(
        task_id = task.id,
        incident_id = task.incident_id,
        user_id = %task.user_id,
        "Inbound webhook queued",
    );

    Ok(Json(WebhookAccepted {
        status: "queued",
        task_id: task.id,
    }))
}

/// Pull `incident_id` and `user_id` out of an intake body.
fn parse_intake(body: &serde_json::Value) -> Result<(DbId, String), AppError> {
    if !body.is_object() {
        return Err(AppError::BadRequest("payload must be a JSON object".into()));
    }

    let incident_id = body
        .get("incident_id")
        .and_then(serde_json::Value::as_i64)
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("incident_id must be a positive integer".into()))?;

    let user_id = body
        .get("user_id")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("user_id must be a non-empty string".into()))?;

    Ok((incident_id, user_id.to_string()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_ids_from_object() {
        let (incident_id, user_id) =
            parse_intake(&json!({ "incident_id": 7, "user_id": "u-1", "extra": true })).unwrap();
        assert_eq!(incident_id, 7);
        assert_eq!(user_id, "u-1");
    }

    #[test]
    fn rejects_missing_or_mistyped_fields() {
        assert_matches!(
            parse_intake(&json!({ "user_id": "u-1" })),
            Err(AppError::BadRequest(_))
        );
        assert_matches!(
            parse_intake(&json!({ "incident_id": "7", "user_id": "u-1" })),
            Err(AppError::BadRequest(_))
        );
        assert_matches!(
            parse_intake(&json!({ "incident_id": 7, "user_id": "" })),
            Err(AppError::BadRequest(_))
        );
        assert_matches!(parse_intake(&json!([1, 2])), Err(AppError::BadRequest(_)));
    }
}
