//! Operator handlers for the webhook task queue.
//!
//! The dispatcher never retries a failed task on its own; `requeue` is the
//! way to give one another attempt.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use geowarns_core::error::CoreError;
use geowarns_core::pagination::{clamp_limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use geowarns_core::tasks::TaskStatus;
use geowarns_core::types::DbId;
use geowarns_db::repositories::WebhookTaskRepo;

use crate::error::{AppError, AppResult};
use crate::query::TaskListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "WebhookTask",
        id,
    })
}

/// GET /api/v1/webhook-tasks?status=&limit=
///
/// Newest first. `status` narrows to one of `pending`, `completed`, `failed`.
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);

    let tasks = match params.status.as_deref().filter(|s| !s.is_empty()) {
        Some(raw) => {
            let status: TaskStatus = raw.parse()?;
            WebhookTaskRepo::list_by_status(&state.pool, status, limit).await?
        }
        None => WebhookTaskRepo::list(&state.pool, limit).await?,
    };

    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/webhook-tasks/stats
pub async fn task_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = WebhookTaskRepo::stats(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/webhook-tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = WebhookTaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: task }))
}

/// POST /api/v1/webhook-tasks/{id}/requeue
///
/// Put the task back to `pending` for the next dispatcher cycle. The
/// attempt counter is preserved.
pub async fn requeue_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = WebhookTaskRepo::requeue(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        task_id = task.id,
        incident_id = task.incident_id,
        attempts = task.attempts,
        "Webhook task requeued",
    );

    Ok(Json(DataResponse { data: task }))
}

/// DELETE /api/v1/webhook-tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !WebhookTaskRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(task_id = id, "Webhook task deleted");
    Ok(StatusCode::NO_CONTENT)
}
