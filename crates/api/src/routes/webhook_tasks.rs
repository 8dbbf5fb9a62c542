//! Operator routes for inspecting and managing the webhook task queue.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::webhook_tasks;
use crate::state::AppState;

/// Routes mounted at `/webhook-tasks`.
///
/// ```text
/// GET    /               -> list_tasks
/// GET    /stats          -> task_stats
/// GET    /{id}           -> get_task
/// DELETE /{id}           -> delete_task
/// POST   /{id}/requeue   -> requeue_task
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(webhook_tasks::list_tasks))
        .route("/stats", get(webhook_tasks::task_stats))
        .route(
            "/{id}",
            get(webhook_tasks::get_task).delete(webhook_tasks::delete_task),
        )
        .route("/{id}/requeue", post(webhook_tasks::requeue_task))
}
