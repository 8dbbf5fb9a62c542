pub mod health;
pub mod incidents;
pub mod location;
pub mod webhook_tasks;
pub mod webhooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /incidents                         list, create
/// /incidents/stats                   distinct users per active incident
/// /incidents/{id}                    get, partial update, delete
///
/// /location/check                    submit a location report (POST)
/// /location                          list reports
/// /location/{id}                     get one report
///
/// /webhook-tasks                     list (?status=&limit=)
/// /webhook-tasks/stats               counts per status
/// /webhook-tasks/{id}                get, delete
/// /webhook-tasks/{id}/requeue        reset to pending (POST)
///
/// /webhooks                          inbound webhook intake (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/incidents", incidents::router())
        .nest("/location", location::router())
        .nest("/webhook-tasks", webhook_tasks::router())
        .nest("/webhooks", webhooks::router())
}
