//! Route definitions for incidents and their stats.

use axum::routing::get;
use axum::Router;

use crate::handlers::{incidents, stats};
use crate::state::AppState;

/// Routes mounted at `/incidents`.
///
/// ```text
/// GET    /         -> list_incidents
/// POST   /         -> create_incident
/// GET    /stats    -> get_incident_stats
/// GET    /{id}     -> get_incident
/// PUT    /{id}     -> update_incident
/// DELETE /{id}     -> delete_incident
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(incidents::list_incidents).post(incidents::create_incident),
        )
        .route("/stats", get(stats::get_incident_stats))
        .route(
            "/{id}",
            get(incidents::get_incident)
                .put(incidents::update_incident)
                .delete(incidents::delete_incident),
        )
}
