use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use geowarns_core::stats::parse_time_window;
use geowarns_db::repositories::IncidentStatsRepo;

use crate::error::AppResult;
use crate::query::TimeWindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/incidents/stats?time_window=30
///
/// Distinct users inside each active incident over the trailing window
/// (minutes, default 30). Malformed or negative windows are rejected.
pub async fn get_incident_stats(
    State(state): State<AppState>,
    Query(params): Query<TimeWindowParams>,
) -> AppResult<impl IntoResponse> {
    let minutes = parse_time_window(params.time_window.as_deref())?;

    let stats = IncidentStatsRepo::compute(&state.pool, minutes).await?;

    Ok(Json(DataResponse { data: stats }))
}
