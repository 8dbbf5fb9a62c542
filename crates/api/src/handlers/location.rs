//! Handlers for location reports.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use geowarns_core::types::DbId;
use geowarns_db::models::location_check::LocationCheckRequest;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/location/check
///
/// Record a report and return it with every active incident it falls
/// inside. One webhook task is enqueued per matched incident.
pub async fn check_location(
    State(state): State<AppState>,
    Json(input): Json<LocationCheckRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.location_service.check_location(&input).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/location
pub async fn list_location_checks(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let checks = state.location_service.list_checks().await?;
    Ok(Json(DataResponse { data: checks }))
}

/// GET /api/v1/location/{id}
pub async fn get_location_check(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let check = state.location_service.get_check(id).await?;
    Ok(Json(DataResponse { data: check }))
}
