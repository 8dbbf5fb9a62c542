//! Handlers for incident CRUD.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use geowarns_core::error::CoreError;
use geowarns_core::types::DbId;
use geowarns_db::models::incident::{CreateIncident, UpdateIncident};
use geowarns_db::repositories::IncidentRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Incident",
        id,
    })
}

/// POST /api/v1/incidents
pub async fn create_incident(
    State(state): State<AppState>,
    Json(input): Json<CreateIncident>,
) -> AppResult<impl IntoResponse> {
    input.check()?;

    let incident = IncidentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        incident_id = incident.id,
        radius_km = incident.radius,
        is_active = incident.is_active,
        "Incident created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: incident })))
}

/// GET /api/v1/incidents
pub async fn list_incidents(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let incidents = IncidentRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: incidents }))
}

/// GET /api/v1/incidents/{id}
pub async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let incident = IncidentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: incident }))
}

/// PUT /api/v1/incidents/{id}
///
/// Partial update. Absent, empty, and zero-valued fields keep the stored
/// value.
pub async fn update_incident(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIncident>,
) -> AppResult<impl IntoResponse> {
    let input = input.normalized();
    input.check()?;

    let incident = IncidentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(incident_id = id, is_active = incident.is_active, "Incident updated");

    Ok(Json(DataResponse { data: incident }))
}

/// DELETE /api/v1/incidents/{id}
///
/// Pending webhook tasks for the incident go with it.
pub async fn delete_incident(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !IncidentRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(incident_id = id, "Incident deleted");
    Ok(StatusCode::NO_CONTENT)
}
