//! Location check ingestion.
//!
//! Every valid report is persisted, then compared against all active
//! incidents with a flat scan. Each containing incident gets its own
//! pending webhook task. There is no lock around "read incidents, then
//! enqueue": concurrent reports for the same incident may each enqueue,
//! and that duplication is accepted.

use geowarns_core::error::CoreError;
use geowarns_core::geo::GeoPoint;
use geowarns_core::types::DbId;
use geowarns_db::models::incident::Incident;
use geowarns_db::models::location_check::{LocationCheck, LocationCheckRequest};
use geowarns_db::models::webhook_task::CreateWebhookTask;
use geowarns_db::repositories::{IncidentRepo, LocationCheckRepo, WebhookTaskRepo};
use geowarns_db::DbPool;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// Invalid input or a missing location check.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Persisting the check or reading incidents failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The stored check plus the incidents it matched.
#[derive(Debug, Clone, Serialize)]
pub struct LocationCheckOutcome {
    pub check: LocationCheck,
    pub incidents: Vec<Incident>,
}

// ---------------------------------------------------------------------------
// LocationService
// ---------------------------------------------------------------------------

/// Records location reports and turns geofence matches into webhook tasks.
#[derive(Clone)]
pub struct LocationService {
    pool: DbPool,
}

impl LocationService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Validate, persist, match, and enqueue.
    ///
    /// Validation failures happen before any write. Failing to store the
    /// check is fatal to the call. Failing to enqueue a task for one matched
    /// incident is logged and skipped; the remaining incidents still get
    /// their tasks and the incident is still reported as matched.
    pub async fn check_location(
        &self,
        request: &LocationCheckRequest,
    ) -> Result<LocationCheckOutcome, LocationError> {
        request.check()?;

        let check = LocationCheckRepo::create(
            &self.pool,
            &request.user_id,
            request.latitude,
            request.longitude,
        )
        .await?;

        let active = IncidentRepo::list_active(&self.pool).await?;
        let matched = matching_incidents(active, check.point());

        for incident in &matched {
            let task = CreateWebhookTask::new(incident.id, check.user_id.clone())
                .with_payload(serde_json::json!({ "location_check_id": check.id }));

            match WebhookTaskRepo::create(&self.pool, &task).await {
                Ok(created) => {
                    tracing::debug!(
                        task_id = created.id,
                        incident_id = incident.id,
                        user_id = %check.user_id,
                        "Webhook task enqueued",
                    );
                }
                Err(e) => {
                    tracing::error!(
                        incident_id = incident.id,
                        user_id = %check.user_id,
                        location_check_id = check.id,
                        error = %e,
                        "Failed to enqueue webhook task",
                    );
                }
            }
        }

        if !matched.is_empty() {
            tracing::info!(
                location_check_id = check.id,
                user_id = %check.user_id,
                matched = matched.len(),
                "Location check matched incidents",
            );
        }

        Ok(LocationCheckOutcome {
            check,
            incidents: matched,
        })
    }

    /// List every recorded location check.
    pub async fn list_checks(&self) -> Result<Vec<LocationCheck>, LocationError> {
        Ok(LocationCheckRepo::list(&self.pool).await?)
    }

    /// Fetch one location check or fail with `NotFound`.
    pub async fn get_check(&self, id: DbId) -> Result<LocationCheck, LocationError> {
        LocationCheckRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(LocationError::Core(CoreError::NotFound {
                entity: "LocationCheck",
                id,
            }))
    }
}

/// Keep the active incidents whose geofence contains `point`.
pub fn matching_incidents(incidents: Vec<Incident>, point: GeoPoint) -> Vec<Incident> {
    incidents
        .into_iter()
        .filter(|incident| incident.is_active && incident.contains(point))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
