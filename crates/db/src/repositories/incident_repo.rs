//! Repository for the `incidents` table.

use geowarns_core::types::DbId;
use sqlx::PgPool;

use crate::models::incident::{CreateIncident, Incident, UpdateIncident};

/// Column list for incidents queries.
const COLUMNS: &str = "id, title, description, latitude, longitude, radius, is_active, \
    created_at, updated_at";

/// Provides CRUD operations for incident geofences.
pub struct IncidentRepo;

impl IncidentRepo {
    /// Insert a new incident, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateIncident) -> Result<Incident, sqlx::Error> {
        let query = format!(
            "INSERT INTO incidents
                (title, description, latitude, longitude, radius, is_active)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.radius)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find an incident by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM incidents WHERE id = $1");
        sqlx::query_as::<_, Incident>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every incident, active or not.
    pub async fn list(pool: &PgPool) -> Result<Vec<Incident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM incidents ORDER BY id ASC");
        sqlx::query_as::<_, Incident>(&query).fetch_all(pool).await
    }

    /// List incidents with `is_active = true`.
    ///
    /// This is the only query on the matching path. Callers must not rely
    /// on the row order.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Incident>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM incidents WHERE is_active = true ORDER BY id ASC");
        sqlx::query_as::<_, Incident>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Returns the updated row, or `None` if not found.
    ///
    /// `None` fields keep their stored value; pass the input through
    /// [`UpdateIncident::normalized`] first so zero values are ignored too.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIncident,
    ) -> Result<Option<Incident>, sqlx::Error> {
        let query = format!(
            "UPDATE incidents SET
                title       = COALESCE($1, title),
                description = COALESCE($2, description),
                latitude    = COALESCE($3, latitude),
                longitude   = COALESCE($4, longitude),
                radius      = COALESCE($5, radius),
                is_active   = COALESCE($6, is_active),
                updated_at  = NOW()
             WHERE id = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Incident>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.radius)
            .bind(input.is_active)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an incident by its ID. Returns `true` if a row was deleted.
    ///
    /// Webhook tasks referencing the incident are removed by the foreign key
    /// cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
