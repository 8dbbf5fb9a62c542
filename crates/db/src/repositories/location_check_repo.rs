//! Repository for the `location_checks` table. Insert and read only.

use geowarns_core::types::DbId;
use sqlx::PgPool;

use crate::models::location_check::LocationCheck;

/// Column list for location_checks queries.
const COLUMNS: &str = "id, user_id, latitude, longitude, checked_at";

pub struct LocationCheckRepo;

impl LocationCheckRepo {
    /// Record a location report. `checked_at` is stamped by the database.
    pub async fn create(
        pool: &PgPool,
        user_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationCheck, sqlx::Error> {
        let query = format!(
            "INSERT INTO location_checks (user_id, latitude, longitude)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocationCheck>(&query)
            .bind(user_id)
            .bind(latitude)
            .bind(longitude)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LocationCheck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM location_checks WHERE id = $1");
        sqlx::query_as::<_, LocationCheck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all location checks, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<LocationCheck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM location_checks ORDER BY id ASC");
        sqlx::query_as::<_, LocationCheck>(&query).fetch_all(pool).await
    }
}
