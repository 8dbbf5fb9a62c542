//! Integration tests for the windowed distinct-user stats query.

use chrono::{Duration, Utc};
use geowarns_core::types::{DbId, Timestamp};
use geowarns_db::models::incident::CreateIncident;
use geowarns_db::repositories::{IncidentRepo, IncidentStatsRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_incident(pool: &PgPool, lat: f64, lng: f64, radius: f64, active: bool) -> DbId {
    IncidentRepo::create(
        pool,
        &CreateIncident {
            title: "Wildfire".to_string(),
            description: None,
            latitude: lat,
            longitude: lng,
            radius,
            is_active: Some(active),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_check(pool: &PgPool, user_id: &str, lat: f64, lng: f64, at: Timestamp) {
    sqlx::query(
        "INSERT INTO location_checks (user_id, latitude, longitude, checked_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(lat)
    .bind(lng)
    .bind(at)
    .execute(pool)
    .await
    .unwrap();
}

fn count_for(stats: &[geowarns_db::models::incident_stat::IncidentStat], id: DbId) -> i64 {
    stats
        .iter()
        .find(|s| s.incident_id == id)
        .map(|s| s.user_count)
        .expect("incident should have a stats row")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn counts_distinct_users_inside_window_and_radius(pool: PgPool) {
    let incident = seed_incident(&pool, 10.0, 10.0, 5.0, true).await;
    let now = Utc::now();

    // u1 twice inside, u2 once inside, u3 outside the radius, u4 too old.
    seed_check(&pool, "u1", 10.0, 10.0, now - Duration::minutes(5)).await;
    seed_check(&pool, "u1", 10.01, 10.0, now - Duration::minutes(3)).await;
    seed_check(&pool, "u2", 10.0, 10.02, now - Duration::minutes(10)).await;
    seed_check(&pool, "u3", 50.0, 50.0, now - Duration::minutes(1)).await;
    seed_check(&pool, "u4", 10.0, 10.0, now - Duration::minutes(90)).await;

    let stats = IncidentStatsRepo::compute_at(&pool, 30, now).await.unwrap();

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].incident_id, incident);
    assert_eq!(stats[0].user_count, 2);
    assert_eq!(stats[0].time_window_minutes, 30);
    assert_eq!(stats[0].last_checked, now);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn incident_without_checks_reports_zero(pool: PgPool) {
    let incident = seed_incident(&pool, 0.0, 0.0, 1.0, true).await;

    let stats = IncidentStatsRepo::compute_at(&pool, 60, Utc::now()).await.unwrap();

    assert_eq!(count_for(&stats, incident), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_incidents_are_excluded(pool: PgPool) {
    let active = seed_incident(&pool, 10.0, 10.0, 5.0, true).await;
    let inactive = seed_incident(&pool, 10.0, 10.0, 5.0, false).await;
    let now = Utc::now();
    seed_check(&pool, "u1", 10.0, 10.0, now - Duration::minutes(1)).await;

    let stats = IncidentStatsRepo::compute_at(&pool, 30, now).await.unwrap();

    assert_eq!(count_for(&stats, active), 1);
    assert!(stats.iter().all(|s| s.incident_id != inactive));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_window_counts_nobody(pool: PgPool) {
    let incident = seed_incident(&pool, 10.0, 10.0, 5.0, true).await;
    let now = Utc::now();
    seed_check(&pool, "u1", 10.0, 10.0, now).await;
    seed_check(&pool, "u2", 10.0, 10.0, now - Duration::seconds(1)).await;

    let stats = IncidentStatsRepo::compute_at(&pool, 0, now).await.unwrap();

    assert_eq!(count_for(&stats, incident), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn widening_the_window_never_decreases_counts(pool: PgPool) {
    let incident = seed_incident(&pool, 10.0, 10.0, 5.0, true).await;
    let now = Utc::now();
    for (i, minutes_ago) in [2_i64, 20, 200, 2000].into_iter().enumerate() {
        seed_check(
            &pool,
            &format!("user-{i}"),
            10.0,
            10.0,
            now - Duration::minutes(minutes_ago),
        )
        .await;
    }

    let mut previous = 0;
    for window in [0_i64, 1, 5, 30, 300, 3000] {
        let stats = IncidentStatsRepo::compute_at(&pool, window, now).await.unwrap();
        let count = count_for(&stats, incident);
        assert!(count >= previous, "window {window} dropped from {previous} to {count}");
        previous = count;
    }
    assert_eq!(previous, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn radius_boundary_is_inclusive(pool: PgPool) {
    // One degree of latitude equals exactly the radius.
    let incident = seed_incident(&pool, 0.0, 0.0, 111.32, true).await;
    let now = Utc::now();
    seed_check(&pool, "edge", 1.0, 0.0, now - Duration::minutes(1)).await;
    seed_check(&pool, "beyond", 1.001, 0.0, now - Duration::minutes(1)).await;

    let stats = IncidentStatsRepo::compute_at(&pool, 10, now).await.unwrap();

    assert_eq!(count_for(&stats, incident), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn compute_anchors_window_at_database_clock(pool: PgPool) {
    let incident = seed_incident(&pool, 10.0, 10.0, 5.0, true).await;

    // checked_at takes its column default, stamped by the database.
    let checked_at: Timestamp = sqlx::query_scalar(
        "INSERT INTO location_checks (user_id, latitude, longitude)
         VALUES ('u1', 10.0, 10.0)
         RETURNING checked_at",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let stats = IncidentStatsRepo::compute(&pool, 30).await.unwrap();

    assert_eq!(count_for(&stats, incident), 1);
    assert!(stats[0].last_checked >= checked_at);
}
