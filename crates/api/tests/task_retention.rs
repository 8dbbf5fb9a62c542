//! Integration tests for the webhook task retention job.

use std::time::Duration;

use geowarns_api::background::task_retention;
use geowarns_db::models::incident::CreateIncident;
use geowarns_db::models::webhook_task::CreateWebhookTask;
use geowarns_db::repositories::{IncidentRepo, WebhookTaskRepo};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

async fn seed(pool: &PgPool) -> (i64, i64) {
    let incident = IncidentRepo::create(
        pool,
        &CreateIncident {
            title: "Landslide".to_string(),
            description: None,
            latitude: 0.0,
            longitude: 0.0,
            radius: 1.0,
            is_active: None,
        },
    )
    .await
    .unwrap();

    let old = WebhookTaskRepo::create(pool, &CreateWebhookTask::new(incident.id, "old"))
        .await
        .unwrap();
    let fresh = WebhookTaskRepo::create(pool, &CreateWebhookTask::new(incident.id, "fresh"))
        .await
        .unwrap();

    sqlx::query("UPDATE webhook_tasks SET created_at = NOW() - INTERVAL '45 days' WHERE id = $1")
        .bind(old.id)
        .execute(pool)
        .await
        .unwrap();

    (old.id, fresh.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn purge_removes_only_expired_tasks(pool: PgPool) {
    let (old, fresh) = seed(&pool).await;

    let deleted = task_retention::purge_once(&pool, 30).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(WebhookTaskRepo::find_by_id(&pool, old).await.unwrap().is_none());
    assert!(WebhookTaskRepo::find_by_id(&pool, fresh).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn oversized_retention_is_clamped_instead_of_overflowing(pool: PgPool) {
    let (old, fresh) = seed(&pool).await;

    let deleted = task_retention::purge_once(&pool, 100_000_000).await.unwrap();

    assert_eq!(deleted, 0);
    assert!(WebhookTaskRepo::find_by_id(&pool, old).await.unwrap().is_some());
    assert!(WebhookTaskRepo::find_by_id(&pool, fresh).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_purges_on_first_tick_and_stops_on_cancel(pool: PgPool) {
    let (old, _) = seed(&pool).await;
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(task_retention::run(pool.clone(), 30, cancel.clone()));

    for _ in 0..100 {
        if WebhookTaskRepo::find_by_id(&pool, old).await.unwrap().is_none() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(WebhookTaskRepo::find_by_id(&pool, old).await.unwrap().is_none());

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("retention job should stop promptly")
        .unwrap();
}
