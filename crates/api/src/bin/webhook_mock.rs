//! Local webhook receiver for development.
//!
//! Logs every notification posted to `/webhook` and answers `/health`, so
//! the API can be exercised end to end without a real downstream system.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use clap::Parser;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "geowarns-webhook-mock", about = "Log incoming geowarns webhooks")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 9090)]
    port: u16,
}

async fn receive(Json(payload): Json<Value>) -> (StatusCode, Json<Value>) {
    tracing::info!(
        event = payload["event"].as_str().unwrap_or("unknown"),
        user_id = payload["user_id"].as_str().unwrap_or(""),
        incident_id = payload["incident"]["id"].as_i64(),
        %payload,
        "Webhook received"
    );
    (StatusCode::OK, Json(json!({ "status": "received" })))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let app = Router::new()
        .route("/webhook", post(receive))
        .route("/health", get(health));

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!(%addr, "Webhook mock server running");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
