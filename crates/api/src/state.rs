use std::sync::Arc;

use geowarns_events::LocationService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and service are handles, the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: geowarns_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Location ingester: persists checks and enqueues webhook tasks.
    pub location_service: LocationService,
}

impl AppState {
    pub fn new(pool: geowarns_db::DbPool, config: ServerConfig) -> Self {
        Self {
            location_service: LocationService::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }
}
