use axum::routing::{get, post};
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Routes mounted at `/location`.
///
/// ```text
/// POST /check  -> check_location
/// GET  /       -> list_location_checks
/// GET  /{id}   -> get_location_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(location::list_location_checks))
        .route("/check", post(location::check_location))
        .route("/{id}", get(location::get_location_check))
}
