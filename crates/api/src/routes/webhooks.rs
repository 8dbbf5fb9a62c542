use axum::routing::post;
use axum::Router;

use crate::handlers::webhooks;
use crate::state::AppState;

/// Routes mounted at `/webhooks`.
///
/// ```text
/// POST / -> receive_webhook
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(webhooks::receive_webhook))
}
