//! Background tasks and scheduled jobs.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn`. All tasks accept a [`CancellationToken`]
//! for graceful shutdown.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod task_retention;

use std::time::Duration;

use tokio::task::JoinHandle;

/// Wait up to `timeout` for a cancelled background task to finish.
///
/// Returns `true` if it stopped cleanly. A panic or an overrun is logged
/// and reported as `false`.
pub async fn join_on_shutdown(name: &str, handle: JoinHandle<()>, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::error!(task = name, error = %e, "Background task terminated abnormally");
            false
        }
        Err(_) => {
            tracing::warn!(task = name, "Background task did not stop within the shutdown timeout");
            false
        }
    }
}
