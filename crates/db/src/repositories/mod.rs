//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async data-access
//! methods that accept `&PgPool` as the first argument.

pub mod incident_repo;
pub mod incident_stats_repo;
pub mod location_check_repo;
pub mod webhook_task_repo;

pub use incident_repo::IncidentRepo;
pub use incident_stats_repo::IncidentStatsRepo;
pub use location_check_repo::LocationCheckRepo;
pub use webhook_task_repo::WebhookTaskRepo;
