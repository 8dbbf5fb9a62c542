pub mod incidents;
pub mod location;
pub mod stats;
pub mod webhook_tasks;
pub mod webhooks;
