//! Geofence match detection and outbound notification delivery.
//!
//! - [`LocationService`] records location reports and enqueues a webhook
//!   task for every active incident the report falls inside.
//! - [`WebhookDispatcher`] periodically drains pending tasks and delivers
//!   them with a bounded number of concurrent requests.
//! - [`delivery`] holds the HTTP webhook client and its payload shape.

pub mod delivery;
pub mod dispatcher;
pub mod location;

pub use delivery::webhook::{WebhookDelivery, WebhookError, WebhookPayload, WebhookSender};
pub use dispatcher::{DispatchSummary, WebhookDispatcher};
pub use location::{LocationCheckOutcome, LocationError, LocationService};
