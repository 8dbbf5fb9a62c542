//! Domain types and pure logic for the geowarns service.
//!
//! Nothing in this crate performs I/O. The database, delivery, and HTTP
//! layers build on these definitions.

pub mod error;
pub mod geo;
pub mod pagination;
pub mod stats;
pub mod tasks;
pub mod types;
