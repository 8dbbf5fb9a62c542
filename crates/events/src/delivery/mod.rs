//! External delivery channels for incident notifications.

pub mod webhook;
