//! HTTP transport for the alert definitions management API.
//!
//! [`AlertsClient`] implements [`AlertDefService`] over the v3 REST endpoints.
//! It makes exactly one request per call and never retries.

mod client;

pub use alertdef_core::{AlertDefError, AlertDefService, Result};
pub use client::{AlertsClient, AlertsClientBuilder};
