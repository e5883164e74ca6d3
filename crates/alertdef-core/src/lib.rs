//! Core types and traits for alert definition providers.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: The alert definition aggregate exactly as the backend stores it
//! - **Errors**: One error type for validation, mapping and transport, [`AlertDefError`]
//! - **Service**: The [`AlertDefService`] transport trait
//!
//! # Example
//!
//! ```rust,ignore
//! use alertdef_core::{AlertDef, AlertDefService, Result};
//!
//! async fn describe(service: &impl AlertDefService, id: &str) -> Result<()> {
//!     let alert: AlertDef = service.get(id).await?;
//!     println!("{:?} is a {:?} alert", alert.alert_def_properties.name, alert.type_tag());
//!     Ok(())
//! }
//! ```

mod error;
mod service;
pub mod types;

pub use error::{AlertDefError, Result};
pub use service::AlertDefService;
pub use types::*;
