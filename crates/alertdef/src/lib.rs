//! Alert definition resource for infrastructure-as-code providers.
//!
//! Maps the declarative configuration tree of an alert definition to the
//! backend's domain model and back, and drives the create/read/update/delete
//! lifecycle against the alert definitions API.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use alertdef::{AlertModel, AlertResource, ProviderConfig};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderConfig::load(Path::new("alertdef.toml"))?.with_env()?;
//!     let resource = AlertResource::from_config(&config)?;
//!
//!     let plan: AlertModel = serde_json::from_str(&std::fs::read_to_string("alert.json")?)?;
//!     let outcome = resource.create(&plan).await?;
//!     for warning in outcome.diagnostics.warnings() {
//!         eprintln!("warning: {warning:?}");
//!     }
//!     println!("created {:?}", outcome.state.id);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

mod config;
mod resource;

pub use alertdef_client::{AlertsClient, AlertsClientBuilder};
pub use alertdef_core::*;
pub use alertdef_schema::{
    convert, expand_alert, flatten_alert, model, validate_alert, Diagnostics, Expanded, Warning,
};
pub use alertdef_schema::model::AlertModel;
pub use config::ProviderConfig;
pub use resource::{AlertResource, ApplyOutcome, ReadOutcome};

// Re-export for building configuration trees from JSON
pub use serde_json;
