//! Configuration tree for alert definitions and its mapping to the domain model.
//!
//! - [`model`]: the declared attribute tree, as the configuration runtime hands it over
//! - [`convert`]: `expand` and `flatten` between that tree and [`alertdef_core`] types
//! - [`Diagnostics`]: non-fatal warnings gathered while expanding
//!
//! # Example
//!
//! ```rust
//! use alertdef_schema::{expand_alert, flatten_alert, AlertModel};
//! use alertdef_core::AlertDef;
//!
//! let model: AlertModel = serde_json::from_value(serde_json::json!({
//!     "name": "Errors",
//!     "priority": "P2",
//!     "type_definition": {
//!         "logs_immediate": {
//!             "logs_filter": { "simple_filter": { "lucene_query": "level:error" } }
//!         }
//!     }
//! }))?;
//!
//! let expanded = expand_alert(&model)?;
//! let state = flatten_alert(&AlertDef {
//!     id: Some("generated".into()),
//!     alert_def_properties: expanded.properties,
//!     alert_version_id: None,
//! })?;
//! assert_eq!(state.priority.as_deref(), Some("P2"));
//! # Ok::<(), alertdef_core::AlertDefError>(())
//! ```

pub mod convert;
mod diagnostics;
pub mod model;

pub use convert::{expand_alert, flatten_alert, validate_alert, Expanded};
pub use diagnostics::{Diagnostics, Warning};
pub use model::*;
