//! Expand (configuration to domain) and flatten (domain to configuration).
//!
//! Every converter is a pure function over borrowed input. Expansion
//! validates first and fails before anything is sent; flattening fails loudly
//! on any backend value it cannot represent.

mod alert;
pub mod enums;
mod filters;
mod notification;
pub mod primitives;
mod schedule;
mod type_definition;

pub use alert::{expand_alert, flatten_alert, validate_alert, Expanded};
pub use type_definition::{expand_type_definition, flatten_type_definition};
