//! Configuration tree of the alert resource, shaped like its declared schema.

mod alert;
mod filters;
mod type_definition;

pub use alert::*;
pub use filters::*;
pub use type_definition::*;
