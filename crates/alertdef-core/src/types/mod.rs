mod alert;
mod filters;
mod flow;
mod notification;
mod schedule;
mod type_definition;

pub use alert::*;
pub use filters::*;
pub use flow::*;
pub use notification::*;
pub use schedule::*;
pub use type_definition::*;
