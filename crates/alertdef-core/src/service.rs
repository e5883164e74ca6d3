//! Transport seam between the resource lifecycle and the backend.

use crate::{AlertDef, AlertDefProperties, Result};
use async_trait::async_trait;

/// Remote CRUD operations on alert definitions.
///
/// Implementations own connection handling. Callers make at most one call per
/// lifecycle step and never retry.
#[async_trait]
pub trait AlertDefService: Send + Sync {
    /// Create an alert definition; the backend assigns its identity
    async fn create(&self, properties: &AlertDefProperties) -> Result<AlertDef>;

    /// Fetch an alert definition.
    ///
    /// Returns [`crate::AlertDefError::NotFound`] when it no longer exists.
    async fn get(&self, id: &str) -> Result<AlertDef>;

    /// Replace an alert definition in full
    async fn update(&self, id: &str, properties: &AlertDefProperties) -> Result<AlertDef>;

    /// Delete an alert definition
    async fn delete(&self, id: &str) -> Result<()>;
}
