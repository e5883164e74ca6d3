//! Resource lifecycle for a single alert definition.
//!
//! Every operation validates and expands the configuration before any call
//! reaches the service, and flattens whatever the service returns. A response
//! that cannot be flattened is an error; no partial state is handed back.

use crate::config::ProviderConfig;
use alertdef_client::AlertsClient;
use alertdef_core::{AlertDef, AlertDefError, AlertDefService, Result};
use alertdef_schema::{expand_alert, flatten_alert, AlertModel, Diagnostics, Expanded};
use tracing::{debug, info, warn};

/// Result of a create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyOutcome {
    /// Configuration tree as the backend now reports it
    pub state: AlertModel,
    /// Warnings gathered while expanding the plan
    pub diagnostics: Diagnostics,
}

/// Result of a read or import.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(AlertModel),
    /// The definition was deleted outside of configuration management
    NotFound { id: String },
}

impl ReadOutcome {
    pub const fn state(&self) -> Option<&AlertModel> {
        match self {
            Self::Found(state) => Some(state),
            Self::NotFound { .. } => None,
        }
    }
}

/// Alert definition resource backed by an [`AlertDefService`].
#[derive(Debug, Clone)]
pub struct AlertResource<S> {
    service: S,
}

impl AlertResource<AlertsClient> {
    /// Build a resource talking HTTP to the endpoint `config` resolves.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Ok(Self::new(config.build_client()?))
    }
}

impl<S: AlertDefService> AlertResource<S> {
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    pub const fn service(&self) -> &S {
        &self.service
    }

    pub async fn create(&self, plan: &AlertModel) -> Result<ApplyOutcome> {
        let Expanded {
            properties,
            diagnostics,
        } = expand_alert(plan)?;
        debug!(name = ?properties.name, "Creating alert definition");

        let created = self.service.create(&properties).await?;
        let state = settle(&created, None)?;
        info!(id = ?state.id, "Created alert definition");
        Ok(ApplyOutcome { state, diagnostics })
    }

    pub async fn read(&self, prior: &AlertModel) -> Result<ReadOutcome> {
        let id = require_id(prior)?;
        self.fetch(id).await
    }

    /// Full replace of the definition identified by `plan.id`.
    pub async fn update(&self, plan: &AlertModel) -> Result<ApplyOutcome> {
        let id = require_id(plan)?;
        let Expanded {
            properties,
            diagnostics,
        } = expand_alert(plan)?;
        debug!(id, "Updating alert definition");

        let updated = self.service.update(id, &properties).await?;
        let state = settle(&updated, Some(id))?;
        Ok(ApplyOutcome { state, diagnostics })
    }

    /// Delete the definition; one that is already gone counts as deleted.
    pub async fn delete(&self, prior: &AlertModel) -> Result<()> {
        let id = require_id(prior)?;
        debug!(id, "Deleting alert definition");
        match self.service.delete(id).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => {
                warn!(id, "Alert definition already deleted");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Adopt an existing definition by its bare identity.
    pub async fn import(&self, id: &str) -> Result<ReadOutcome> {
        if id.trim().is_empty() {
            return Err(AlertDefError::invalid("id", "must not be empty"));
        }
        self.fetch(id).await
    }

    async fn fetch(&self, id: &str) -> Result<ReadOutcome> {
        debug!(id, "Reading alert definition");
        match self.service.get(id).await {
            Ok(alert) => settle(&alert, Some(id)).map(ReadOutcome::Found),
            Err(e) if e.is_not_found() => {
                info!(id, "Alert definition no longer exists, dropping from state");
                Ok(ReadOutcome::NotFound { id: id.to_string() })
            }
            Err(e) => Err(e),
        }
    }
}

/// Flatten a service response, keeping the known identity if the backend omitted it.
fn settle(alert: &AlertDef, known_id: Option<&str>) -> Result<AlertModel> {
    let mut state = flatten_alert(alert)?;
    if state.id.is_none() {
        state.id = known_id.map(str::to_string);
    }
    if state.id.is_none() {
        return Err(AlertDefError::Internal(
            "backend returned an alert definition without an id".into(),
        ));
    }
    Ok(state)
}

fn require_id(model: &AlertModel) -> Result<&str> {
    model
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AlertDefError::invalid("id", "is unknown; the alert has not been created"))
}
