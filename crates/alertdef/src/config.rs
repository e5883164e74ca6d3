//! Provider configuration.

use alertdef_client::AlertsClient;
use alertdef_core::{AlertDefError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Connection settings for the alert definitions API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Account domain, e.g. `eu2.example.com`. The API lives at `api.<domain>`.
    #[serde(default)]
    pub domain: Option<String>,

    /// Full base URL; takes precedence over `domain`.
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            domain: None,
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ProviderConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| AlertDefError::Config(format!("{}: {e}", path.display())))?;
            toml::from_str(&content)
                .map_err(|e| AlertDefError::Config(format!("{}: {e}", path.display())))
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Overlay `ALERTDEF_*` environment variables on top of file values.
    pub fn with_env(self) -> Result<Self> {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; a present, non-empty value wins.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(key) = var("ALERTDEF_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(domain) = var("ALERTDEF_DOMAIN") {
            self.domain = Some(domain);
        }
        if let Some(endpoint) = var("ALERTDEF_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Some(timeout) = var("ALERTDEF_TIMEOUT_SECS") {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                AlertDefError::Config(format!(
                    "ALERTDEF_TIMEOUT_SECS must be a whole number of seconds, got \"{timeout}\""
                ))
            })?;
        }
        Ok(self)
    }

    /// Resolve the API base URL.
    pub fn base_url(&self) -> Result<String> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        self.domain
            .as_deref()
            .map(|domain| format!("https://api.{}", domain.trim_end_matches('/')))
            .ok_or_else(|| AlertDefError::Config("either endpoint or domain must be set".into()))
    }

    pub fn build_client(&self) -> Result<AlertsClient> {
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AlertDefError::Config("api_key must be set".into()))?;

        let mut builder = AlertsClient::builder(api_key, self.base_url()?)
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }
}

const fn default_timeout_secs() -> u64 {
    30
}
