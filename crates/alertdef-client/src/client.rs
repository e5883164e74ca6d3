//! Alert definitions API client.

use alertdef_core::{
    AlertDef, AlertDefError, AlertDefProperties, AlertDefResponse, AlertDefService,
    CreateAlertDefRequest, ReplaceAlertDefRequest, Result,
};
use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Collection path of alert definitions
const ALERT_DEFS_PATH: [&str; 2] = ["v3", "alert-defs"];

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the alert definitions API
#[derive(Clone)]
pub struct AlertsClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: String,
    base_url: Url,
    timeout: Duration,
}

impl AlertsClient {
    /// Create a builder for the given API key and base URL
    #[must_use]
    pub fn builder(api_key: impl Into<String>, base_url: impl Into<String>) -> AlertsClientBuilder {
        AlertsClientBuilder::new(api_key, base_url)
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Send a request and decode the alert definition it returns
    async fn send_for_alert(&self, request: RequestBuilder) -> Result<AlertDef> {
        let response = self.send(request).await?;
        let envelope: AlertDefResponse = Self::handle_response(response).await?;
        Ok(envelope.alert_def)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        request
            .bearer_auth(&self.inner.api_key)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))
    }

    /// URL of the collection, or of one alert definition when `id` is given
    fn build_url(&self, id: Option<&str>) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                AlertDefError::Config(format!("{} cannot be a base URL", self.inner.base_url))
            })?;
            segments.pop_if_empty().extend(ALERT_DEFS_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn transport_error(&self, error: &reqwest::Error) -> AlertDefError {
        if error.is_timeout() {
            AlertDefError::Timeout(self.inner.timeout.as_secs())
        } else if error.is_connect() {
            AlertDefError::Connection(error.to_string())
        } else {
            AlertDefError::Http(error.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| AlertDefError::Http(e.to_string()))?;
            serde_json::from_str(&body).map_err(AlertDefError::Json)
        } else {
            Err(Self::handle_error(status.as_u16(), response).await)
        }
    }

    /// Handle an API response that returns no body
    async fn handle_empty_response(response: Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::handle_error(status.as_u16(), response).await)
        }
    }

    /// Convert an error response to an [`AlertDefError`]
    async fn handle_error(status: u16, response: Response) -> AlertDefError {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|e| e.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);

        match status {
            401 => AlertDefError::Unauthorized,
            404 => AlertDefError::NotFound { resource: message },
            429 => {
                warn!(retry_after = ?retry_after, "Rate limited by alert definitions API");
                AlertDefError::RateLimited { retry_after }
            }
            _ => AlertDefError::Api {
                code: status,
                message,
            },
        }
    }
}

#[async_trait]
impl AlertDefService for AlertsClient {
    async fn create(&self, properties: &AlertDefProperties) -> Result<AlertDef> {
        let url = self.build_url(None)?;
        debug!(url = %url, "POST request");

        let body = CreateAlertDefRequest {
            alert_def_properties: properties.clone(),
        };
        self.send_for_alert(self.inner.http.post(url).json(&body))
            .await
    }

    async fn get(&self, id: &str) -> Result<AlertDef> {
        let url = self.build_url(Some(id))?;
        debug!(url = %url, "GET request");

        self.send_for_alert(self.inner.http.get(url)).await
    }

    async fn update(&self, id: &str, properties: &AlertDefProperties) -> Result<AlertDef> {
        let url = self.build_url(None)?;
        debug!(url = %url, id, "PUT request");

        let body = ReplaceAlertDefRequest {
            id: id.to_string(),
            alert_def_properties: properties.clone(),
        };
        self.send_for_alert(self.inner.http.put(url).json(&body))
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.build_url(Some(id))?;
        debug!(url = %url, "DELETE request");

        let response = self.send(self.inner.http.delete(url)).await?;
        Self::handle_empty_response(response).await
    }
}

/// Builder for configuring an [`AlertsClient`]
pub struct AlertsClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl AlertsClientBuilder {
    /// Create a new builder with the given API key and base URL
    #[must_use]
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("alertdef-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<AlertsClient> {
        if self.api_key.trim().is_empty() {
            return Err(AlertDefError::Config("API key must not be empty".into()));
        }
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| AlertDefError::Config(format!("invalid base URL {}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(AlertDefError::Config(format!(
                "{} cannot be a base URL",
                self.base_url
            )));
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| AlertDefError::Internal(format!("failed to build HTTP client: {e}")))?;

        Ok(AlertsClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}
