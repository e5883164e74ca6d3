use thiserror::Error;

/// Result type alias for alert definition operations
pub type Result<T> = std::result::Result<T, AlertDefError>;

/// Errors that can occur while converting or reconciling alert definitions
#[derive(Error, Debug)]
pub enum AlertDefError {
    /// The configuration tree violates a structural invariant.
    ///
    /// Raised before any remote call is made.
    #[error("invalid configuration at {path}: {reason}")]
    InvalidConfiguration {
        /// Dotted attribute path of the offending node
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// A domain value returned by the backend has no configuration counterpart
    #[error("cannot map {field} value {code} back to configuration")]
    Mapping {
        /// Domain field holding the value
        field: String,
        /// The unmapped value, rendered as text
        code: String,
    },

    /// The alert definition no longer exists remotely
    #[error("not found: {resource}")]
    NotFound {
        /// What was looked up
        resource: String,
    },

    /// The API key was rejected
    #[error("unauthorized: check the API key")]
    Unauthorized,

    /// The backend is throttling this account
    #[error("rate limited (retry after {retry_after:?}s)")]
    RateLimited {
        /// `Retry-After` seconds, when the backend sent a numeric value
        retry_after: Option<u64>,
    },

    /// Any other non-success response
    #[error("alert definitions API returned {code}: {message}")]
    Api {
        code: u16,
        /// `message` or `error` from the response body, else the raw body
        message: String,
    },

    #[error("HTTP transport error: {0}")]
    Http(String),

    /// No response within the configured timeout (seconds)
    #[error("no response after {0}s")]
    Timeout(u64),

    #[error("could not connect: {0}")]
    Connection(String),

    /// Malformed request or response body
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// A response that breaks the service contract
    #[error("internal error: {0}")]
    Internal(String),
}

impl AlertDefError {
    /// Shorthand for an [`AlertDefError::InvalidConfiguration`]
    pub fn invalid(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`AlertDefError::Mapping`]
    pub fn unmapped(field: impl Into<String>, code: impl ToString) -> Self {
        Self::Mapping {
            field: field.into(),
            code: code.to_string(),
        }
    }

    /// Returns true if the error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the remote resource does not exist
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true if the configuration was rejected before any remote call
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }

    /// Returns true if a backend value could not be mapped back to configuration
    #[must_use]
    pub const fn is_mapping_error(&self) -> bool {
        matches!(self, Self::Mapping { .. })
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
