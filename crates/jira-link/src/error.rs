//! Error types for linking GitHub subjects to Jira issues.

use thiserror::Error;

use crate::keys::JiraKey;

/// Errors that can abort a link run.
///
/// Every variant is fatal for the run: the synchronizer stops at the first
/// error and keys after the failing one are never attempted.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Required input is missing or the event cannot be interpreted
    #[error("{0}")]
    Configuration(String),

    /// Event payload could not be read from disk
    #[error("Failed to read event payload: {0}")]
    Io(#[from] std::io::Error),

    /// Event payload is not valid JSON for a GitHub event
    #[error("Failed to parse event payload: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Transport-level failure while talking to Jira
    #[error("Request for {key} failed: {source}")]
    Network {
        key: JiraKey,
        #[source]
        source: reqwest::Error,
    },

    /// Jira answered with a non-success status
    #[error("Jira returned {status} for {key}: {body}")]
    Http {
        key: JiraKey,
        status: reqwest::StatusCode,
        body: String,
    },
}

impl LinkError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this error came from the remote tracker rather than local input.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Http { .. })
    }
}
