//! Jira REST client for remote links.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::LinkError;
use crate::keys::JiraKey;
use crate::payload::RemoteLinkRequest;

/// Destination for remote-link requests.
///
/// The synchronizer only depends on this trait, so tests can record or fail
/// individual calls without a network.
#[async_trait]
pub trait RemoteLinkPublisher: Send + Sync {
    /// Create or update the remote link on a single Jira issue.
    async fn publish(&self, key: &JiraKey, request: &RemoteLinkRequest) -> Result<(), LinkError>;
}

/// Jira Cloud REST client.
#[derive(Debug, Clone)]
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
}

impl JiraClient {
    /// Create a client authenticated with the configured email and API token.
    pub fn new(config: &Config) -> Result<Self, LinkError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&basic_auth(&config.jira_email, &config.jira_token))
            .map_err(|_| {
                LinkError::configuration("jira-email or jira-token contains invalid characters")
            })?;
        auth.set_sensitive(true);

        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("jira-link/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(LinkError::Client)?;

        Ok(Self {
            client,
            base_url: config.jira_base_url.clone(),
        })
    }

    /// Remote-link endpoint for an issue.
    #[must_use]
    pub fn remote_link_url(&self, key: &JiraKey) -> String {
        format!("{}/rest/api/3/issue/{key}/remotelink", self.base_url)
    }
}

#[async_trait]
impl RemoteLinkPublisher for JiraClient {
    #[instrument(skip_all, fields(key = %key))]
    async fn publish(&self, key: &JiraKey, request: &RemoteLinkRequest) -> Result<(), LinkError> {
        let url = self.remote_link_url(key);

        debug!(url = %url, global_id = %request.global_id, "Sending remote link");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|source| LinkError::Network {
                key: key.clone(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(status = %status, "Remote link accepted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Jira rejected remote link");

        Err(LinkError::Http {
            key: key.clone(),
            status,
            body,
        })
    }
}

/// `Basic base64(email:token)` header value.
#[must_use]
pub fn basic_auth(email: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}:{token}")))
}
