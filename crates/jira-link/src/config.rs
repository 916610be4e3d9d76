//! Configuration for the Jira link run.

use reqwest::Url;
use std::fmt;
use std::time::Duration;

use crate::error::LinkError;

/// Default timeout for each remote-link request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Fixed values that identify this integration on every remote link.
#[derive(Debug, Clone, Copy)]
pub struct LinkConstants {
    /// Application name shown in Jira's link panel.
    pub app_name: &'static str,
    /// Source tag folded into the global id.
    pub app_source: &'static str,
    /// Relationship label between the Jira issue and the GitHub subject.
    pub relationship: &'static str,
    pub icon_opened: &'static str,
    pub icon_closed: &'static str,
    pub icon_reopened: &'static str,
}

pub const LINK_CONSTANTS: LinkConstants = LinkConstants {
    app_name: "GitHub",
    app_source: "jira-remote-link-action",
    relationship: "links to",
    icon_opened:
        "https://raw.githubusercontent.com/carlsberg/jira-remote-link-action/main/assets/opened.png",
    icon_closed:
        "https://raw.githubusercontent.com/carlsberg/jira-remote-link-action/main/assets/closed.png",
    icon_reopened:
        "https://raw.githubusercontent.com/carlsberg/jira-remote-link-action/main/assets/reopened.png",
};

impl Default for LinkConstants {
    fn default() -> Self {
        LINK_CONSTANTS
    }
}

/// Validated Jira connection settings.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the Jira instance, without trailing slash.
    pub jira_base_url: String,
    /// Account email used for basic auth.
    pub jira_email: String,
    /// API token used for basic auth.
    pub jira_token: String,
    /// Per-request timeout; `None` waits for Jira indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build a configuration from raw inputs.
    ///
    /// `jira_url` may be a bare host (`acme.atlassian.net`), which is reached
    /// over HTTPS, or a full URL with an explicit scheme. A `timeout_secs` of
    /// zero disables the request timeout.
    pub fn new(
        jira_url: &str,
        jira_email: &str,
        jira_token: &str,
        timeout_secs: u64,
    ) -> Result<Self, LinkError> {
        let jira_url = require("jira-url", jira_url)?;
        let jira_email = require("jira-email", jira_email)?;
        let jira_token = require("jira-token", jira_token)?;

        Ok(Self {
            jira_base_url: normalize_base_url(jira_url)?,
            jira_email: jira_email.to_string(),
            jira_token: jira_token.to_string(),
            timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jira_base_url", &self.jira_base_url)
            .field("jira_email", &self.jira_email)
            .field("jira_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn require<'a>(name: &str, value: &'a str) -> Result<&'a str, LinkError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LinkError::configuration(format!(
            "Input required and not supplied: {name}"
        )));
    }
    Ok(value)
}

fn normalize_base_url(raw: &str) -> Result<String, LinkError> {
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let url = Url::parse(&candidate)
        .map_err(|e| LinkError::configuration(format!("Invalid jira-url '{raw}': {e}")))?;

    if url.host_str().is_none() {
        return Err(LinkError::configuration(format!(
            "Invalid jira-url '{raw}': missing host"
        )));
    }

    Ok(candidate.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_uses_https() {
        let config = Config::new("acme.atlassian.net", "me@acme.io", "t0k", 3).unwrap();
        assert_eq!(config.jira_base_url, "https://acme.atlassian.net");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_explicit_scheme_kept() {
        let config = Config::new("http://127.0.0.1:8080/", "me@acme.io", "t0k", 1).unwrap();
        assert_eq!(config.jira_base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = Config::new("acme.atlassian.net", "me@acme.io", "t0k", 0).unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_missing_inputs_fail() {
        for (url, email, token, name) in [
            ("", "e", "t", "jira-url"),
            ("h", " ", "t", "jira-email"),
            ("h", "e", "", "jira-token"),
        ] {
            let err = Config::new(url, email, token, 3).unwrap_err();
            assert!(matches!(err, LinkError::Configuration(_)));
            assert!(err.to_string().ends_with(name), "{err}");
        }
    }

    #[test]
    fn test_invalid_url_fails() {
        let err = Config::new("https://", "e", "t", 3).unwrap_err();
        assert!(matches!(err, LinkError::Configuration(_)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::new("acme.atlassian.net", "me@acme.io", "secret-token", 3).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }
}
