//! GitHub trigger event model.
//!
//! Only the handful of fields the linker reads are modelled; everything else
//! in the webhook payload is ignored during deserialization.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::error::LinkError;

/// Lifecycle state of an issue or pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectState {
    Open,
    Closed,
    /// Anything GitHub may send that is neither `open` nor `closed`
    #[serde(other)]
    Unknown,
}

impl fmt::Display for SubjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// GitHub Issue
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Issue title
    #[serde(default)]
    pub title: Option<String>,
    /// Issue body/description
    #[serde(default)]
    pub body: Option<String>,
    /// Issue state (open, closed)
    pub state: SubjectState,
    /// Issue HTML URL
    pub html_url: String,
}

/// GitHub Pull Request
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    #[serde(default)]
    pub title: Option<String>,
    /// PR body/description
    #[serde(default)]
    pub body: Option<String>,
    /// PR state (open, closed)
    pub state: SubjectState,
    /// PR HTML URL
    pub html_url: String,
}

/// The issue or pull request an event is about.
#[derive(Debug, Clone)]
pub enum Subject {
    Issue(Issue),
    PullRequest(PullRequest),
}

impl Subject {
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Issue(issue) => issue.title.as_deref(),
            Self::PullRequest(pr) => pr.title.as_deref(),
        }
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Issue(issue) => issue.body.as_deref(),
            Self::PullRequest(pr) => pr.body.as_deref(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> SubjectState {
        match self {
            Self::Issue(issue) => issue.state,
            Self::PullRequest(pr) => pr.state,
        }
    }

    #[must_use]
    pub const fn number(&self) -> u64 {
        match self {
            Self::Issue(issue) => issue.number,
            Self::PullRequest(pr) => pr.number,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Issue(issue) => &issue.html_url,
            Self::PullRequest(pr) => &pr.html_url,
        }
    }

    /// Human-readable kind, used in log lines.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Issue(_) => "issue",
            Self::PullRequest(_) => "pull request",
        }
    }
}

/// Comment attached to an `issue_comment` event.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub body: Option<String>,
}

/// GitHub Repository
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// Full name (org/repo)
    pub full_name: String,
}

/// Raw webhook payload, as GitHub writes it to `GITHUB_EVENT_PATH`.
#[derive(Debug, Deserialize)]
struct EventPayload {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    issue: Option<Issue>,
    #[serde(default)]
    pull_request: Option<PullRequest>,
    #[serde(default)]
    repository: Option<Repository>,
    #[serde(default)]
    comment: Option<Comment>,
}

/// A single issue or pull request event that may reference Jira keys.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    /// Action verb (opened, closed, reopened, created, ...)
    pub action: String,
    pub subject: Subject,
    /// Full name (org/repo) of the repository the subject lives in
    pub repository_full_name: String,
    pub comment: Option<Comment>,
}

impl TriggerEvent {
    /// Parse a webhook payload.
    ///
    /// Returns `Ok(None)` for events that carry neither an issue nor a pull
    /// request. Comment events on pull requests carry an `issue` object, so
    /// `issue` takes precedence when both are present.
    pub fn from_json(json: &str) -> Result<Option<Self>, LinkError> {
        let payload: EventPayload = serde_json::from_str(json)?;

        let subject = match (payload.issue, payload.pull_request) {
            (Some(issue), _) => Subject::Issue(issue),
            (None, Some(pr)) => Subject::PullRequest(pr),
            (None, None) => return Ok(None),
        };

        let repository = payload
            .repository
            .ok_or_else(|| LinkError::configuration("Event payload has no repository"))?;

        Ok(Some(Self {
            action: payload.action.unwrap_or_default(),
            subject,
            repository_full_name: repository.full_name,
            comment: payload.comment,
        }))
    }

    /// Read and parse the payload file GitHub provides for the running workflow.
    pub fn load(path: &Path) -> Result<Option<Self>, LinkError> {
        debug!(path = %path.display(), "Loading event payload");
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Comment body, if the event carries a comment with text.
    #[must_use]
    pub fn comment_body(&self) -> Option<&str> {
        self.comment.as_ref().and_then(|c| c.body.as_deref())
    }
}
