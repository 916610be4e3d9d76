//! Jira issue key extraction.

use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::LinkError;
use crate::event::TriggerEvent;

/// Uppercase project key, hyphen, issue number (e.g. `PROJ-42`).
static JIRA_KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]+-[0-9]+").expect("Jira key pattern is valid"));

/// A Jira issue key such as `PROJ-42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JiraKey(String);

impl JiraKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JiraKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JiraKey {
    type Err = LinkError;

    /// Accepts a string that is exactly one key, nothing around it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match JIRA_KEY_PATTERN.find(s) {
            Some(m) if m.start() == 0 && m.end() == s.len() => Ok(Self(s.to_string())),
            _ => Err(LinkError::configuration(format!(
                "'{s}' is not a Jira issue key"
            ))),
        }
    }
}

impl AsRef<str> for JiraKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// All keys in `text`, in order of appearance, duplicates included.
#[must_use]
pub fn find_keys(text: &str) -> Vec<JiraKey> {
    JIRA_KEY_PATTERN
        .find_iter(text)
        .map(|m| JiraKey(m.as_str().to_string()))
        .collect()
}

/// Distinct keys referenced by the event.
///
/// Scans the subject title, then the subject body, then the comment body.
/// The first occurrence of a key decides its position.
#[must_use]
pub fn extract_keys(event: &TriggerEvent) -> Vec<JiraKey> {
    let sources = [
        event.subject.title(),
        event.subject.body(),
        event.comment_body(),
    ];

    let mut seen = HashSet::new();
    sources
        .into_iter()
        .flatten()
        .flat_map(find_keys)
        .filter(|key| seen.insert(key.clone()))
        .collect()
}
