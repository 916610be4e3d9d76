//! Jira remote-link request body.
//!
//! The shape follows Jira Cloud's `POST /rest/api/3/issue/{key}/remotelink`.
//! Re-sending a body with the same `globalId` updates the existing link
//! instead of creating a second one.

use serde::Serialize;

use crate::config::LinkConstants;
use crate::event::TriggerEvent;
use crate::status::LinkStatus;

/// Identifier Jira uses to find an existing link for this subject.
#[must_use]
pub fn global_id(event: &TriggerEvent, constants: &LinkConstants) -> String {
    format!(
        "source={}-{}&repo={}&issue={}",
        constants.app_name,
        constants.app_source,
        event.repository_full_name,
        event.subject.number()
    )
}

/// Link title, e.g. `Fix PROJ-42 (org/app#7)`.
#[must_use]
pub fn link_title(event: &TriggerEvent) -> String {
    format!(
        "{} ({}#{})",
        event.subject.title().unwrap_or_default(),
        event.repository_full_name,
        event.subject.number()
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLinkRequest {
    pub global_id: String,
    pub application: Application,
    pub object: LinkObject,
    pub relationship: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Application {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkObject {
    pub url: String,
    pub title: String,
    pub icon: Icon,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub title: String,
    #[serde(rename = "url16x16")]
    pub url_16x16: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub icon: Icon,
    pub resolved: bool,
}

impl RemoteLinkRequest {
    /// Assemble the body sent for every key of this event.
    #[must_use]
    pub fn build(event: &TriggerEvent, status: LinkStatus, constants: &LinkConstants) -> Self {
        let icon = Icon {
            title: status.title().to_string(),
            url_16x16: status.icon(constants).to_string(),
        };

        Self {
            global_id: global_id(event, constants),
            application: Application {
                name: constants.app_name.to_string(),
            },
            object: LinkObject {
                url: event.subject.url().to_string(),
                title: link_title(event),
                icon: icon.clone(),
                status: Status {
                    icon,
                    resolved: status.resolved(),
                },
            },
            relationship: constants.relationship.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LINK_CONSTANTS;
    use crate::event::{Issue, Subject, SubjectState};
    use serde_json::json;

    fn event(title: Option<&str>) -> TriggerEvent {
        TriggerEvent {
            action: "opened".to_string(),
            subject: Subject::Issue(Issue {
                number: 7,
                title: title.map(String::from),
                body: None,
                state: SubjectState::Open,
                html_url: "https://github.com/org/app/issues/7".to_string(),
            }),
            repository_full_name: "org/app".to_string(),
            comment: None,
        }
    }

    #[test]
    fn test_global_id_is_deterministic() {
        let e = event(Some("Fix PROJ-42"));
        let first = global_id(&e, &LINK_CONSTANTS);
        assert_eq!(
            first,
            "source=GitHub-jira-remote-link-action&repo=org/app&issue=7"
        );
        assert_eq!(first, global_id(&e.clone(), &LINK_CONSTANTS));
    }

    #[test]
    fn test_link_title() {
        assert_eq!(link_title(&event(Some("Fix PROJ-42"))), "Fix PROJ-42 (org/app#7)");
        assert_eq!(link_title(&event(None)), " (org/app#7)");
    }

    #[test]
    fn test_serialized_shape() {
        let request =
            RemoteLinkRequest::build(&event(Some("Fix PROJ-42")), LinkStatus::Closed, &LINK_CONSTANTS);
        let icon = json!({
            "title": "Closed",
            "url16x16": LINK_CONSTANTS.icon_closed,
        });

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "globalId": "source=GitHub-jira-remote-link-action&repo=org/app&issue=7",
                "application": { "name": "GitHub" },
                "object": {
                    "url": "https://github.com/org/app/issues/7",
                    "title": "Fix PROJ-42 (org/app#7)",
                    "icon": icon,
                    "status": { "icon": icon, "resolved": true }
                },
                "relationship": "links to"
            })
        );
    }
}
