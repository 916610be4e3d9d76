//! Sequential link synchronization for one trigger event.

use tracing::{debug, info};

use crate::client::RemoteLinkPublisher;
use crate::config::LinkConstants;
use crate::error::LinkError;
use crate::event::TriggerEvent;
use crate::keys::{extract_keys, JiraKey};
use crate::payload::RemoteLinkRequest;
use crate::status::LinkStatus;

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Keys that received a remote link, in request order.
    pub linked: Vec<JiraKey>,
}

/// What a run would send, without sending it.
#[derive(Debug, Clone)]
pub struct LinkPlan {
    pub keys: Vec<JiraKey>,
    /// `None` when there are no keys to link.
    pub request: Option<RemoteLinkRequest>,
}

/// Links one event's subject to every Jira issue it mentions.
pub struct LinkSynchronizer<P> {
    publisher: P,
    constants: LinkConstants,
}

impl<P: RemoteLinkPublisher> LinkSynchronizer<P> {
    #[must_use]
    pub fn new(publisher: P) -> Self {
        Self::with_constants(publisher, LinkConstants::default())
    }

    #[must_use]
    pub const fn with_constants(publisher: P, constants: LinkConstants) -> Self {
        Self {
            publisher,
            constants,
        }
    }

    #[must_use]
    pub const fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Work out keys and request body without touching Jira.
    ///
    /// Status is only resolved when there is at least one key, so an event
    /// with no references never fails on an undetectable status.
    pub fn plan(&self, event: &TriggerEvent) -> Result<LinkPlan, LinkError> {
        let keys = extract_keys(event);
        if keys.is_empty() {
            return Ok(LinkPlan {
                keys,
                request: None,
            });
        }

        let status = LinkStatus::resolve(event)?;
        let request = RemoteLinkRequest::build(event, status, &self.constants);

        Ok(LinkPlan {
            keys,
            request: Some(request),
        })
    }

    /// Publish the remote link for every referenced key.
    ///
    /// Requests go out one at a time. The first failure ends the run and keys
    /// after it are not attempted; links already created stay in place.
    pub async fn run(&self, event: &TriggerEvent) -> Result<SyncReport, LinkError> {
        let LinkPlan { keys, request } = self.plan(event)?;

        let Some(request) = request else {
            info!(
                kind = event.subject.kind(),
                number = event.subject.number(),
                "No Jira keys referenced, nothing to link"
            );
            return Ok(SyncReport::default());
        };

        info!(
            kind = event.subject.kind(),
            number = event.subject.number(),
            repository = %event.repository_full_name,
            key_count = keys.len(),
            resolved = request.object.status.resolved,
            "Linking to Jira issues"
        );

        let mut report = SyncReport::default();
        for key in keys {
            self.publisher.publish(&key, &request).await?;
            debug!(key = %key, "Remote link created");
            report.linked.push(key);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Issue, Subject, SubjectState};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl RemoteLinkPublisher for Recorder {
        async fn publish(
            &self,
            key: &JiraKey,
            _request: &RemoteLinkRequest,
        ) -> Result<(), LinkError> {
            self.calls.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    fn event(title: &str, state: SubjectState) -> TriggerEvent {
        TriggerEvent {
            action: "edited".to_string(),
            subject: Subject::Issue(Issue {
                number: 9,
                title: Some(title.to_string()),
                body: None,
                state,
                html_url: "https://github.com/o/r/issues/9".to_string(),
            }),
            repository_full_name: "o/r".to_string(),
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_no_keys_no_requests() {
        let sync = LinkSynchronizer::new(Recorder::default());
        // Unknown state would fail resolution, but there is nothing to link
        let report = sync
            .run(&event("nothing here", SubjectState::Unknown))
            .await
            .unwrap();
        assert!(report.linked.is_empty());
        assert!(sync.publisher().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_status_fails_before_any_request() {
        let sync = LinkSynchronizer::new(Recorder::default());
        let err = sync
            .run(&event("A-1 B-2", SubjectState::Unknown))
            .await
            .unwrap_err();
        assert!(matches!(err, LinkError::Configuration(_)));
        assert!(sync.publisher().calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_keys_published_in_order() {
        let sync = LinkSynchronizer::new(Recorder::default());
        let report = sync
            .run(&event("B-2 then A-1 then B-2", SubjectState::Open))
            .await
            .unwrap();
        assert_eq!(
            report.linked.iter().map(JiraKey::as_str).collect::<Vec<_>>(),
            vec!["B-2", "A-1"]
        );
        assert_eq!(*sync.publisher().calls.lock().unwrap(), vec!["B-2", "A-1"]);
    }

    #[test]
    fn test_plan_builds_single_request() {
        let sync = LinkSynchronizer::new(Recorder::default());
        let plan = sync.plan(&event("X-1 Y-2", SubjectState::Closed)).unwrap();
        assert_eq!(plan.keys.len(), 2);
        let request = plan.request.unwrap();
        assert!(request.object.status.resolved);
        assert_eq!(request.object.title, "X-1 Y-2 (o/r#9)");
    }
}
