//! Link GitHub issues and pull requests to Jira.
//!
//! This crate reads a GitHub issue or pull request event, finds every Jira
//! issue key mentioned in it (`PROJ-42` style) and registers a remote link
//! on each of those Jira issues pointing back at the GitHub subject.
//!
//! # Usage
//!
//! ```no_run
//! use jira_link::{Config, JiraClient, LinkSynchronizer, TriggerEvent};
//! use std::path::Path;
//!
//! # async fn run() -> Result<(), jira_link::LinkError> {
//! let config = Config::new("acme.atlassian.net", "me@acme.io", "api-token", 3)?;
//! let sync = LinkSynchronizer::new(JiraClient::new(&config)?);
//!
//! if let Some(event) = TriggerEvent::load(Path::new("event.json"))? {
//!     let report = sync.run(&event).await?;
//!     println!("linked {} issue(s)", report.linked.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior
//!
//! - Keys are collected from the title, body and comment (in that order),
//!   deduplicated by first occurrence.
//! - The link status is `Reopened` for reopen events, otherwise follows the
//!   subject state (`open` → `Opened`, `closed` → `Closed`).
//! - Each key gets one `POST /rest/api/3/issue/{key}/remotelink`, strictly
//!   one after another. The first failure (transport error or non-2xx
//!   response) ends the run.
//! - The link's `globalId` is derived from repository and subject number, so
//!   re-running for the same subject updates the link in place.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod config;
pub mod error;
pub mod event;
pub mod keys;
pub mod payload;
pub mod status;
pub mod sync;

pub use client::{JiraClient, RemoteLinkPublisher};
pub use config::{Config, LinkConstants, LINK_CONSTANTS};
pub use error::LinkError;
pub use event::{Subject, SubjectState, TriggerEvent};
pub use keys::{extract_keys, JiraKey};
pub use payload::RemoteLinkRequest;
pub use status::LinkStatus;
pub use sync::{LinkPlan, LinkSynchronizer, SyncReport};
