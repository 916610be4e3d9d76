//! Link status resolution.

use std::fmt;

use crate::config::LinkConstants;
use crate::error::LinkError;
use crate::event::{SubjectState, TriggerEvent};

/// Status shown on the Jira remote link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    Opened,
    Closed,
    Reopened,
}

impl LinkStatus {
    /// Determine the status for an event.
    ///
    /// A reopen always wins over the subject's state.
    pub fn resolve(event: &TriggerEvent) -> Result<Self, LinkError> {
        if event.action == "reopened" {
            return Ok(Self::Reopened);
        }

        match event.subject.state() {
            SubjectState::Open => Ok(Self::Opened),
            SubjectState::Closed => Ok(Self::Closed),
            SubjectState::Unknown => Err(LinkError::configuration(
                "Couldn't detect status from event",
            )),
        }
    }

    /// Display title shown next to the icon.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Opened => "Opened",
            Self::Closed => "Closed",
            Self::Reopened => "Reopened",
        }
    }

    /// Whether Jira should render the link as resolved (struck through).
    #[must_use]
    pub const fn resolved(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Icon URL for this status.
    #[must_use]
    pub const fn icon<'a>(&self, constants: &'a LinkConstants) -> &'a str {
        match self {
            Self::Opened => constants.icon_opened,
            Self::Closed => constants.icon_closed,
            Self::Reopened => constants.icon_reopened,
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
