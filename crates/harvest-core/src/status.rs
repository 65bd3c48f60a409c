use serde::{Deserialize, Serialize};
use std::fmt;

/// Execution status of a link.
///
/// The negative sentinels and the success code are fixed. Any other code
/// belongs to the scheduler that owns dispatch and is carried as `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(from = "i32", into = "i32")]
pub enum LinkStatus {
    /// Execution completed. The only status from which extraction proceeds.
    Success,

    /// Queued, waiting.
    Pause,

    /// Intentionally dropped.
    Discard,

    /// Pending execution.
    #[default]
    Execute,

    /// Link or agent not trusted.
    Untrusted,

    /// Flagged for review.
    HighViz,

    /// Scheduler-owned code outside the fixed set.
    Other(i32),
}

impl LinkStatus {
    pub fn code(self) -> i32 {
        match self {
            LinkStatus::Success => 0,
            LinkStatus::Pause => -1,
            LinkStatus::Discard => -2,
            LinkStatus::Execute => -3,
            LinkStatus::Untrusted => -4,
            LinkStatus::HighViz => -5,
            LinkStatus::Other(code) => code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            0 => LinkStatus::Success,
            -1 => LinkStatus::Pause,
            -2 => LinkStatus::Discard,
            -3 => LinkStatus::Execute,
            -4 => LinkStatus::Untrusted,
            -5 => LinkStatus::HighViz,
            other => LinkStatus::Other(other),
        }
    }

    /// Name of a fixed status, `None` for scheduler-owned codes.
    pub fn name(self) -> Option<&'static str> {
        match self {
            LinkStatus::Success => Some("SUCCESS"),
            LinkStatus::Pause => Some("PAUSE"),
            LinkStatus::Discard => Some("DISCARD"),
            LinkStatus::Execute => Some("EXECUTE"),
            LinkStatus::Untrusted => Some("UNTRUSTED"),
            LinkStatus::HighViz => Some("HIGH_VIZ"),
            LinkStatus::Other(_) => None,
        }
    }

    pub fn is_success(self) -> bool {
        self.code() == 0
    }

    /// Excluded from downstream chaining.
    pub fn can_ignore(self) -> bool {
        matches!(self.code(), -2 | -5)
    }
}

impl From<i32> for LinkStatus {
    fn from(code: i32) -> Self {
        LinkStatus::from_code(code)
    }
}

impl From<LinkStatus> for i32 {
    fn from(status: LinkStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.code()),
        }
    }
}
