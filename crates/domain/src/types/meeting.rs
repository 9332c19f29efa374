//! Meeting types
//!
//! `MeetingInstance` mirrors the local record kept for each course meeting;
//! `RemoteMeeting` is the provider-neutral view of what the meeting API
//! returned. Dates are Unix timestamps in seconds; `None` means unset.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// How a meeting is bound in time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MeetingKind {
    /// One-shot calendar event with explicit start and end
    Broadcast,
    /// Persistent online meeting usable from creation
    Reusable,
}

impl MeetingKind {
    /// Map the stored `reuse_meeting` flag (`0` one-shot, anything else
    /// reusable).
    pub fn from_reuse_flag(flag: i64) -> Self {
        if flag == 0 {
            Self::Broadcast
        } else {
            Self::Reusable
        }
    }

    pub fn reuse_flag(self) -> i64 {
        match self {
            Self::Broadcast => 0,
            Self::Reusable => 1,
        }
    }

    pub fn is_broadcast(self) -> bool {
        matches!(self, Self::Broadcast)
    }
}

/// Meeting data submitted by an instructor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingDraft {
    pub name: String,
    #[serde(default)]
    pub intro: String,
    pub kind: MeetingKind,
    #[serde(default)]
    pub open_date: Option<i64>,
    #[serde(default)]
    pub close_date: Option<i64>,
}

impl MeetingDraft {
    /// Build a draft from date pickers guarded by "enable" toggles.
    ///
    /// A disabled toggle clears its date whatever the picker holds.
    pub fn from_toggles(
        name: impl Into<String>,
        intro: impl Into<String>,
        kind: MeetingKind,
        use_open: bool,
        open_date: i64,
        use_close: bool,
        close_date: i64,
    ) -> Self {
        Self {
            name: name.into(),
            intro: intro.into(),
            kind,
            open_date: use_open.then_some(open_date).filter(|ts| *ts > 0),
            close_date: use_close.then_some(close_date).filter(|ts| *ts > 0),
        }
    }
}

/// Local record of a scheduled meeting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingInstance {
    /// Local record id, `None` until stored
    pub id: Option<i64>,
    pub course_id: i64,
    pub name: String,
    pub intro: String,
    pub kind: MeetingKind,
    pub open_date: Option<i64>,
    pub close_date: Option<i64>,
    /// Event id (broadcast) or online meeting id (reusable)
    pub remote_id: String,
    pub join_url: Option<String>,
    pub creator_id: i64,
    pub time_modified: i64,
}

/// Meeting as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteMeeting {
    pub id: String,
    pub join_url: Option<String>,
    /// Start of a broadcast event, already converted to a timestamp
    pub start: Option<i64>,
    pub end: Option<i64>,
}

/// Wall-clock window sent to the provider for a broadcast event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// IANA zone the wall-clock times are expressed in
    pub time_zone: String,
}
