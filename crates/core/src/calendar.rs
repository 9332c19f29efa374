//! Course calendar planning
//!
//! Works out which calendar entries the course shows for a meeting. Storing
//! them is left to the host.

use serde::{Deserialize, Serialize};
use teamsmeeting_domain::constants::{CLOSE_SESSION_SUFFIX, OPEN_SESSION_SUFFIX};
use teamsmeeting_domain::MeetingInstance;

/// Kind of calendar entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CourseEventKind {
    /// Single entry covering the whole meeting
    Span,
    Open,
    Close,
}

/// Calendar entry derived from a meeting instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseEvent {
    pub name: String,
    pub kind: CourseEventKind,
    pub time_start: i64,
    /// Seconds; zero for point-in-time entries
    pub duration: i64,
}

/// Plan the calendar entries for `instance`.
///
/// A bounded meeting gets one spanning entry; otherwise each set date gets
/// its own marker.
pub fn plan_calendar_events(instance: &MeetingInstance) -> Vec<CourseEvent> {
    match (instance.open_date, instance.close_date) {
        (Some(open), Some(close)) if close > open => vec![CourseEvent {
            name: instance.name.clone(),
            kind: CourseEventKind::Span,
            time_start: open,
            duration: close - open,
        }],
        (open, close) => {
            let mut events = Vec::with_capacity(2);
            if let Some(open) = open {
                events.push(CourseEvent {
                    name: format!("{}{OPEN_SESSION_SUFFIX}", instance.name),
                    kind: CourseEventKind::Open,
                    time_start: open,
                    duration: 0,
                });
            }
            if let Some(close) = close {
                events.push(CourseEvent {
                    name: format!("{}{CLOSE_SESSION_SUFFIX}", instance.name),
                    kind: CourseEventKind::Close,
                    time_start: close,
                    duration: 0,
                });
            }
            events
        }
    }
}
