//! Shared test helpers for `teamsmeeting-core` integration tests.
//!
//! These helpers provide a recording provider mock and a pinned clock so the
//! service tests can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod provider;

use chrono::{DateTime, Utc};
use teamsmeeting_core::Clock;
use teamsmeeting_domain::{Course, MeetingDraft, MeetingKind, Organizer};

/// 2024-06-01 08:00:00 UTC
pub const NOW: i64 = 1_717_228_800;

/// Clock frozen at a fixed timestamp.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.0, 0).unwrap_or_default()
    }
}

pub fn course() -> Course {
    Course { id: 42, full_name: "Linear Algebra".into() }
}

pub fn organizer() -> Organizer {
    Organizer::new(7, "Ada Lovelace", "Ada.Lovelace@Example.edu")
}

pub fn draft(kind: MeetingKind, open: Option<i64>, close: Option<i64>) -> MeetingDraft {
    MeetingDraft {
        name: "Tutorial".into(),
        intro: "Weekly tutorial".into(),
        kind,
        open_date: open,
        close_date: close,
    }
}
