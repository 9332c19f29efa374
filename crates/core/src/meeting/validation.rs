//! Draft validation

use chrono::{DateTime, Utc};
use serde::Serialize;
use teamsmeeting_domain::{MeetingDraft, MeetingError};
use thiserror::Error;

/// Reason a draft cannot be scheduled
#[derive(Debug, Clone, Copy, Error, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleViolation {
    #[error("Meeting name is required.")]
    EmptyName,

    #[error("Closing date must be later than start date.")]
    CloseBeforeOpen,

    #[error("The period you defined cannot correspond to an old period.")]
    CloseInPast,
}

/// Check a draft against the scheduling rules.
///
/// All violations are reported, not just the first.
pub fn validate_draft(
    draft: &MeetingDraft,
    now: DateTime<Utc>,
) -> std::result::Result<(), Vec<ScheduleViolation>> {
    let mut violations = Vec::new();

    if draft.name.trim().is_empty() {
        violations.push(ScheduleViolation::EmptyName);
    }
    if let (Some(open), Some(close)) = (draft.open_date, draft.close_date) {
        if close < open {
            violations.push(ScheduleViolation::CloseBeforeOpen);
        }
    }
    if let Some(close) = draft.close_date {
        if close < now.timestamp() {
            violations.push(ScheduleViolation::CloseInPast);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Collapse violations into the error surfaced by the service.
pub fn violations_error(violations: &[ScheduleViolation]) -> MeetingError {
    let message = violations.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ");
    MeetingError::InvalidInput(message)
}
