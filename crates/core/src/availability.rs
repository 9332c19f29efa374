//! Meeting availability rules
//!
//! Decides whether a course user may follow the meeting link right now and
//! renders the date details shown next to it.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use teamsmeeting_domain::constants::DISPLAY_DATETIME_FORMAT;
use teamsmeeting_domain::MeetingInstance;
use url::Url;

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AccessDecision {
    /// The link may be followed
    Granted { details: Option<String> },
    /// The meeting exists but is outside its open/close window
    NotAvailable { details: Option<String> },
    /// The meeting is gone or its link is unusable
    NotFound,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    /// Text shown to the user for this decision.
    pub fn message(&self) -> String {
        match self {
            Self::Granted { details } => details.clone().unwrap_or_default(),
            Self::NotAvailable { details } => format!(
                "Access to this meeting (virtual classroom) is not available.{} In case of \
                 difficulties please contact your course manager(s).",
                details.as_deref().map(|d| format!(" {d}")).unwrap_or_default()
            ),
            Self::NotFound => "The meeting could not be reached. The provider may be \
                               unavailable, or an organizer may have deleted this meeting."
                .to_string(),
        }
    }
}

fn format_local(ts: i64, tz: Tz) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&tz).format(DISPLAY_DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Describe the availability period, if any date is set.
pub fn details_dates(open_date: Option<i64>, close_date: Option<i64>, tz: Tz) -> Option<String> {
    match (open_date, close_date) {
        (Some(open), Some(close)) => {
            Some(format!("between {} and {}", format_local(open, tz), format_local(close, tz)))
        }
        (Some(open), None) => Some(format!("from {}", format_local(open, tz))),
        (None, Some(close)) => Some(format!("until {}", format_local(close, tz))),
        (None, None) => None,
    }
}

/// Full sentence announcing the availability period.
pub fn availability_message(
    open_date: Option<i64>,
    close_date: Option<i64>,
    tz: Tz,
) -> Option<String> {
    details_dates(open_date, close_date, tz)
        .map(|details| format!("Teams online meeting is available {details}."))
}

/// A join link must be an absolute http(s) URL.
pub fn is_joinable_url(candidate: &str) -> bool {
    Url::parse(candidate).map(|url| matches!(url.scheme(), "http" | "https")).unwrap_or(false)
}

/// Apply the access rules to an instance.
///
/// `meeting_exists` is the result of looking the meeting up at the provider;
/// it only matters for broadcast events. Managers bypass the date window.
pub fn evaluate_access(
    instance: &MeetingInstance,
    now: i64,
    can_manage: bool,
    meeting_exists: bool,
    tz: Tz,
) -> AccessDecision {
    let details = availability_message(instance.open_date, instance.close_date, tz);

    if instance.kind.is_broadcast() {
        if !meeting_exists {
            return AccessDecision::NotFound;
        }
        let not_open_yet = instance.open_date.is_some_and(|open| now < open);
        let already_closed = instance.close_date.is_some_and(|close| now > close);
        if (not_open_yet || already_closed) && !can_manage {
            return AccessDecision::NotAvailable { details };
        }
    }

    match instance.join_url.as_deref() {
        Some(url) if is_joinable_url(url) => AccessDecision::Granted { details },
        _ => AccessDecision::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::Europe::Paris;
    use teamsmeeting_domain::MeetingKind;

    use super::*;

    // 2024-06-01 08:00:00 UTC
    const OPEN: i64 = 1_717_228_800;
    const CLOSE: i64 = OPEN + 7200;

    fn instance(kind: MeetingKind) -> MeetingInstance {
        MeetingInstance {
            id: Some(1),
            course_id: 2,
            name: "Seminar".into(),
            intro: String::new(),
            kind,
            open_date: Some(OPEN),
            close_date: Some(CLOSE),
            remote_id: "evt-1".into(),
            join_url: Some("https://teams.microsoft.com/l/meetup-join/abc".into()),
            creator_id: 3,
            time_modified: 0,
        }
    }

    #[test]
    fn details_cover_every_combination() {
        assert_eq!(
            details_dates(Some(OPEN), Some(CLOSE), Tz::UTC).as_deref(),
            Some("between 01/06/2024 08:00 and 01/06/2024 10:00")
        );
        assert_eq!(details_dates(Some(OPEN), None, Paris).as_deref(), Some("from 01/06/2024 10:00"));
        assert_eq!(
            details_dates(None, Some(CLOSE), Tz::UTC).as_deref(),
            Some("until 01/06/2024 10:00")
        );
        assert_eq!(details_dates(None, None, Tz::UTC), None);
        assert_eq!(
            availability_message(None, Some(CLOSE), Tz::UTC).as_deref(),
            Some("Teams online meeting is available until 01/06/2024 10:00.")
        );
    }

    #[test]
    fn join_url_must_be_http() {
        assert!(is_joinable_url("https://teams.microsoft.com/l/meetup-join/abc"));
        assert!(!is_joinable_url("teams.microsoft.com/l/meetup-join"));
        assert!(!is_joinable_url("javascript:alert(1)"));
        assert!(!is_joinable_url(""));
    }

    #[test]
    fn broadcast_inside_window_is_granted() {
        let decision = evaluate_access(&instance(MeetingKind::Broadcast), OPEN + 60, false, true, Tz::UTC);
        assert!(decision.is_granted());
    }

    #[test]
    fn broadcast_outside_window_is_refused_to_students_only() {
        let meeting = instance(MeetingKind::Broadcast);
        let early = evaluate_access(&meeting, OPEN - 60, false, true, Tz::UTC);
        assert!(matches!(early, AccessDecision::NotAvailable { .. }));
        assert!(early.message().contains("between 01/06/2024 08:00"));

        let late = evaluate_access(&meeting, CLOSE + 60, false, true, Tz::UTC);
        assert!(matches!(late, AccessDecision::NotAvailable { .. }));

        assert!(evaluate_access(&meeting, CLOSE + 60, true, true, Tz::UTC).is_granted());
    }

    #[test]
    fn missing_broadcast_event_is_not_found_even_for_managers() {
        let decision = evaluate_access(&instance(MeetingKind::Broadcast), OPEN, true, false, Tz::UTC);
        assert_eq!(decision, AccessDecision::NotFound);
    }

    #[test]
    fn reusable_meetings_ignore_dates_and_lookup() {
        let meeting = instance(MeetingKind::Reusable);
        assert!(evaluate_access(&meeting, CLOSE + 10_000, false, false, Tz::UTC).is_granted());
    }

    #[test]
    fn invalid_join_url_is_not_found() {
        let mut meeting = instance(MeetingKind::Reusable);
        meeting.join_url = Some("not a url".into());
        assert_eq!(evaluate_access(&meeting, OPEN, true, true, Tz::UTC), AccessDecision::NotFound);
        meeting.join_url = None;
        assert_eq!(evaluate_access(&meeting, OPEN, true, true, Tz::UTC), AccessDecision::NotFound);
    }
}
