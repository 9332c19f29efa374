//! Date reconciliation between the course schedule and provider events
//!
//! Course dates are Unix timestamps; the provider speaks wall-clock
//! `dateTime` strings paired with a zone name. Everything crossing that
//! boundary goes through this module.

use std::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use teamsmeeting_domain::constants::GRAPH_DATETIME_FORMAT;
use teamsmeeting_domain::{EventWindow, MeetingError, RemoteMeeting, Result};
use tracing::warn;

/// Compute the window sent to the provider for a broadcast event.
///
/// The start falls back to `now` and the end to start + `default_duration`.
///
/// # Errors
/// Returns `MeetingError::InvalidInput` when a date or the derived end lies
/// outside the representable calendar range.
pub fn resolve_window(
    open_date: Option<i64>,
    close_date: Option<i64>,
    now: DateTime<Utc>,
    default_duration: Duration,
    tz: Tz,
) -> Result<EventWindow> {
    let start_utc = match open_date {
        Some(ts) => instant(ts, "Opening")?,
        None => now,
    };
    let end_utc = match close_date {
        Some(ts) => instant(ts, "Closing")?,
        None => start_utc.checked_add_signed(default_duration).ok_or_else(|| {
            MeetingError::InvalidInput("Opening date leaves no room for the meeting.".into())
        })?,
    };

    Ok(EventWindow {
        start: start_utc.with_timezone(&tz).naive_local(),
        end: end_utc.with_timezone(&tz).naive_local(),
        time_zone: tz.name().to_string(),
    })
}

fn instant(timestamp: i64, label: &str) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        MeetingError::InvalidInput(format!("{label} date {timestamp} is out of range."))
    })
}

/// Render a wall-clock time the way Graph expects it.
pub fn format_graph_datetime(value: NaiveDateTime) -> String {
    value.format(GRAPH_DATETIME_FORMAT).to_string()
}

/// Convert a Graph `dateTimeTimeZone` pair into a Unix timestamp.
///
/// Unknown zone names (Graph may answer with Windows zone names) are read in
/// `fallback_tz`. Ambiguous local times resolve to the earliest instant.
///
/// # Errors
/// Returns `MeetingError::InvalidInput` when the value cannot be parsed or
/// names a local time that does not exist.
pub fn parse_graph_datetime(
    date_time: &str,
    time_zone: Option<&str>,
    fallback_tz: Tz,
) -> Result<i64> {
    let raw = date_time.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.timestamp());
    }

    let naive = NaiveDateTime::parse_from_str(raw.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| MeetingError::InvalidInput(format!("Invalid event dateTime '{raw}': {e}")))?;

    let tz = match time_zone.map(str::trim).filter(|name| !name.is_empty()) {
        None => fallback_tz,
        Some(name) if name.eq_ignore_ascii_case("utc") => Tz::UTC,
        Some(name) => Tz::from_str(name).unwrap_or_else(|_| {
            warn!(time_zone = name, fallback = fallback_tz.name(), "unknown event time zone");
            fallback_tz
        }),
    };

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.timestamp()),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.timestamp()),
        LocalResult::None => Err(MeetingError::InvalidInput(format!(
            "Event dateTime '{raw}' does not exist in {}",
            tz.name()
        ))),
    }
}

/// Fill dates the instructor left empty with the provider's start and end.
pub fn reconcile_dates(
    open_date: Option<i64>,
    close_date: Option<i64>,
    remote: &RemoteMeeting,
) -> (Option<i64>, Option<i64>) {
    (open_date.or(remote.start), close_date.or(remote.end))
}
