//! Domain constants
//!
//! Provider identifiers and user-facing strings shared by the core and infra
//! crates.

/// Resource identifier requested when acquiring Graph tokens.
pub const GRAPH_RESOURCE: &str = "https://graph.microsoft.com/";
pub const DEFAULT_LOGIN_BASE_URL: &str = "https://login.microsoftonline.com";
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com";
pub const GRAPH_V1: &str = "v1.0";
pub const GRAPH_BETA: &str = "beta";

/// Online meeting provider requested for broadcast events.
pub const ONLINE_MEETING_PROVIDER: &str = "teamsForBusiness";

/// Wall-clock format used by Graph `dateTimeTimeZone` values.
pub const GRAPH_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.0000000";
/// Format used when showing dates to course users.
pub const DISPLAY_DATETIME_FORMAT: &str = "%d/%m/%Y %H:%M";

pub const DEFAULT_MEETING_DURATION_MINUTES: u32 = 60;
pub const DEFAULT_TIMEZONE: &str = "UTC";
pub const DEFAULT_TOKEN_REFRESH_SKEW_SECS: i64 = 300;
/// Upper bound for the refresh skew; tokens rarely live longer than a day.
pub const MAX_TOKEN_REFRESH_SKEW_SECS: i64 = 86_400;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_MAX_ATTEMPTS: usize = 1;
pub const DEFAULT_HTTP_BACKOFF_MS: u64 = 200;

// Calendar entry suffixes
pub const OPEN_SESSION_SUFFIX: &str = " (Teams meeting session start)";
pub const CLOSE_SESSION_SUFFIX: &str = " (Teams meeting session end)";

// Creation notice
pub const CREATION_NOTICE_SUBJECT: &str = "New Teams online meeting created";
