//! Configuration structures
//!
//! Loaded by `teamsmeeting-infra::config` from the environment or from a
//! JSON/TOML file. Every section has serde defaults except the Graph
//! application credentials.

use std::str::FromStr;
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GRAPH_BASE_URL, DEFAULT_HTTP_BACKOFF_MS, DEFAULT_HTTP_MAX_ATTEMPTS,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LOGIN_BASE_URL, DEFAULT_MEETING_DURATION_MINUTES,
    DEFAULT_TIMEZONE, DEFAULT_TOKEN_REFRESH_SKEW_SECS, MAX_TOKEN_REFRESH_SKEW_SECS,
};
use crate::errors::{MeetingError, Result};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub graph: GraphConfig,
    #[serde(default)]
    pub meeting: MeetingSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

impl Config {
    /// Reject values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("graph.tenant_id", &self.graph.tenant_id),
            ("graph.client_id", &self.graph.client_id),
            ("graph.client_secret", &self.graph.client_secret),
        ] {
            if value.trim().is_empty() {
                return Err(MeetingError::Config(format!("{key} must not be empty")));
            }
        }
        if self.meeting.default_duration_minutes == 0 {
            return Err(MeetingError::Config(
                "meeting.default_duration_minutes must be greater than 0".into(),
            ));
        }
        if !(0..=MAX_TOKEN_REFRESH_SKEW_SECS).contains(&self.graph.token_refresh_skew_secs) {
            return Err(MeetingError::Config(format!(
                "graph.token_refresh_skew_secs must be between 0 and {MAX_TOKEN_REFRESH_SKEW_SECS}"
            )));
        }
        self.meeting.tz()?;
        Ok(())
    }
}

/// Azure AD application and Graph endpoint settings
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphConfig {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Outbound proxy URL, when the host network requires one
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default = "default_login_base_url")]
    pub login_base_url: String,
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,
    /// Refresh cached tokens this many seconds before they expire
    #[serde(default = "default_token_refresh_skew_secs")]
    pub token_refresh_skew_secs: i64,
}

impl GraphConfig {
    /// Settings pointing at the public Microsoft endpoints.
    pub fn new(tenant_id: String, client_id: String, client_secret: String) -> Self {
        Self {
            tenant_id,
            client_id,
            client_secret,
            proxy: None,
            login_base_url: default_login_base_url(),
            graph_base_url: default_graph_base_url(),
            token_refresh_skew_secs: default_token_refresh_skew_secs(),
        }
    }
}

// Keeps the client secret out of logs.
impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("proxy", &self.proxy)
            .field("login_base_url", &self.login_base_url)
            .field("graph_base_url", &self.graph_base_url)
            .field("token_refresh_skew_secs", &self.token_refresh_skew_secs)
            .finish()
    }
}

/// Meeting scheduling rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingSettings {
    /// Duration applied when a broadcast event has no close date
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    /// IANA zone used to format event times and display dates
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Attach a creation notice to newly scheduled broadcast events
    #[serde(default)]
    pub notify_on_create: bool,
}

impl MeetingSettings {
    /// Parsed timezone.
    ///
    /// # Errors
    /// Returns `MeetingError::Config` for unknown zone names.
    pub fn tz(&self) -> Result<Tz> {
        Tz::from_str(&self.timezone)
            .map_err(|_| MeetingError::Config(format!("Unknown timezone: {}", self.timezone)))
    }

    pub fn default_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.default_duration_minutes))
    }
}

impl Default for MeetingSettings {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            timezone: default_timezone(),
            notify_on_create: false,
        }
    }
}

/// Outbound HTTP behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpSettings {
    #[serde(default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per request; 1 disables retries
    #[serde(default = "default_http_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_http_backoff_ms")]
    pub base_backoff_ms: u64,
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_backoff(&self) -> Duration {
        Duration::from_millis(self.base_backoff_ms)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_http_timeout_secs(),
            max_attempts: default_http_max_attempts(),
            base_backoff_ms: default_http_backoff_ms(),
        }
    }
}

fn default_login_base_url() -> String {
    DEFAULT_LOGIN_BASE_URL.to_string()
}

fn default_graph_base_url() -> String {
    DEFAULT_GRAPH_BASE_URL.to_string()
}

fn default_token_refresh_skew_secs() -> i64 {
    DEFAULT_TOKEN_REFRESH_SKEW_SECS
}

fn default_duration_minutes() -> u32 {
    DEFAULT_MEETING_DURATION_MINUTES
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_http_max_attempts() -> usize {
    DEFAULT_HTTP_MAX_ATTEMPTS
}

fn default_http_backoff_ms() -> u64 {
    DEFAULT_HTTP_BACKOFF_MS
}
