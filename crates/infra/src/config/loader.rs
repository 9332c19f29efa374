//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required credentials are missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TEAMSMEETING_TENANT_ID`: Azure AD tenant (required)
//! - `TEAMSMEETING_CLIENT_ID`: application id (required)
//! - `TEAMSMEETING_CLIENT_SECRET`: application secret (required)
//! - `TEAMSMEETING_PROXY`: outbound proxy URL
//! - `TEAMSMEETING_LOGIN_BASE_URL`: token endpoint host
//! - `TEAMSMEETING_GRAPH_BASE_URL`: Graph API host
//! - `TEAMSMEETING_DEFAULT_DURATION_MINUTES`: length of meetings without a close date
//! - `TEAMSMEETING_TIMEZONE`: IANA zone used for event times
//! - `TEAMSMEETING_NOTIFY_ON_CREATE`: send a confirmation after creation (true/false)
//! - `TEAMSMEETING_HTTP_TIMEOUT_SECS`: per-request timeout
//! - `TEAMSMEETING_HTTP_MAX_ATTEMPTS`: total attempts per request
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` and `teamsmeeting.{json,toml}` in
//! the current directory, its two parents, and the same three levels around
//! the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use teamsmeeting_domain::{
    Config, GraphConfig, HttpSettings, MeetingError, MeetingSettings, Result,
};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "teamsmeeting.json", "teamsmeeting.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `MeetingError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or fail validation
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The three credential variables are required; everything else falls back
/// to its default.
///
/// # Errors
/// Returns `MeetingError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let mut graph = GraphConfig::new(
        env_var("TEAMSMEETING_TENANT_ID")?,
        env_var("TEAMSMEETING_CLIENT_ID")?,
        env_var("TEAMSMEETING_CLIENT_SECRET")?,
    );
    graph.proxy = env_opt("TEAMSMEETING_PROXY");
    if let Some(url) = env_opt("TEAMSMEETING_LOGIN_BASE_URL") {
        graph.login_base_url = url;
    }
    if let Some(url) = env_opt("TEAMSMEETING_GRAPH_BASE_URL") {
        graph.graph_base_url = url;
    }

    let mut meeting = MeetingSettings::default();
    if let Some(minutes) = env_parse("TEAMSMEETING_DEFAULT_DURATION_MINUTES", "default duration")? {
        meeting.default_duration_minutes = minutes;
    }
    if let Some(tz) = env_opt("TEAMSMEETING_TIMEZONE") {
        meeting.timezone = tz;
    }
    meeting.notify_on_create = env_bool("TEAMSMEETING_NOTIFY_ON_CREATE", false);

    let mut http = HttpSettings::default();
    if let Some(secs) = env_parse("TEAMSMEETING_HTTP_TIMEOUT_SECS", "HTTP timeout")? {
        http.timeout_secs = secs;
    }
    if let Some(attempts) = env_parse("TEAMSMEETING_HTTP_MAX_ATTEMPTS", "HTTP attempt count")? {
        http.max_attempts = attempts;
    }

    let config = Config { graph, meeting, http };
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MeetingError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing or fail validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MeetingError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MeetingError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MeetingError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MeetingError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MeetingError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(MeetingError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| [root.clone(), root.join(".."), root.join("../..")])
        .flat_map(|dir| CONFIG_FILE_NAMES.map(|name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `MeetingError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        MeetingError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| MeetingError::Config(format!("Invalid {what} in {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
