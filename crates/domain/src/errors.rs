//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for meeting operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MeetingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not unique: {0}")]
    NotUnique(String),

    /// Error reported by the meeting provider itself. `message` is the
    /// provider's text and is meant to be shown to the user as is.
    #[error("Provider error ({code}): {message}")]
    Provider { code: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MeetingError {
    /// Message suitable for display next to a failed action.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Provider { message, .. } => message,
            Self::Config(m)
            | Self::Network(m)
            | Self::Auth(m)
            | Self::NotFound(m)
            | Self::InvalidInput(m)
            | Self::NotUnique(m)
            | Self::Internal(m) => m,
        }
    }
}

/// Result type alias for meeting operations
pub type Result<T> = std::result::Result<T, MeetingError>;
