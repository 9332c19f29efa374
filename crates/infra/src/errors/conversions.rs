//! Conversions from external infrastructure errors into domain errors.

use reqwest::{Error as HttpError, StatusCode};
use serde_json::Error as JsonError;
use teamsmeeting_domain::MeetingError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MeetingError);

impl From<InfraError> for MeetingError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MeetingError> for InfraError {
    fn from(value: MeetingError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoMeetingError {
    fn into_meeting(self) -> MeetingError;
}

/// Classify an HTTP status the same way failed `reqwest` calls are.
pub fn status_error(status: StatusCode) -> MeetingError {
    let code = status.as_u16();
    let message =
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

    match code {
        401 | 403 => MeetingError::Auth(message),
        404 => MeetingError::NotFound(message),
        429 => MeetingError::Network(message),
        400..=499 => MeetingError::InvalidInput(message),
        _ => MeetingError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MeetingError */
/* -------------------------------------------------------------------------- */

impl IntoMeetingError for HttpError {
    fn into_meeting(self) -> MeetingError {
        if self.is_timeout() {
            return MeetingError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return MeetingError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_error(status);
        }

        if self.is_decode() {
            return MeetingError::InvalidInput(format!("undecodable HTTP response: {self}"));
        }

        MeetingError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_meeting())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → MeetingError */
/* -------------------------------------------------------------------------- */

impl IntoMeetingError for JsonError {
    fn into_meeting(self) -> MeetingError {
        MeetingError::InvalidInput(format!("malformed JSON payload: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_meeting())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
