//! Graph wire types
//!
//! Only the fields this client sends or reads are modelled.

use serde::{Deserialize, Serialize};
use teamsmeeting_core::meeting::format_graph_datetime;
use teamsmeeting_domain::constants::ONLINE_MEETING_PROVIDER;
use teamsmeeting_domain::{EventWindow, Organizer};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl DateTimeTimeZone {
    pub fn start_of(window: &EventWindow) -> Self {
        Self {
            date_time: format_graph_datetime(window.start),
            time_zone: Some(window.time_zone.clone()),
        }
    }

    pub fn end_of(window: &EventWindow) -> Self {
        Self {
            date_time: format_graph_datetime(window.end),
            time_zone: Some(window.time_zone.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAddress {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: EmailAddress,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email_address: EmailAddress,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OnlineMeetingInfo {
    #[serde(default)]
    pub join_url: Option<String>,
}

/// Body of `POST /users/{email}/events`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub subject: String,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    pub allow_new_time_proposals: bool,
    pub organizer: Recipient,
    pub is_organizer: bool,
    #[serde(rename = "type")]
    pub event_type: String,
    pub response_requested: bool,
    pub is_reminder_on: bool,
    pub reminder_minutes_before_start: u32,
    pub attendees: Vec<Attendee>,
    pub is_online_meeting: bool,
    pub online_meeting_provider: String,
}

impl NewEvent {
    /// One-shot Teams event owned and attended by the organizer only.
    pub fn broadcast(subject: &str, window: &EventWindow, organizer: &Organizer) -> Self {
        let email = EmailAddress {
            name: organizer.full_name.clone(),
            address: organizer.email.clone(),
        };

        Self {
            subject: subject.to_string(),
            start: DateTimeTimeZone::start_of(window),
            end: DateTimeTimeZone::end_of(window),
            allow_new_time_proposals: false,
            organizer: Recipient { email_address: email.clone() },
            is_organizer: true,
            event_type: "singleInstance".to_string(),
            response_requested: false,
            is_reminder_on: false,
            reminder_minutes_before_start: 0,
            attendees: vec![Attendee { email_address: email }],
            is_online_meeting: true,
            online_meeting_provider: ONLINE_MEETING_PROVIDER.to_string(),
        }
    }
}

/// Body of `PATCH /users/{email}/events/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct EventPatch {
    pub subject: String,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
}

impl EventPatch {
    pub fn new(subject: &str, window: &EventWindow) -> Self {
        Self {
            subject: subject.to_string(),
            start: DateTimeTimeZone::start_of(window),
            end: DateTimeTimeZone::end_of(window),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEvent {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub start: Option<DateTimeTimeZone>,
    #[serde(default)]
    pub end: Option<DateTimeTimeZone>,
    #[serde(default)]
    pub online_meeting: Option<OnlineMeetingInfo>,
    #[serde(default)]
    pub online_meeting_url: Option<String>,
}

impl GraphEvent {
    pub fn join_url(&self) -> Option<String> {
        self.online_meeting
            .as_ref()
            .and_then(|m| m.join_url.clone())
            .or_else(|| self.online_meeting_url.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentitySet {
    pub user: Identity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingParticipantInfo {
    pub identity: IdentitySet,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingParticipants {
    pub organizer: MeetingParticipantInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LobbyBypassSettings {
    pub scope: String,
    pub is_dial_in_bypass_enabled: bool,
}

/// Body of `POST /communications/onlineMeetings`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOnlineMeeting {
    pub subject: String,
    pub participants: MeetingParticipants,
    pub lobby_bypass_settings: LobbyBypassSettings,
    pub auto_admitted_users: String,
    pub allowed_presenters: String,
}

impl NewOnlineMeeting {
    /// Open meeting: everyone skips the lobby, only the organizer presents.
    pub fn reusable(organizer_user_id: &str, subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            participants: MeetingParticipants {
                organizer: MeetingParticipantInfo {
                    identity: IdentitySet { user: Identity { id: organizer_user_id.to_string() } },
                },
            },
            lobby_bypass_settings: LobbyBypassSettings {
                scope: "everyone".to_string(),
                is_dial_in_bypass_enabled: true,
            },
            auto_admitted_users: "everyone".to_string(),
            allowed_presenters: "organizer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphOnlineMeeting {
    pub id: String,
    #[serde(default)]
    pub join_web_url: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub video_teleconference_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphCollection<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphUser {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorEnvelope {
    pub error: GraphErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
