//! Recording mock for the `MeetingProvider` port

use std::sync::Mutex;

use async_trait::async_trait;
use teamsmeeting_core::MeetingProvider;
use teamsmeeting_domain::{EventWindow, MeetingError, Organizer, RemoteMeeting, Result};

/// Calls observed by [`RecordingProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindUser(String),
    CreateEvent { subject: String, window: EventWindow, organizer_email: String },
    UpdateEvent { event_id: String, subject: String, window: EventWindow },
    CreateOnline { user_id: String, subject: String },
    GetEvent { email: String, event_id: String },
    FindOnline(String),
    DeleteOnline(String),
}

/// In-memory provider that records every call.
///
/// Broadcast events echo the requested window back, read as UTC, the way
/// Graph does when asked for UTC times.
pub struct RecordingProvider {
    pub calls: Mutex<Vec<Call>>,
    pub user_id: Option<String>,
    pub event_exists: bool,
    pub fail_with: Option<MeetingError>,
}

impl Default for RecordingProvider {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            user_id: Some("aad-user-1".into()),
            event_exists: true,
            fail_with: None,
        }
    }
}

impl RecordingProvider {
    pub fn without_account() -> Self {
        Self { user_id: None, ..Self::default() }
    }

    pub fn failing(error: MeetingError) -> Self {
        Self { fail_with: Some(error), ..Self::default() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check_failure(&self) -> Result<()> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn echo(id: &str, window: &EventWindow) -> RemoteMeeting {
        RemoteMeeting {
            id: id.to_string(),
            join_url: Some(format!("https://teams.microsoft.com/l/meetup-join/{id}")),
            start: Some(window.start.and_utc().timestamp()),
            end: Some(window.end.and_utc().timestamp()),
        }
    }
}

#[async_trait]
impl MeetingProvider for RecordingProvider {
    async fn find_user_id(&self, email: &str) -> Result<Option<String>> {
        self.record(Call::FindUser(email.to_string()));
        Ok(self.user_id.clone())
    }

    async fn create_broadcast_event(
        &self,
        subject: &str,
        window: &EventWindow,
        organizer: &Organizer,
    ) -> Result<RemoteMeeting> {
        self.record(Call::CreateEvent {
            subject: subject.to_string(),
            window: window.clone(),
            organizer_email: organizer.normalised_email(),
        });
        self.check_failure()?;
        Ok(Self::echo("evt-1", window))
    }

    async fn update_broadcast_event(
        &self,
        event_id: &str,
        subject: &str,
        window: &EventWindow,
        _organizer: &Organizer,
    ) -> Result<RemoteMeeting> {
        self.record(Call::UpdateEvent {
            event_id: event_id.to_string(),
            subject: subject.to_string(),
            window: window.clone(),
        });
        self.check_failure()?;
        Ok(Self::echo(event_id, window))
    }

    async fn create_online_meeting(
        &self,
        organizer_user_id: &str,
        subject: &str,
    ) -> Result<RemoteMeeting> {
        self.record(Call::CreateOnline {
            user_id: organizer_user_id.to_string(),
            subject: subject.to_string(),
        });
        self.check_failure()?;
        Ok(RemoteMeeting {
            id: "om-1".into(),
            join_url: Some("https://teams.microsoft.com/l/meetup-join/om-1".into()),
            start: None,
            end: None,
        })
    }

    async fn get_broadcast_event(
        &self,
        organizer_email: &str,
        event_id: &str,
    ) -> Result<RemoteMeeting> {
        self.record(Call::GetEvent {
            email: organizer_email.to_string(),
            event_id: event_id.to_string(),
        });
        if self.event_exists {
            Ok(RemoteMeeting { id: event_id.to_string(), join_url: None, start: None, end: None })
        } else {
            Err(MeetingError::NotFound(format!("event {event_id}")))
        }
    }

    async fn find_online_meeting(&self, id: &str) -> Result<Option<RemoteMeeting>> {
        self.record(Call::FindOnline(id.to_string()));
        Ok(None)
    }

    async fn delete_online_meeting(&self, meeting_id: &str) -> Result<()> {
        self.record(Call::DeleteOnline(meeting_id.to_string()));
        self.check_failure()
    }
}
