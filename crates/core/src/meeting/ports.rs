//! Port interfaces for meeting scheduling
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use teamsmeeting_domain::{EventWindow, Organizer, RemoteMeeting, Result};

/// Trait for meeting provider operations
#[async_trait]
pub trait MeetingProvider: Send + Sync {
    /// Resolve a mailbox to the provider's directory user id.
    ///
    /// Returns `Ok(None)` when no account matches and
    /// `MeetingError::NotUnique` when several do.
    async fn find_user_id(&self, email: &str) -> Result<Option<String>>;

    /// Create a one-shot online event on the organizer's calendar.
    async fn create_broadcast_event(
        &self,
        subject: &str,
        window: &EventWindow,
        organizer: &Organizer,
    ) -> Result<RemoteMeeting>;

    /// Move or rename an existing broadcast event.
    async fn update_broadcast_event(
        &self,
        event_id: &str,
        subject: &str,
        window: &EventWindow,
        organizer: &Organizer,
    ) -> Result<RemoteMeeting>;

    /// Create a reusable online meeting owned by `organizer_user_id`.
    async fn create_online_meeting(
        &self,
        organizer_user_id: &str,
        subject: &str,
    ) -> Result<RemoteMeeting>;

    /// Fetch a broadcast event from the organizer's calendar.
    async fn get_broadcast_event(
        &self,
        organizer_email: &str,
        event_id: &str,
    ) -> Result<RemoteMeeting>;

    /// Look up an online meeting by its video teleconference id.
    async fn find_online_meeting(
        &self,
        video_teleconference_id: &str,
    ) -> Result<Option<RemoteMeeting>>;

    /// Delete a reusable online meeting.
    async fn delete_online_meeting(&self, meeting_id: &str) -> Result<()>;
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
