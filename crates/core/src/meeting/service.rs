//! Meeting scheduling service - core business logic

use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use teamsmeeting_domain::{
    Course, EventWindow, MeetingDraft, MeetingError, MeetingInstance, MeetingKind, MeetingSettings, Organizer,
    RemoteMeeting, Result,
};
use tracing::{debug, info, warn};

use super::ports::{Clock, MeetingProvider, SystemClock};
use super::schedule::{reconcile_dates, resolve_window};
use super::validation::{validate_draft, violations_error};
use crate::availability::{evaluate_access, AccessDecision};
use crate::calendar::{plan_calendar_events, CourseEvent};
use crate::notification::CreationNotice;

/// Result of scheduling or rescheduling a meeting
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOutcome {
    pub instance: MeetingInstance,
    pub calendar: Vec<CourseEvent>,
    pub notice: Option<CreationNotice>,
}

/// Meeting scheduling service
pub struct MeetingService {
    provider: Arc<dyn MeetingProvider>,
    settings: MeetingSettings,
    tz: Tz,
    clock: Arc<dyn Clock>,
}

impl MeetingService {
    /// Create a new meeting service
    ///
    /// # Errors
    /// Returns `MeetingError::Config` if the configured timezone is unknown.
    pub fn new(provider: Arc<dyn MeetingProvider>, settings: MeetingSettings) -> Result<Self> {
        let tz = settings.tz()?;
        Ok(Self { provider, settings, tz, clock: Arc::new(SystemClock) })
    }

    /// Replace the clock (tests pin the current time with this).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Create the remote meeting for a new course instance.
    pub async fn schedule(
        &self,
        draft: &MeetingDraft,
        course: &Course,
        organizer: &Organizer,
    ) -> Result<ScheduleOutcome> {
        let now = self.clock.now();
        validate_draft(draft, now).map_err(|v| violations_error(&v))?;

        let window = match draft.kind {
            MeetingKind::Broadcast => Some(self.window_for(draft, now)?),
            MeetingKind::Reusable => None,
        };
        let user_id = self.require_account(organizer).await?;

        let (remote, open_date, close_date) = match window {
            Some(window) => {
                let remote =
                    self.provider.create_broadcast_event(&draft.name, &window, organizer).await?;
                let (open, close) = reconcile_dates(draft.open_date, draft.close_date, &remote);
                (remote, open, close)
            }
            None => {
                let remote = self.provider.create_online_meeting(&user_id, &draft.name).await?;
                (remote, draft.open_date, draft.close_date)
            }
        };

        info!(
            course_id = course.id,
            remote_id = %remote.id,
            kind = ?draft.kind,
            "meeting created at provider"
        );

        let instance = MeetingInstance {
            id: None,
            course_id: course.id,
            name: draft.name.clone(),
            intro: draft.intro.clone(),
            kind: draft.kind,
            open_date,
            close_date,
            remote_id: remote.id,
            join_url: remote.join_url,
            creator_id: organizer.id,
            time_modified: now.timestamp(),
        };

        let notice = match (&instance.join_url, draft.kind) {
            (Some(url), MeetingKind::Broadcast) if self.settings.notify_on_create => {
                Some(CreationNotice::compose(&instance.name, &course.full_name, url))
            }
            _ => None,
        };

        Ok(ScheduleOutcome { calendar: plan_calendar_events(&instance), instance, notice })
    }

    /// Apply an edited draft to an existing instance.
    ///
    /// The provider is only called when the name or a date changed. The
    /// meeting kind is fixed at creation.
    pub async fn reschedule(
        &self,
        existing: &MeetingInstance,
        draft: &MeetingDraft,
        creator: &Organizer,
    ) -> Result<ScheduleOutcome> {
        let now = self.clock.now();
        validate_draft(draft, now).map_err(|v| violations_error(&v))?;

        let mut instance = existing.clone();
        instance.name = draft.name.clone();
        instance.intro = draft.intro.clone();
        instance.open_date = draft.open_date;
        instance.close_date = draft.close_date;
        instance.time_modified = now.timestamp();

        let changed = draft.name != existing.name
            || draft.open_date != existing.open_date
            || draft.close_date != existing.close_date;

        if changed && existing.kind.is_broadcast() {
            let window = self.window_for(draft, now)?;
            self.require_account(creator).await?;

            let remote = self
                .provider
                .update_broadcast_event(&existing.remote_id, &draft.name, &window, creator)
                .await?;

            let (open, close) = reconcile_dates(draft.open_date, draft.close_date, &remote);
            instance.open_date = open;
            instance.close_date = close;
            if let Some(url) = remote.join_url {
                instance.join_url = Some(url);
            }
            info!(remote_id = %existing.remote_id, "broadcast event updated");
        } else if changed {
            debug!(remote_id = %existing.remote_id, "reusable meeting edited locally only");
        }

        Ok(ScheduleOutcome { calendar: plan_calendar_events(&instance), instance, notice: None })
    }

    /// Fetch the remote meeting behind an instance.
    ///
    /// Reusable meetings cannot be looked up by id and yield `None`.
    pub async fn locate(
        &self,
        instance: &MeetingInstance,
        creator: &Organizer,
    ) -> Result<Option<RemoteMeeting>> {
        match instance.kind {
            MeetingKind::Broadcast => self
                .provider
                .get_broadcast_event(&creator.normalised_email(), &instance.remote_id)
                .await
                .map(Some),
            MeetingKind::Reusable => Ok(None),
        }
    }

    /// Decide whether the meeting link may be followed now.
    pub async fn access(
        &self,
        instance: &MeetingInstance,
        creator: &Organizer,
        can_manage: bool,
    ) -> AccessDecision {
        let meeting_exists = match instance.kind {
            MeetingKind::Broadcast => match self.locate(instance, creator).await {
                Ok(found) => found.is_some(),
                Err(e) => {
                    warn!(remote_id = %instance.remote_id, error = %e, "meeting lookup failed");
                    false
                }
            },
            MeetingKind::Reusable => true,
        };

        evaluate_access(instance, self.clock.now().timestamp(), can_manage, meeting_exists, self.tz)
    }

    /// Release the remote side of a deleted instance.
    pub async fn remove(&self, instance: &MeetingInstance) -> Result<()> {
        match instance.kind {
            MeetingKind::Reusable => {
                self.provider.delete_online_meeting(&instance.remote_id).await?;
                info!(remote_id = %instance.remote_id, "online meeting deleted");
            }
            MeetingKind::Broadcast => {
                info!(
                    remote_id = %instance.remote_id,
                    "broadcast event left on the organizer calendar"
                );
            }
        }
        Ok(())
    }

    fn window_for(&self, draft: &MeetingDraft, now: DateTime<Utc>) -> Result<EventWindow> {
        resolve_window(
            draft.open_date,
            draft.close_date,
            now,
            self.settings.default_duration(),
            self.tz,
        )
    }

    async fn require_account(&self, organizer: &Organizer) -> Result<String> {
        self.provider.find_user_id(&organizer.normalised_email()).await?.ok_or_else(|| {
            MeetingError::NotFound(format!("No directory account for {}", organizer.email))
        })
    }
}
