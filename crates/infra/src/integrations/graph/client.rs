//! Microsoft Graph implementation of the `MeetingProvider` port

use std::sync::Arc;

use async_trait::async_trait;
use chrono_tz::Tz;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use teamsmeeting_core::meeting::parse_graph_datetime;
use teamsmeeting_core::MeetingProvider;
use teamsmeeting_domain::constants::{GRAPH_BETA, GRAPH_V1};
use teamsmeeting_domain::{EventWindow, MeetingError, Organizer, RemoteMeeting, Result};
use tracing::{debug, info, warn};
use urlencoding::encode;

use super::auth::AccessTokenProvider;
use super::models::{
    DateTimeTimeZone, EventPatch, GraphCollection, GraphErrorEnvelope, GraphEvent,
    GraphOnlineMeeting, GraphUser, NewEvent, NewOnlineMeeting,
};
use crate::errors::conversions::status_error;
use crate::http::HttpClient;

/// Graph client for Teams events and online meetings
pub struct GraphMeetingClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    base_url: String,
    tz: Tz,
}

impl GraphMeetingClient {
    /// `tz` is requested for every event payload and used to read the
    /// returned times.
    pub fn new(
        http: HttpClient,
        auth: Arc<dyn AccessTokenProvider>,
        graph_base_url: &str,
        tz: Tz,
    ) -> Self {
        Self { http, auth, base_url: graph_base_url.trim_end_matches('/').to_string(), tz }
    }

    fn url(&self, version: &str, path: &str) -> String {
        format!("{}/{}{}", self.base_url, version, path)
    }

    fn timezone_preference(&self) -> String {
        format!(r#"outlook.timezone="{}""#, self.tz.name())
    }

    /// Attach the bearer token, send, and turn error statuses into domain errors.
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.auth.access_token().await?;
        let response = self.http.send(request.bearer_auth(token)).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.auth.invalidate().await;
        }

        let body = response.text().await.unwrap_or_default();
        let error = graph_error(status, &body);
        warn!(%status, error = %error, "Graph request failed");
        Err(error)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
        with_tz: bool,
    ) -> Result<T> {
        let mut request = self.http.request(Method::GET, url).query(query);
        if with_tz {
            request = request.header("Prefer", self.timezone_preference());
        }
        read_json(self.dispatch(request).await?).await
    }

    async fn send_json<B, T>(&self, method: Method, url: String, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .http
            .request(method, url)
            .header("Prefer", self.timezone_preference())
            .json(body);
        read_json(self.dispatch(request).await?).await
    }

    fn event_to_remote(&self, event: GraphEvent) -> Result<RemoteMeeting> {
        let read = |value: Option<&DateTimeTimeZone>| {
            value
                .map(|v| parse_graph_datetime(&v.date_time, v.time_zone.as_deref(), self.tz))
                .transpose()
        };

        Ok(RemoteMeeting {
            join_url: event.join_url(),
            start: read(event.start.as_ref())?,
            end: read(event.end.as_ref())?,
            id: event.id,
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .await
        .map_err(|e| MeetingError::InvalidInput(format!("Failed to parse Graph response: {e}")))
}

/// Graph reports failures as `{"error": {"code", "message"}}`.
fn graph_error(status: StatusCode, body: &str) -> MeetingError {
    match serde_json::from_str::<GraphErrorEnvelope>(body) {
        Ok(envelope) if status == StatusCode::NOT_FOUND => {
            MeetingError::NotFound(envelope.error.message)
        }
        Ok(envelope) => {
            MeetingError::Provider { code: envelope.error.code, message: envelope.error.message }
        }
        Err(_) => status_error(status),
    }
}

/// OData string literals escape a quote by doubling it.
fn odata_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn online_meeting_to_remote(meeting: GraphOnlineMeeting) -> RemoteMeeting {
    RemoteMeeting { id: meeting.id, join_url: meeting.join_web_url, start: None, end: None }
}

#[async_trait]
impl MeetingProvider for GraphMeetingClient {
    async fn find_user_id(&self, email: &str) -> Result<Option<String>> {
        let literal = odata_literal(email);
        let filter = format!("userPrincipalName eq {literal} or mail eq {literal}");

        let users: GraphCollection<GraphUser> =
            self.get(self.url(GRAPH_V1, "/users"), &[("$filter", filter)], false).await?;

        match users.value.as_slice() {
            [] => {
                debug!("no directory account matches mailbox");
                Ok(None)
            }
            [user] => Ok(Some(user.id.clone())),
            _ => Err(MeetingError::NotUnique(format!(
                "{} directory accounts match {email}",
                users.value.len()
            ))),
        }
    }

    async fn create_broadcast_event(
        &self,
        subject: &str,
        window: &EventWindow,
        organizer: &Organizer,
    ) -> Result<RemoteMeeting> {
        let email = organizer.normalised_email();
        let url = self.url(GRAPH_BETA, &format!("/users/{}/events", encode(&email)));

        let event: GraphEvent = self
            .send_json(Method::POST, url, &NewEvent::broadcast(subject, window, organizer))
            .await?;
        info!(event_id = %event.id, "broadcast event created");

        self.event_to_remote(event)
    }

    async fn update_broadcast_event(
        &self,
        event_id: &str,
        subject: &str,
        window: &EventWindow,
        organizer: &Organizer,
    ) -> Result<RemoteMeeting> {
        let email = organizer.normalised_email();
        let url = self.url(
            GRAPH_BETA,
            &format!("/users/{}/events/{}", encode(&email), encode(event_id)),
        );

        let event: GraphEvent =
            self.send_json(Method::PATCH, url, &EventPatch::new(subject, window)).await?;
        info!(event_id = %event.id, "broadcast event updated");

        self.event_to_remote(event)
    }

    async fn create_online_meeting(
        &self,
        organizer_user_id: &str,
        subject: &str,
    ) -> Result<RemoteMeeting> {
        let url = self.url(GRAPH_BETA, "/communications/onlineMeetings");

        let meeting: GraphOnlineMeeting = self
            .send_json(Method::POST, url, &NewOnlineMeeting::reusable(organizer_user_id, subject))
            .await?;
        info!(meeting_id = %meeting.id, "online meeting created");

        Ok(online_meeting_to_remote(meeting))
    }

    async fn get_broadcast_event(
        &self,
        organizer_email: &str,
        event_id: &str,
    ) -> Result<RemoteMeeting> {
        let url = self.url(
            GRAPH_V1,
            &format!("/users/{}/events/{}", encode(organizer_email), encode(event_id)),
        );

        let event: GraphEvent = self.get(url, &[], true).await?;
        self.event_to_remote(event)
    }

    async fn find_online_meeting(
        &self,
        video_teleconference_id: &str,
    ) -> Result<Option<RemoteMeeting>> {
        let filter = format!("VideoTeleconferenceId eq {}", odata_literal(video_teleconference_id));

        let meetings: GraphCollection<GraphOnlineMeeting> = self
            .get(self.url(GRAPH_V1, "/communications/onlineMeetings"), &[("$filter", filter)], false)
            .await?;

        Ok(meetings.value.into_iter().next().map(online_meeting_to_remote))
    }

    async fn delete_online_meeting(&self, meeting_id: &str) -> Result<()> {
        let url = self.url(GRAPH_V1, &format!("/communications/onlineMeetings/{}", encode(meeting_id)));

        self.dispatch(self.http.request(Method::DELETE, url)).await?;
        info!(meeting_id, "online meeting deleted");
        Ok(())
    }
}
