//! Integration tests for `GraphMeetingClient` against a mocked Graph API

mod support;

use chrono::NaiveDate;
use serde_json::json;
use support::{graph_error, GraphHarness, TOKEN};
use teamsmeeting_core::MeetingProvider;
use teamsmeeting_domain::{EventWindow, MeetingError, Organizer};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn organizer() -> Organizer {
    Organizer::new(7, "Ada Lovelace", "Ada@Example.edu")
}

fn window(tz: &str) -> EventWindow {
    let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    EventWindow {
        start: day.and_hms_opt(10, 0, 0).unwrap(),
        end: day.and_hms_opt(11, 0, 0).unwrap(),
        time_zone: tz.into(),
    }
}

#[tokio::test]
async fn find_user_filters_on_upn_and_mail() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param(
            "$filter",
            "userPrincipalName eq 'ada@example.edu' or mail eq 'ada@example.edu'",
        ))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "aad-user-1", "displayName": "Ada Lovelace" }]
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    let id = client.find_user_id("ada@example.edu").await.unwrap();
    assert_eq!(id.as_deref(), Some("aad-user-1"));
}

#[tokio::test]
async fn find_user_distinguishes_missing_and_ambiguous() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$filter", "userPrincipalName eq 'ghost@example.edu' or mail eq 'ghost@example.edu'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": [] })))
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1.0/users"))
        .and(query_param("$filter", "userPrincipalName eq 'shared@example.edu' or mail eq 'shared@example.edu'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "a" }, { "id": "b" }]
        })))
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    assert_eq!(client.find_user_id("ghost@example.edu").await.unwrap(), None);
    assert!(matches!(
        client.find_user_id("shared@example.edu").await,
        Err(MeetingError::NotUnique(_))
    ));
}

#[tokio::test]
async fn broadcast_event_is_posted_to_beta_with_timezone_preference() {
    let harness = GraphHarness::with_timezone("Europe/Paris").await;
    harness.mount_token(1).await;
    Mock::given(method("POST"))
        .and(path("/beta/users/ada%40example.edu/events"))
        .and(header("prefer", r#"outlook.timezone="Europe/Paris""#))
        .and(body_partial_json(json!({
            "subject": "Seminar",
            "start": { "dateTime": "2024-06-01T10:00:00.0000000", "timeZone": "Europe/Paris" },
            "isOnlineMeeting": true,
            "onlineMeetingProvider": "teamsForBusiness",
            "organizer": { "emailAddress": { "address": "Ada@Example.edu" } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "evt-1",
            "start": { "dateTime": "2024-06-01T10:00:00.0000000", "timeZone": "Europe/Paris" },
            "end": { "dateTime": "2024-06-01T11:00:00.0000000", "timeZone": "Europe/Paris" },
            "onlineMeeting": { "joinUrl": "https://teams.microsoft.com/l/meetup-join/evt-1" }
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    let remote = client
        .create_broadcast_event("Seminar", &window("Europe/Paris"), &organizer())
        .await
        .unwrap();

    assert_eq!(remote.id, "evt-1");
    assert_eq!(remote.join_url.as_deref(), Some("https://teams.microsoft.com/l/meetup-join/evt-1"));
    // 10:00 CEST is 08:00 UTC
    assert_eq!(remote.start, Some(1_717_228_800));
    assert_eq!(remote.end, Some(1_717_228_800 + 3_600));
}

#[tokio::test]
async fn update_patches_only_schedule_fields() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("PATCH"))
        .and(path("/beta/users/ada%40example.edu/events/evt-1"))
        .and(body_partial_json(json!({
            "subject": "Moved",
            "end": { "dateTime": "2024-06-01T11:00:00.0000000" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "evt-1",
            "start": { "dateTime": "2024-06-01T10:00:00.0000000", "timeZone": "UTC" },
            "end": { "dateTime": "2024-06-01T11:00:00.0000000", "timeZone": "UTC" }
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    let remote =
        client.update_broadcast_event("evt-1", "Moved", &window("UTC"), &organizer()).await.unwrap();

    assert_eq!(remote.start, Some(1_717_236_000));
    assert_eq!(remote.join_url, None);

    let requests = harness.server.received_requests().await.unwrap();
    let patch = requests.iter().find(|r| r.method.as_str() == "PATCH").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&patch.body).unwrap();
    assert!(body.get("attendees").is_none());
}

#[tokio::test]
async fn online_meeting_uses_directory_id_and_join_web_url() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("POST"))
        .and(path("/beta/communications/onlineMeetings"))
        .and(body_partial_json(json!({
            "subject": "Office hours",
            "participants": { "organizer": { "identity": { "user": { "id": "aad-user-1" } } } },
            "autoAdmittedUsers": "everyone"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "om-1",
            "joinWebUrl": "https://teams.microsoft.com/l/meetup-join/om-1"
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    let remote = client.create_online_meeting("aad-user-1", "Office hours").await.unwrap();
    assert_eq!(remote.id, "om-1");
    assert_eq!(remote.join_url.as_deref(), Some("https://teams.microsoft.com/l/meetup-join/om-1"));
    assert_eq!(remote.start, None);
}

#[tokio::test]
async fn missing_event_is_not_found() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/users/ada%40example.edu/events/evt-9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(graph_error("ErrorItemNotFound", "The specified object was not found in the store.")),
        )
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    match client.get_broadcast_event("ada@example.edu", "evt-9").await {
        Err(MeetingError::NotFound(msg)) => assert!(msg.contains("not found")),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_message_is_kept_for_the_user() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("POST"))
        .and(path("/beta/communications/onlineMeetings"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(graph_error("Forbidden", "Application is not allowed to perform operations on the user.")),
        )
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    let err = client.create_online_meeting("aad-user-1", "Office hours").await.unwrap_err();
    assert_eq!(err.user_message(), "Application is not allowed to perform operations on the user.");
    assert!(matches!(err, MeetingError::Provider { ref code, .. } if code == "Forbidden"));
}

#[tokio::test]
async fn find_online_meeting_by_teleconference_id() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("GET"))
        .and(path("/v1.0/communications/onlineMeetings"))
        .and(query_param("$filter", "VideoTeleconferenceId eq '1234567'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{ "id": "om-7", "joinWebUrl": "https://teams.microsoft.com/l/meetup-join/om-7" }]
        })))
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    let found = client.find_online_meeting("1234567").await.unwrap().expect("meeting");
    assert_eq!(found.id, "om-7");
}

#[tokio::test]
async fn delete_targets_meeting_resource() {
    let harness = GraphHarness::start().await;
    harness.mount_token(1).await;
    Mock::given(method("DELETE"))
        .and(path("/v1.0/communications/onlineMeetings/om-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&harness.server)
        .await;

    harness.connection().client.delete_online_meeting("om-1").await.unwrap();
}

#[tokio::test]
async fn unauthorized_response_drops_cached_token() {
    let harness = GraphHarness::start().await;
    harness.mount_token(2).await;
    Mock::given(method("DELETE"))
        .and(path("/v1.0/communications/onlineMeetings/om-1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(graph_error("InvalidAuthenticationToken", "Access token has expired.")),
        )
        .expect(2)
        .mount(&harness.server)
        .await;

    let client = harness.connection().client;
    assert!(client.delete_online_meeting("om-1").await.is_err());
    // The second call must fetch a new token
    assert!(client.delete_online_meeting("om-1").await.is_err());
}
