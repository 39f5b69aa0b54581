use mockito::Matcher;
use serde_json::{Value, json};

use calbridge::TokenBundle;
use calbridge::api::CalendarClient;
use calbridge::db::UserRecord;

fn record_with_token(token: &str) -> UserRecord {
    UserRecord {
        id: 1,
        email: "a@x.com".to_string(),
        bundle: TokenBundle {
            access_token: Some(token.to_string()),
            refresh_token: Some("refresh".to_string()),
            scope: Some("https://www.googleapis.com/auth/calendar".to_string()),
            token_type: Some("Bearer".to_string()),
            expiry_date: Some(1_700_000_000_000),
        },
    }
}

fn client_for(server: &mockito::Server, token: &str) -> CalendarClient {
    CalendarClient::rehydrate(&record_with_token(token), reqwest::Client::new())
        .expect("rehydrate should succeed with a token present")
        .with_base_url(server.url())
}

#[tokio::test]
async fn list_events_requests_a_flattened_ordered_page_of_ten() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/calendars/primary/events")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("maxResults".into(), "10".into()),
            Matcher::UrlEncoded("singleEvents".into(), "true".into()),
            Matcher::UrlEncoded("orderBy".into(), "startTime".into()),
        ]))
        .match_header("authorization", "Bearer tok-list")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"kind":"calendar#events","items":[{"id":"e1"},{"id":"e2"}]}"#)
        .create_async()
        .await;

    let events = client_for(&server, "tok-list")
        .list_events()
        .await
        .expect("list should succeed");

    mock.assert_async().await;
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["id"], "e1");
}

#[tokio::test]
async fn list_events_surfaces_an_expired_token_as_a_remote_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/calendars/primary/events")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"error":{"code":401,"message":"Invalid Credentials"}}"#)
        .create_async()
        .await;

    let err = client_for(&server, "tok-expired")
        .list_events()
        .await
        .expect_err("expired token should fail");

    // No refresh-and-retry: the failure is surfaced as-is.
    assert!(matches!(err, calbridge::BridgeError::RemoteCall { .. }));
}

#[tokio::test]
async fn insert_event_attaches_a_meet_conference_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/calendars/primary/events")
        .match_query(Matcher::UrlEncoded(
            "conferenceDataVersion".into(),
            "1".into(),
        ))
        .match_header("authorization", "Bearer tok-insert")
        .match_body(Matcher::PartialJson(json!({
            "summary": "standup",
            "conferenceData": {
                "createRequest": {
                    "conferenceSolutionKey": { "type": "hangoutsMeet" }
                }
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id":"created-1","summary":"standup","hangoutLink":"https://meet.google.com/abc-defg-hij"}"#,
        )
        .create_async()
        .await;

    let event = json!({
        "summary": "standup",
        "start": { "dateTime": "2026-09-01T10:00:00Z" },
        "end": { "dateTime": "2026-09-01T10:15:00Z" }
    });

    let created: Value = client_for(&server, "tok-insert")
        .insert_event(&event)
        .await
        .expect("insert should succeed");

    mock.assert_async().await;
    assert_eq!(created["id"], "created-1");
    assert!(created["hangoutLink"].as_str().is_some());
}

#[tokio::test]
async fn delete_of_a_nonexistent_event_is_an_error_not_a_no_op() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/calendars/primary/events/never-created")
        .match_header("authorization", "Bearer tok-delete")
        .with_status(410)
        .with_body(r#"{"error":{"code":410,"message":"Resource has been deleted"}}"#)
        .create_async()
        .await;

    let err = client_for(&server, "tok-delete")
        .delete_event("never-created")
        .await
        .expect_err("repeat delete must fail");

    mock.assert_async().await;
    assert!(matches!(err, calbridge::BridgeError::RemoteCall { .. }));
}

#[tokio::test]
async fn delete_succeeds_on_an_existing_event() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/calendars/primary/events/e1")
        .with_status(204)
        .create_async()
        .await;

    client_for(&server, "tok-delete")
        .delete_event("e1")
        .await
        .expect("delete should succeed");

    mock.assert_async().await;
}

#[test]
fn rehydrate_rejects_a_record_without_an_access_token() {
    let record = UserRecord {
        id: 1,
        email: "a@x.com".to_string(),
        bundle: TokenBundle::default(),
    };

    let err = CalendarClient::rehydrate(&record, reqwest::Client::new())
        .err()
        .expect("rehydrate must fail fast");
    assert!(matches!(err, calbridge::BridgeError::MissingAccessToken));
}
