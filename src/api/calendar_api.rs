use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::config::CALENDAR_API_BASE;
use crate::db::models::UserRecord;
use crate::error::BridgeError;

/// Fixed page size for event listings.
const LIST_MAX_RESULTS: &str = "10";

/// Request-scoped Calendar v3 caller, rehydrated from a stored record.
///
/// One instance serves exactly one request and is dropped afterwards; the
/// credentials never live in shared state, so concurrent requests for
/// different identities cannot observe each other's tokens. The inner
/// `reqwest::Client` is only a connection pool and carries no credentials.
pub struct CalendarClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    /// Reconstruct an authorized client from a stored record.
    ///
    /// A record without an access token must never reach the network, so
    /// an absent or empty token short-circuits here as unauthenticated.
    pub fn rehydrate(record: &UserRecord, http: reqwest::Client) -> Result<Self, BridgeError> {
        let access_token = record
            .bundle
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or(BridgeError::MissingAccessToken)?;

        Ok(Self {
            http,
            access_token,
            base_url: CALENDAR_API_BASE.to_string(),
        })
    }

    /// Point the client at a different API base (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// List up to 10 upcoming events from the primary calendar, flattened
    /// to single events and ordered by start time.
    pub async fn list_events(&self) -> Result<Vec<Value>, BridgeError> {
        let url = self.events_url(None)?;
        let resp = self
            .http
            .get(url)
            .query(&[
                ("maxResults", LIST_MAX_RESULTS),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let payload: Value = resp.json().await?;
        let items = payload
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        debug!(count = items.len(), "listed calendar events");
        Ok(items)
    }

    /// Insert an event on the primary calendar and ask Google to allocate a
    /// Meet link for it. The conference create-request carries a fresh
    /// random id on every call; Google treats a reused id as a dedupe key,
    /// so retrying a failed insert gets a new id rather than replaying one.
    pub async fn insert_event(&self, event: &Value) -> Result<Value, BridgeError> {
        let body = with_conference_request(event)?;
        let url = self.events_url(None)?;
        let resp = self
            .http
            .post(url)
            .query(&[("conferenceDataVersion", "1")])
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        let resp = check_status(resp).await?;

        let created: Value = resp.json().await?;
        debug!(
            event_id = created.get("id").and_then(serde_json::Value::as_str).unwrap_or("-"),
            "created calendar event"
        );
        Ok(created)
    }

    /// Delete an event by id. Not idempotent: deleting an id that does not
    /// exist (or was already deleted) is a failure, not a no-op.
    pub async fn delete_event(&self, event_id: &str) -> Result<(), BridgeError> {
        let url = self.events_url(Some(event_id))?;
        let resp = self
            .http
            .delete(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        check_status(resp).await?;
        debug!(event_id, "deleted calendar event");
        Ok(())
    }

    fn events_url(&self, event_id: Option<&str>) -> Result<Url, BridgeError> {
        let base = self.base_url.trim_end_matches('/');
        let url = match event_id {
            Some(id) => format!("{base}/calendars/primary/events/{id}"),
            None => format!("{base}/calendars/primary/events"),
        };
        Ok(Url::parse(&url)?)
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, BridgeError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(BridgeError::RemoteCall {
        status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
        message,
    })
}

/// Clone the caller's event spec and attach the Meet create-request.
/// Every created event carries a conference request, so a spec that is not
/// a JSON object is rejected rather than forwarded without one.
fn with_conference_request(event: &Value) -> Result<Value, BridgeError> {
    let mut body = event.clone();
    let Some(obj) = body.as_object_mut() else {
        return Err(BridgeError::MissingFields);
    };
    obj.insert(
        "conferenceData".to_string(),
        json!({
            "createRequest": {
                "requestId": new_conference_request_id(),
                "conferenceSolutionKey": { "type": "hangoutsMeet" },
            }
        }),
    );
    Ok(body)
}

/// Fresh idempotency token for one conference create-request.
fn new_conference_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}
