use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::api::calendar_api::CalendarClient;
use crate::db::models::UserRecord;
use crate::error::BridgeError;
use crate::middleware::identity::IdentityEmail;
use crate::router::BridgeState;

/// GET /calendar/events -> up to 10 upcoming events for the identity named
/// in the `email` header.
pub async fn list_events(
    State(state): State<BridgeState>,
    IdentityEmail(email): IdentityEmail,
) -> Result<Json<Vec<Value>>, BridgeError> {
    let record = find_user(&state, &email).await?;
    let client = CalendarClient::rehydrate(&record, state.http.clone())?;
    let events = client.list_events().await?;
    Ok(Json(events))
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub email: Option<String>,
    pub event: Option<Value>,
}

/// POST /create/event -> inserts the supplied event spec with an attached
/// Meet conference request. Identity comes from the body on this flow.
pub async fn create_event(
    State(state): State<BridgeState>,
    Json(request): Json<CreateEventRequest>,
) -> Result<Json<Value>, BridgeError> {
    let (Some(email), Some(event)) = (request.email, request.event) else {
        return Err(BridgeError::MissingFields);
    };

    let record = find_user(&state, &email).await?;
    let client = CalendarClient::rehydrate(&record, state.http.clone())?;
    let created = client.insert_event(&event).await?;
    Ok(Json(json!({ "success": true, "data": created })))
}

/// DELETE /delete/event/{id} -> removes one event by id. Repeat deletes of
/// the same id fail; the upstream treats a missing event as an error.
pub async fn delete_event(
    State(state): State<BridgeState>,
    IdentityEmail(email): IdentityEmail,
    Path(event_id): Path<String>,
) -> Result<Json<Value>, BridgeError> {
    let record = find_user(&state, &email).await?;
    let client = CalendarClient::rehydrate(&record, state.http.clone())?;
    client.delete_event(&event_id).await?;
    Ok(Json(json!({ "success": true })))
}

async fn find_user(state: &BridgeState, email: &str) -> Result<UserRecord, BridgeError> {
    state
        .storage
        .find_by_email(email)
        .await?
        .ok_or(BridgeError::UserNotFound)
}
