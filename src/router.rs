use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::CorsLayer;

use crate::db::sqlite::UserStorage;
use crate::handlers::{calendar, google_oauth};

/// Shared application state.
///
/// `http` is a plain connection pool; per-request credentials live only in
/// the request-scoped `CalendarClient` rehydrated inside each handler.
#[derive(Clone)]
pub struct BridgeState {
    pub storage: UserStorage,
    pub http: reqwest::Client,
}

impl BridgeState {
    pub fn new(storage: UserStorage) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("calbridge/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("FATAL: initialize shared HTTP client failed");
        Self { storage, http }
    }
}

/// Build the application router. CORS is permissive: the SPA is served
/// from a different origin.
pub fn bridge_router(state: BridgeState) -> Router {
    Router::new()
        .route("/google", get(google_oauth::google_auth_entry))
        .route("/google/redirect", get(google_oauth::google_auth_callback))
        .route("/calendar/events", get(calendar::list_events))
        .route("/create/event", post(calendar::create_event))
        .route("/delete/event/{id}", delete(calendar::delete_event))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
