use axum::extract::{Query, State};
use axum::response::Redirect;
use oauth2::AuthorizationCode;
use serde::Deserialize;
use tracing::info;

use crate::config::CONFIG;
use crate::error::BridgeError;
use crate::google_oauth::credentials::TokenBundle;
use crate::google_oauth::endpoints::GoogleOauthEndpoints;
use crate::router::BridgeState;

#[derive(Debug, Deserialize)]
pub struct AuthEntryQuery {
    /// Optional identity hint forwarded to the consent page.
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthCallbackQuery {
    pub code: Option<String>,
}

/// GET /google -> redirects to Google's OAuth2 consent page.
pub async fn google_auth_entry(
    Query(query): Query<AuthEntryQuery>,
) -> Result<Redirect, BridgeError> {
    let url = GoogleOauthEndpoints::build_authorize_url(query.email.as_deref())?;
    info!("dispatching OAuth consent redirect");
    Ok(Redirect::temporary(url.as_str()))
}

/// GET /google/redirect -> exchanges the auth code, resolves the owning
/// identity via userinfo, upserts the bundle and bounces back to the SPA.
pub async fn google_auth_callback(
    State(state): State<BridgeState>,
    Query(query): Query<AuthCallbackQuery>,
) -> Result<Redirect, BridgeError> {
    let code = query.code.ok_or(BridgeError::MissingAuthCode)?;

    let token_response =
        GoogleOauthEndpoints::exchange_authorization_code(AuthorizationCode::new(code), state.http.clone())
            .await?;
    let bundle = TokenBundle::from_token_response(&token_response);

    let email = GoogleOauthEndpoints::fetch_identity(&bundle, state.http.clone()).await?;

    state.storage.upsert(&email, &bundle).await?;
    info!(%email, "stored token bundle after OAuth exchange");

    let mut target = CONFIG.frontend_url.join("/dashboard")?;
    target.query_pairs_mut().append_pair("email", &email);
    Ok(Redirect::temporary(target.as_str()))
}
