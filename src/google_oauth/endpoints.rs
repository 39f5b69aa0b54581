use crate::config::{CONFIG, GOOGLE_AUTH_URL, GOOGLE_TOKEN_URI, GOOGLE_USERINFO_URI, OAUTH_SCOPES};
use crate::error::BridgeError;
use crate::google_oauth::credentials::TokenBundle;

use oauth2::{
    AuthUrl, AuthorizationCode, Client as OAuth2Client, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, RedirectUrl, Scope, StandardRevocableToken, TokenUrl,
    basic::{
        BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
        BasicTokenResponse,
    },
};
use serde_json::Value;
use tracing::info;
use url::Url;

/// Stateless Google OAuth endpoints.
pub(crate) struct GoogleOauthEndpoints;

impl GoogleOauthEndpoints {
    /// Build the consent page URL for the fixed scope set with
    /// `access_type=offline` so Google issues a refresh token.
    ///
    /// The generated `state` value is not verified on callback; the flow
    /// carries no server-side session to pin it to.
    pub(crate) fn build_authorize_url(login_hint: Option<&str>) -> Result<Url, BridgeError> {
        let client = build_oauth2_client()?;
        let mut request = client
            .authorize_url(CsrfToken::new_random)
            .add_extra_param("access_type", "offline");
        for scope in OAUTH_SCOPES {
            request = request.add_scope(Scope::new(scope.to_string()));
        }
        if let Some(hint) = login_hint {
            request = request.add_extra_param("login_hint", hint.to_string());
        }
        let (url, _state) = request.url();
        Ok(url)
    }

    /// Exchange an authorization code for a token bundle. Codes are
    /// single-use, so a failure here is terminal for the request.
    pub(crate) async fn exchange_authorization_code(
        code: AuthorizationCode,
        http_client: reqwest::Client,
    ) -> Result<GoogleTokenResponse, BridgeError> {
        let client = build_oauth2_client()?;
        let token_result: GoogleTokenResponse = client
            .exchange_code(code)
            .request_async(&http_client)
            .await?;
        info!("authorization code exchanged for token bundle");
        Ok(token_result)
    }

    /// Second round-trip after the exchange: ask the userinfo endpoint which
    /// identity owns these tokens.
    pub(crate) async fn fetch_identity(
        bundle: &TokenBundle,
        http_client: reqwest::Client,
    ) -> Result<String, BridgeError> {
        let token = bundle
            .access_token
            .as_ref()
            .ok_or(BridgeError::MissingAccessToken)?;

        let payload: Value = http_client
            .get(GOOGLE_USERINFO_URI.as_str())
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        payload
            .get("email")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(BridgeError::MissingEmailInUserinfo)
    }
}

/// Build the Google OAuth2 client from configuration.
fn build_oauth2_client() -> Result<GoogleOauth2Client, BridgeError> {
    let client = OAuth2Client::new(ClientId::new(CONFIG.client_id.clone()))
        .set_client_secret(ClientSecret::new(CONFIG.client_secret.clone()))
        .set_auth_uri(AuthUrl::new(GOOGLE_AUTH_URL.as_str().to_string())?)
        .set_token_uri(TokenUrl::new(GOOGLE_TOKEN_URI.as_str().to_string())?)
        .set_redirect_uri(RedirectUrl::new(CONFIG.redirect_uri.as_str().to_string())?);
    Ok(client)
}

pub(crate) type GoogleTokenResponse = BasicTokenResponse;

pub(crate) type GoogleOauth2Client = OAuth2Client<
    BasicErrorResponse,
    GoogleTokenResponse,
    BasicTokenIntrospectionResponse,
    StandardRevocableToken,
    BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn authorize_url_requests_offline_access_and_all_scopes() {
        let url = GoogleOauthEndpoints::build_authorize_url(None)
            .expect("authorize URL should build from defaults");
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(params.get("access_type").map(String::as_str), Some("offline"));
        assert_eq!(params.get("response_type").map(String::as_str), Some("code"));

        let scope = params.get("scope").expect("scope param present");
        for requested in OAUTH_SCOPES {
            assert!(scope.contains(requested), "missing scope {requested}");
        }
    }

    #[test]
    fn authorize_url_carries_the_identity_hint() {
        let url = GoogleOauthEndpoints::build_authorize_url(Some("a@x.com"))
            .expect("authorize URL should build from defaults");
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        assert_eq!(params.get("login_hint").map(String::as_str), Some("a@x.com"));
    }
}
