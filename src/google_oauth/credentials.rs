use chrono::Utc;
use oauth2::TokenResponse;
use oauth2::basic::BasicTokenType;
use serde::{Deserialize, Serialize};

use crate::google_oauth::endpoints::GoogleTokenResponse;

/// The opaque set of fields returned by a Google OAuth2 exchange.
///
/// Nothing here is interpreted or validated; the bundle is stored verbatim
/// and replayed on later calendar calls. Every field may be absent, and an
/// upsert replaces the whole bundle rather than merging field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenBundle {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    /// Expiry as epoch milliseconds, matching what Google's own client
    /// libraries persist as `expiry_date`.
    pub expiry_date: Option<i64>,
}

impl TokenBundle {
    /// Flatten a token endpoint response into the stored shape.
    pub fn from_token_response(resp: &GoogleTokenResponse) -> Self {
        let expiry_date = resp
            .expires_in()
            .map(|d| Utc::now().timestamp_millis() + d.as_millis() as i64);
        let scope = resp.scopes().map(|scopes| {
            scopes
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        });

        Self {
            access_token: Some(resp.access_token().secret().clone()),
            refresh_token: resp.refresh_token().map(|t| t.secret().clone()),
            scope,
            token_type: Some(token_type_label(resp.token_type())),
            expiry_date,
        }
    }
}

fn token_type_label(token_type: &BasicTokenType) -> String {
    match token_type {
        BasicTokenType::Bearer => "Bearer".to_string(),
        BasicTokenType::Mac => "Mac".to_string(),
        BasicTokenType::Extension(s) => s.clone(),
    }
}
