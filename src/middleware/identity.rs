use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::BridgeError;

/// Extracts the caller's identity from the `email` request header.
///
/// The value is the exact opaque string compared against the store key: no
/// trimming, no case folding. Whether email matching should be
/// case-insensitive is an open question; until it is settled the header is
/// taken verbatim.
#[derive(Debug, Clone)]
pub struct IdentityEmail(pub String);

impl<S> FromRequestParts<S> for IdentityEmail
where
    S: Send + Sync,
{
    type Rejection = BridgeError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get("email")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(|v| IdentityEmail(v.to_string()))
            .ok_or(BridgeError::MissingIdentity)
    }
}
