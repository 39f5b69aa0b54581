use axum::{Json, http::StatusCode, response::IntoResponse};
use oauth2::basic::BasicErrorResponseType;
use oauth2::reqwest::Error as ReqwestClientError;
use oauth2::{HttpClientError, RequestTokenError, StandardErrorResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum BridgeError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing `email` identity on request")]
    MissingIdentity,

    #[error("missing `code` in OAuth callback")]
    MissingAuthCode,

    #[error("missing required fields in request body")]
    MissingFields,

    #[error("no stored credentials for this identity")]
    UserNotFound,

    #[error("stored credentials carry no access token; authorize first")]
    MissingAccessToken,

    #[error("missing email in userinfo response")]
    MissingEmailInUserinfo,

    #[error("OAuth2 token request error: {0}")]
    Oauth2Token(String),

    #[error("OAuth2 server error: {error}")]
    Oauth2Server { error: String },

    #[error("calendar API error with status {status}: {message}")]
    RemoteCall { status: StatusCode, message: String },

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),
}

impl
    From<
        RequestTokenError<
            HttpClientError<ReqwestClientError>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    > for BridgeError
{
    fn from(
        e: RequestTokenError<
            HttpClientError<ReqwestClientError>,
            StandardErrorResponse<BasicErrorResponseType>,
        >,
    ) -> Self {
        match e {
            RequestTokenError::ServerResponse(err) => BridgeError::Oauth2Server {
                error: err.error().to_string(),
            },
            RequestTokenError::Request(req_e) => {
                BridgeError::Oauth2Token(format!("request failed: {}", req_e))
            }
            RequestTokenError::Parse(parse_err, _body) => BridgeError::Json(parse_err.into_inner()),
            RequestTokenError::Other(s) => BridgeError::Oauth2Token(s),
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match &self {
            BridgeError::MissingIdentity => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "MISSING_IDENTITY".to_string(),
                    message: self.to_string(),
                },
            ),
            BridgeError::MissingAuthCode => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "MISSING_AUTH_CODE".to_string(),
                    message: self.to_string(),
                },
            ),
            BridgeError::MissingFields => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "MISSING_FIELDS".to_string(),
                    message: self.to_string(),
                },
            ),
            BridgeError::UserNotFound => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "USER_NOT_FOUND".to_string(),
                    message: self.to_string(),
                },
            ),
            BridgeError::MissingAccessToken => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "NO_ACCESS_TOKEN".to_string(),
                    message: self.to_string(),
                },
            ),
            BridgeError::Oauth2Token(_) | BridgeError::Oauth2Server { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "EXCHANGE_FAILED".to_string(),
                    message: "OAuth token exchange failed.".to_string(),
                },
            ),
            BridgeError::MissingEmailInUserinfo => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "IDENTITY_LOOKUP_FAILED".to_string(),
                    message: "Could not resolve the identity owning these tokens.".to_string(),
                },
            ),
            BridgeError::RemoteCall { .. } | BridgeError::Reqwest(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "REMOTE_ERROR".to_string(),
                    message: "Upstream calendar call failed.".to_string(),
                },
            ),
            BridgeError::Database(_) | BridgeError::Json(_) | BridgeError::UrlParse(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };

        if status.is_server_error() {
            error!(code = %error_body.code, "request failed: {}", self);
        }
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
