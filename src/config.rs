use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Runtime configuration, loaded once from the environment.
/// All variables are prefixed with `CALBRIDGE_` (e.g. `CALBRIDGE_CLIENT_ID`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google OAuth2 client id.
    pub client_id: String,
    /// Google OAuth2 client secret.
    pub client_secret: String,
    /// Redirect URI registered with Google; must point at `/google/redirect`.
    pub redirect_uri: Url,
    /// SPA origin the callback redirects back to.
    pub frontend_url: Url,
    pub database_url: String,
    pub loglevel: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: Url::parse("http://localhost:8000/google/redirect")
                .expect("FATAL: invalid default redirect_uri"),
            frontend_url: Url::parse("http://localhost:3000")
                .expect("FATAL: invalid default frontend_url"),
            database_url: "sqlite:calbridge.sqlite".to_string(),
            loglevel: "info".to_string(),
            port: 8000,
        }
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("CALBRIDGE_"))
        .extract()
        .expect("FATAL: invalid CALBRIDGE_* configuration")
});

pub static GOOGLE_AUTH_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://accounts.google.com/o/oauth2/v2/auth")
        .expect("FATAL: invalid Google auth URL")
});

pub static GOOGLE_TOKEN_URI: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://oauth2.googleapis.com/token").expect("FATAL: invalid Google token URI")
});

pub static GOOGLE_USERINFO_URI: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://www.googleapis.com/oauth2/v2/userinfo")
        .expect("FATAL: invalid Google userinfo URI")
});

/// Base of the Calendar v3 REST API. `CalendarClient` keeps this overridable
/// so the gateway can be pointed at a mock server in tests.
pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Scope set requested on every authorization: calendar read, identity
/// (email + profile), full calendar read/write.
pub const OAUTH_SCOPES: [&str; 4] = [
    "https://www.googleapis.com/auth/calendar.readonly",
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/calendar",
];
