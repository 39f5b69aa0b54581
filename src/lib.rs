pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod google_oauth;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use error::BridgeError;
pub use google_oauth::credentials::TokenBundle;
