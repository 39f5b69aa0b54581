//! Google OAuth2 flow: authorize-URL building, code exchange and the
//! userinfo round-trip that resolves which identity owns a token bundle.

pub mod credentials;
pub(crate) mod endpoints;

pub use credentials::TokenBundle;
