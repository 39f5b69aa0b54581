//! HTTP request handlers: thin orchestration over the store and the
//! Google gateways. Each handler is a single linear sequence; the first
//! failing step fails the whole request.

pub mod calendar;
pub mod google_oauth;
