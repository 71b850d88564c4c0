//! HTTP server integration
//!
//! The actix-web adapter: middleware wiring and the helper for reading the
//! authenticated principal back out of a request.

pub mod middleware;

pub use middleware::{principal, AuthGateMiddleware};
