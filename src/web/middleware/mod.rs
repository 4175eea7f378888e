//! Middleware for Web API.

pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{require_auth, CurrentSession};
pub use cors::create_cors_layer;
pub use security::{security_headers, security_headers_tls};
