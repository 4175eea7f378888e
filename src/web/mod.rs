//! Web API module for fsbrowse.
//!
//! This module provides the JSON API under `/api/v1` with cookie-based
//! sessions, plus optional serving of the browser front-end.

pub mod cookie;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::{create_app, create_router};
pub use server::WebServer;
