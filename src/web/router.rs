//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::WebConfig;

use super::handlers::{api_not_found, list_files, login, logout, me, AppState};
use super::middleware::{create_cors_layer, require_auth, security_headers, security_headers_tls};

/// Assemble the complete application: API, health check, optional SPA and
/// security headers.
pub fn create_app(app_state: Arc<AppState>, web_config: &WebConfig, tls: bool) -> Router {
    let mut router = create_router(app_state, web_config).merge(create_health_router());

    if web_config.serve_static {
        if let Some(static_router) = create_static_router(&web_config.static_path) {
            router = router.merge(static_router);
        }
    }

    if tls {
        router.layer(middleware::from_fn(security_headers_tls))
    } else {
        router.layer(middleware::from_fn(security_headers))
    }
}

/// Create the main API router.
///
/// All endpoints live under `/api/v1`. Other `/api` paths, and known paths
/// called with the wrong method, get a 404 envelope.
pub fn create_router(app_state: Arc<AppState>, web_config: &WebConfig) -> Router {
    // Auth routes (no session required)
    let auth_public_routes = Router::new()
        .route("/login", post(login).fallback(api_not_found))
        .route("/logout", post(logout).fallback(api_not_found));

    // Auth routes (session required)
    let auth_protected_routes = Router::new()
        .route("/me", get(me).fallback(api_not_found))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let auth_routes = Router::new()
        .merge(auth_public_routes)
        .merge(auth_protected_routes);

    let file_routes = Router::new()
        .route("/files", post(list_files).fallback(api_not_found))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(file_routes);

    let api_routes = Router::new()
        .nest("/v1", v1_routes)
        .fallback(api_not_found);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&web_config.cors_origins)),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Serve a built single-page app, falling back to `index.html` for client routes.
///
/// Returns `None` when `static_path` is not a directory.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    let dir = Path::new(static_path);
    if !dir.is_dir() {
        tracing::warn!(path = %static_path, "Static path not found, SPA serving disabled");
        return None;
    }

    let index = ServeFile::new(dir.join("index.html"));
    let serve_dir = ServeDir::new(dir).fallback(index);
    tracing::info!(path = %static_path, "Serving static files");

    Some(Router::new().fallback_service(serve_dir))
}
