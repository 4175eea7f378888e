//! Test helpers for Web API integration tests.
//!
//! Builds the full application around a temporary root directory and an
//! in-memory session store.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use cookie::Cookie;
use serde_json::json;
use tempfile::TempDir;

use fsbrowse::auth::{AuthBackend, SessionStore};
use fsbrowse::browse::validate_root;
use fsbrowse::config::WebConfig;
use fsbrowse::web::create_app;
use fsbrowse::AppState;

/// Username seeded into every test app.
pub const TEST_USER: &str = "admin";
/// Password of [`TEST_USER`].
pub const TEST_PASSWORD: &str = "securePass!";

/// A running test application.
pub struct TestApp {
    /// In-process HTTP server.
    pub server: TestServer,
    /// Backing store, for inspecting or manipulating sessions directly.
    pub store: Arc<SessionStore>,
    /// Served root directory.
    pub root: TempDir,
}

impl TestApp {
    /// Path of the served root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Log in as the seeded user and return the session cookie.
    pub async fn login(&self) -> Cookie<'static> {
        let response = login(&self.server, TEST_USER, TEST_PASSWORD).await;
        response.assert_status_ok();
        response.cookie("session_id")
    }
}

/// Create a test app with one seeded user and an empty root directory.
pub fn create_test_app() -> TestApp {
    let root = tempfile::tempdir().expect("Failed to create root directory");
    let store = Arc::new(SessionStore::new());
    store
        .add_user(TEST_USER, TEST_PASSWORD)
        .expect("Failed to add test user");

    let server = create_test_server(store.clone(), root.path());
    TestApp {
        server,
        store,
        root,
    }
}

/// Create a test server over any backend.
pub fn create_test_server(backend: Arc<dyn AuthBackend>, root: &Path) -> TestServer {
    let root = validate_root(root).expect("Invalid root directory");
    let state = Arc::new(AppState::new(backend, root));
    let router = create_app(state, &WebConfig::default(), true);
    TestServer::new(router).expect("Failed to create test server")
}

/// POST a login request.
pub async fn login(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/api/v1/auth/login")
        .json(&json!({
            "username": username,
            "password": password
        }))
        .await
}

/// POST a directory listing request.
pub async fn list(server: &TestServer, cookie: &Cookie<'static>, path: &str) -> TestResponse {
    server
        .post("/api/v1/files")
        .add_cookie(cookie.clone())
        .json(&json!({ "path": path }))
        .await
}
