//! Web API Directory Listing Tests
//!
//! Integration tests for `POST /api/v1/files`.

mod common;

use std::fs;

use axum::http::StatusCode;
use cookie::Cookie;
use serde_json::{json, Value};

use common::{create_test_app, list};

fn child<'a>(body: &'a Value, name: &str) -> &'a Value {
    body["data"]["contents"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == name)
        .unwrap_or_else(|| panic!("no child named {name}"))
}

#[tokio::test]
async fn test_list_requires_session() {
    let app = create_test_app();

    let response = app
        .server
        .post("/api/v1/files")
        .json(&json!({ "path": "" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["error"]["detail"], "authorization required");
}

#[tokio::test]
async fn test_list_rejects_unknown_session() {
    let app = create_test_app();

    let response = list(&app.server, &Cookie::new("session_id", "bogus"), "").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_root_with_single_file() {
    let app = create_test_app();
    fs::write(app.root_path().join("testfile.txt"), b"test content").unwrap();
    let cookie = app.login().await;

    let response = list(&app.server, &cookie, "").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");

    let root = &body["data"];
    let root_name = app.root_path().file_name().unwrap().to_string_lossy();
    assert_eq!(root["name"], &*root_name);
    assert_eq!(root["type"], "dir");
    assert_eq!(root["size"], 0);
    assert!(root["modified"].is_string());

    let contents = root["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0]["name"], "testfile.txt");
    assert_eq!(contents[0]["type"], "file");
    assert_eq!(contents[0]["size"], 12);
    assert!(contents[0].get("contents").is_none());
}

#[tokio::test]
async fn test_list_slash_is_root() {
    let app = create_test_app();
    fs::write(app.root_path().join("a.txt"), b"a").unwrap();
    let cookie = app.login().await;

    let body: Value = list(&app.server, &cookie, "/").await.json();
    let root_body: Value = list(&app.server, &cookie, "").await.json();
    assert_eq!(body["data"]["contents"], root_body["data"]["contents"]);
}

#[tokio::test]
async fn test_list_subdirectory_one_level() {
    let app = create_test_app();
    let docs = app.root_path().join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("readme.md"), b"# hello").unwrap();
    fs::create_dir(docs.join("nested")).unwrap();
    fs::write(docs.join("nested").join("deep.txt"), b"deep").unwrap();
    let cookie = app.login().await;

    let root: Value = list(&app.server, &cookie, "").await.json();
    let docs_entry = child(&root, "docs");
    assert_eq!(docs_entry["type"], "dir");
    assert!(docs_entry.get("contents").is_none());

    let response = list(&app.server, &cookie, "docs").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "docs");

    let contents = body["data"]["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 2);
    assert_eq!(child(&body, "nested")["type"], "dir");
    assert_eq!(child(&body, "nested")["size"], 0);
    assert_eq!(child(&body, "readme.md")["size"], 7);
}

#[tokio::test]
async fn test_list_percent_encoded_path() {
    let app = create_test_app();
    let dir = app.root_path().join("my docs");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("notes.txt"), b"n").unwrap();
    let cookie = app.login().await;

    for path in ["my%20docs", "my+docs", "./my%20docs/."] {
        let response = list(&app.server, &cookie, path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["name"], "my docs");
        assert_eq!(child(&body, "notes.txt")["type"], "file");
    }
}

#[tokio::test]
async fn test_list_nonexistent_directory() {
    let app = create_test_app();
    let cookie = app.login().await;

    let response = list(&app.server, &cookie, "invalid").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["title"], "Bad Request");
    assert_eq!(body["error"]["detail"], "directory not found");
}

#[tokio::test]
async fn test_list_regular_file() {
    let app = create_test_app();
    fs::write(app.root_path().join("file.txt"), b"x").unwrap();
    let cookie = app.login().await;

    let response = list(&app.server, &cookie, "file.txt").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["detail"], "directory not found");
}

#[tokio::test]
async fn test_list_traversal_rejected() {
    let app = create_test_app();
    let cookie = app.login().await;

    for path in ["../../etc", "..", "sub/../../x", "%2e%2e/%2e%2e/etc"] {
        let response = list(&app.server, &cookie, path).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"]["detail"], "invalid path", "path {path}");
    }
}

#[tokio::test]
async fn test_list_bad_percent_encoding() {
    let app = create_test_app();
    let cookie = app.login().await;

    let response = list(&app.server, &cookie, "100%").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["detail"], "invalid path");
}

#[tokio::test]
async fn test_list_sibling_with_shared_prefix() {
    let app = create_test_app();
    let root_name = app
        .root_path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    let sibling = app
        .root_path()
        .parent()
        .unwrap()
        .join(format!("{root_name}-other"));
    fs::create_dir_all(&sibling).unwrap();
    let cookie = app.login().await;

    let response = list(&app.server, &cookie, &format!("../{root_name}-other")).await;
    response.assert_status(StatusCode::BAD_REQUEST);

    fs::remove_dir_all(&sibling).unwrap();
}

#[tokio::test]
async fn test_list_malformed_body() {
    let app = create_test_app();
    let cookie = app.login().await;

    let response = app
        .server
        .post("/api/v1/files")
        .add_cookie(cookie)
        .text("{ not json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["detail"], "invalid request payload");
}

#[tokio::test]
async fn test_list_wrong_method() {
    let app = create_test_app();

    let response = app.server.get("/api/v1/files").await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let cookie = app.login().await;
    let response = app.server.get("/api/v1/files").add_cookie(cookie).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["detail"], "not found");
}

#[tokio::test]
async fn test_list_oversized_body() {
    let app = create_test_app();
    let cookie = app.login().await;

    let path = "a/".repeat(1536 * 1024);
    let response = app
        .server
        .post("/api/v1/files")
        .add_cookie(cookie)
        .json(&json!({ "path": path }))
        .await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = response.json();
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["detail"], "request body too large");
    assert!(!response.text().contains("length limit"));
}

#[tokio::test]
async fn test_list_missing_path_is_root() {
    let app = create_test_app();
    let cookie = app.login().await;

    let response = app
        .server
        .post("/api/v1/files")
        .add_cookie(cookie)
        .json(&json!({}))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["contents"], json!([]));
}

#[cfg(unix)]
#[tokio::test]
async fn test_list_reports_symlink_as_file() {
    let app = create_test_app();
    let outside = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(outside.path(), app.root_path().join("escape")).unwrap();
    let cookie = app.login().await;

    let body: Value = list(&app.server, &cookie, "").await.json();
    assert_eq!(child(&body, "escape")["type"], "file");
}
